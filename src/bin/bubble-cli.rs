use clap::{Args, Parser, Subcommand};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Method;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "bubble-cli")]
#[command(about = "Command-line client for the bubble API", long_about = None)]
struct Cli {
    #[arg(short, long, env = "BUBBLE_URL", default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage blog entries
    #[command(subcommand)]
    Entries(EntryCommand),
    /// Manage authors
    #[command(subcommand)]
    Authors(AuthorCommand),
}

#[derive(Subcommand)]
enum EntryCommand {
    /// List all entries
    List,
    /// Show one entry by ID
    Get { id: i64 },
    /// Show one entry by slug
    Slug { slug: String },
    /// Create an entry
    Create(EntryFields),
    /// Replace an entry's fields
    Update {
        id: i64,
        #[command(flatten)]
        fields: EntryFields,
    },
    /// Delete an entry
    Delete { id: i64 },
}

#[derive(Args)]
struct EntryFields {
    #[arg(long)]
    title: String,
    #[arg(long)]
    slug: String,
    #[arg(long, default_value = "")]
    body: String,
    #[arg(long)]
    author: String,
}

#[derive(Subcommand)]
enum AuthorCommand {
    /// List all authors
    List,
    /// Show one author by username
    Get { username: String },
    /// Show one author by email
    Email { email: String },
    /// Register an author
    Create {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Change an author's email and password
    Update {
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Delete an author
    Delete { username: String },
}

fn segment(raw: &str) -> String {
    utf8_percent_encode(raw, NON_ALPHANUMERIC).to_string()
}

impl EntryFields {
    fn to_json(&self) -> Value {
        json!({
            "title": self.title,
            "slug": self.slug,
            "body": self.body,
            "author": self.author,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let (method, path, body) = match cli.command {
        Commands::Entries(command) => match command {
            EntryCommand::List => (Method::GET, "/entries".to_string(), None),
            EntryCommand::Get { id } => (Method::GET, format!("/entries/{}", id), None),
            EntryCommand::Slug { slug } => (Method::GET, format!("/entries/slug/{}", segment(&slug)), None),
            EntryCommand::Create(fields) => (Method::POST, "/entries".to_string(), Some(fields.to_json())),
            EntryCommand::Update { id, fields } => {
                (Method::PUT, format!("/entries/{}", id), Some(fields.to_json()))
            }
            EntryCommand::Delete { id } => (Method::DELETE, format!("/entries/{}", id), None),
        },
        Commands::Authors(command) => match command {
            AuthorCommand::List => (Method::GET, "/authors".to_string(), None),
            AuthorCommand::Get { username } => (Method::GET, format!("/authors/{}", segment(&username)), None),
            AuthorCommand::Email { email } => {
                (Method::GET, format!("/authors/email/{}", segment(&email)), None)
            }
            AuthorCommand::Create {
                username,
                email,
                password,
            } => (
                Method::POST,
                "/authors".to_string(),
                Some(json!({"username": username, "email": email, "password": password})),
            ),
            AuthorCommand::Update {
                username,
                email,
                password,
            } => (
                Method::PUT,
                format!("/authors/{}", segment(&username)),
                Some(json!({"email": email, "password": password})),
            ),
            AuthorCommand::Delete { username } => {
                (Method::DELETE, format!("/authors/{}", segment(&username)), None)
            }
        },
    };

    let mut request = client.request(method, format!("{}{}", base, path));
    if let Some(body) = body {
        request = request.json(&body);
    }
    let res = request.send().await?;

    if !print_response(res).await? {
        std::process::exit(1);
    }
    Ok(())
}

/// Pretty-print the envelope. Returns whether the call succeeded.
async fn print_response(res: reqwest::Response) -> Result<bool, Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    match serde_json::from_str::<Value>(&text) {
        Ok(json) if status.is_success() => println!("{}", serde_json::to_string_pretty(&json)?),
        Ok(json) => {
            eprintln!("Error: API returned status {}", status);
            eprintln!("{}", serde_json::to_string_pretty(&json)?);
        }
        Err(_) => {
            eprintln!("Error: API returned status {}", status);
            eprintln!("Response: {}", text);
        }
    }
    Ok(status.is_success())
}
