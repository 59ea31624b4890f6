//! Async client for the bubble HTTP API.
//!
//! Every call returns the HTTP status together with the decoded envelope, so
//! callers can assert on failures as easily as on successes.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub type ClientResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Characters escaped inside a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub error: Option<String>,
}

/// Status, correlation ID and decoded body of one call.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub request_id: Option<String>,
    pub content_type: Option<String>,
    pub body: Envelope<T>,
}

impl<T> ApiResponse<T> {
    /// The payload of a successful call.
    pub fn into_data(self) -> ClientResult<T> {
        match self.body.data {
            Some(data) if self.body.success => Ok(data),
            _ => Err(format!(
                "request failed with status {}: {}",
                self.status,
                self.body.message.unwrap_or_default()
            )
            .into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub author: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryInput {
    pub title: String,
    pub slug: String,
    pub body: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewAuthor {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthorChanges {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct BubbleClient {
    client: Client,
    base_url: String,
}

impl BubbleClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_entries(&self) -> ClientResult<ApiResponse<Vec<Entry>>> {
        self.call(self.request(Method::GET, "/entries")).await
    }

    pub async fn entry_by_id(&self, id: i64) -> ClientResult<ApiResponse<Entry>> {
        self.call(self.request(Method::GET, &format!("/entries/{}", id))).await
    }

    pub async fn entry_by_slug(&self, slug: &str) -> ClientResult<ApiResponse<Entry>> {
        self.call(self.request(Method::GET, &format!("/entries/slug/{}", segment(slug))))
            .await
    }

    pub async fn create_entry(&self, input: &EntryInput) -> ClientResult<ApiResponse<Entry>> {
        self.call(self.request(Method::POST, "/entries").json(input)).await
    }

    pub async fn update_entry(&self, id: i64, input: &EntryInput) -> ClientResult<ApiResponse<Entry>> {
        self.call(self.request(Method::PUT, &format!("/entries/{}", id)).json(input))
            .await
    }

    pub async fn delete_entry(&self, id: i64) -> ClientResult<ApiResponse<Entry>> {
        self.call(self.request(Method::DELETE, &format!("/entries/{}", id))).await
    }

    pub async fn list_authors(&self) -> ClientResult<ApiResponse<Vec<Author>>> {
        self.call(self.request(Method::GET, "/authors")).await
    }

    pub async fn author_by_username(&self, username: &str) -> ClientResult<ApiResponse<Author>> {
        self.call(self.request(Method::GET, &format!("/authors/{}", segment(username))))
            .await
    }

    pub async fn author_by_email(&self, email: &str) -> ClientResult<ApiResponse<Author>> {
        self.call(self.request(Method::GET, &format!("/authors/email/{}", segment(email))))
            .await
    }

    pub async fn create_author(&self, author: &NewAuthor) -> ClientResult<ApiResponse<Author>> {
        self.call(self.request(Method::POST, "/authors").json(author)).await
    }

    pub async fn update_author(
        &self,
        username: &str,
        changes: &AuthorChanges,
    ) -> ClientResult<ApiResponse<Author>> {
        self.call(
            self.request(Method::PUT, &format!("/authors/{}", segment(username)))
                .json(changes),
        )
        .await
    }

    pub async fn delete_author(&self, username: &str) -> ClientResult<ApiResponse<Author>> {
        self.call(self.request(Method::DELETE, &format!("/authors/{}", segment(username))))
            .await
    }

    /// Send an arbitrary request with a raw body. Useful for malformed input.
    pub async fn send_raw(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> ClientResult<ApiResponse<serde_json::Value>> {
        let mut request = self.request(method, path);
        if let Some(body) = body {
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }
        self.call(request).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, format!("{}{}", self.base_url, path))
    }

    async fn call<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<ApiResponse<T>> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let (request_id, content_type) = {
            let header = |name: &str| {
                response
                    .headers()
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            };
            (header("x-request-id"), header("content-type"))
        };

        let text = response.text().await?;
        let body = serde_json::from_str::<Envelope<T>>(&text)
            .map_err(|e| format!("undecodable body (status {}): {}: {}", status, e, text))?;

        Ok(ApiResponse {
            status,
            request_id,
            content_type,
            body,
        })
    }
}

fn segment(raw: &str) -> String {
    utf8_percent_encode(raw, SEGMENT).to_string()
}
