//! bubble: blog backend over PostgreSQL.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────────┐
//!                    │                       BUBBLE                          │
//!                    │                                                       │
//!   Client Request   │  ┌──────────┐    ┌──────────┐    ┌──────────────┐    │
//!   ─────────────────┼─▶│  http    │───▶│ routing  │───▶│   handlers   │    │
//!                    │  │  server  │    │  table   │    │ parse/encode │    │
//!                    │  └──────────┘    └──────────┘    └──────┬───────┘    │
//!                    │                                         │            │
//!                    │                                         ▼            │
//!                    │                                  ┌──────────────┐    │
//!                    │                                  │   use-case   │    │
//!                    │                                  │   services   │    │
//!                    │                                  └──────┬───────┘    │
//!                    │                                         │            │
//!                    │                                         ▼            │
//!   Client Response  │  ┌──────────┐                    ┌──────────────┐    │
//!   ◀────────────────┼──│ envelope │◀───────────────────│    store     │◀───┼── PostgreSQL
//!                    │  └──────────┘                    │ (pg / memory)│    │
//!                    │                                  └──────────────┘    │
//!                    │  ┌────────────────────────────────────────────────┐  │
//!                    │  │ config │ lifecycle │ observability (logs/metrics)│ │
//!                    │  └────────────────────────────────────────────────┘  │
//!                    └──────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use bubble::config::load_config;
use bubble::http::HttpServer;
use bubble::lifecycle::{build_services, signals, Shutdown};
use bubble::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "bubble")]
#[command(about = "Blog backend serving entries and authors", long_about = None)]
struct Args {
    /// Path to a TOML config file. Environment variables override it.
    #[arg(short, long, env = "BUBBLE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("bubble: {}", e);
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.observability);
    tracing::info!("bubble v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.server.bind_address,
        store = ?config.database.driver,
        request_timeout_secs = config.server.request_timeout_secs,
        "Configuration loaded"
    );

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Fatal error");
        std::process::exit(1);
    }

    tracing::info!("Shutdown complete");
}

async fn run(config: bubble::BubbleConfig) -> Result<(), Box<dyn std::error::Error>> {
    let services = build_services(&config).await?;

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_shutdown().await;
        trigger.trigger();
    });

    let server = HttpServer::new(&config, services);
    server.run(listener, shutdown.signalled()).await?;
    Ok(())
}
