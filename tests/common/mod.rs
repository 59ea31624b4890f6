//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;

use bubble::config::{BubbleConfig, StoreDriver};
use bubble::http::HttpServer;
use bubble::lifecycle::{memory_services, Shutdown};
use bubble::Services;
use bubble_client::{BubbleClient, EntryInput, NewAuthor};
use tokio::net::TcpListener;

/// A running server on an ephemeral port. Stops when dropped.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: BubbleClient,
    pub http: reqwest::Client,
    shutdown: Shutdown,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub fn test_config() -> BubbleConfig {
    let mut config = BubbleConfig::default();
    config.server.bind_address = "127.0.0.1:0".into();
    config.database.driver = StoreDriver::Memory;
    config
}

/// Start the app over a fresh memory store.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(test_config(), memory_services()).await
}

/// Start the app over the given services.
pub async fn spawn_app_with(config: BubbleConfig, services: Services) -> TestApp {
    let listener = TcpListener::bind(&config.server.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&config, services);
    let stopped = shutdown.signalled();
    tokio::spawn(async move {
        let _ = server.run(listener, stopped).await;
    });

    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    let client = BubbleClient::with_client(http.clone(), &format!("http://{}", addr));

    TestApp {
        addr,
        client,
        http,
        shutdown,
    }
}

pub fn entry(slug: &str) -> EntryInput {
    EntryInput {
        title: format!("Title of {}", slug),
        slug: slug.to_string(),
        body: "Lorem ipsum".to_string(),
        author: "ana".to_string(),
    }
}

pub fn author(username: &str) -> NewAuthor {
    NewAuthor {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password: "correct horse battery staple".to_string(),
    }
}
