//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the configured store (Postgres pool or memory tables)
//! - Wire repositories into the use-case services
//!
//! # Design Decisions
//! - Fail fast: an unreachable database is fatal
//! - The pool is created here and passed down, never stored globally

use std::sync::Arc;

use thiserror::Error;

use crate::config::{BubbleConfig, StoreDriver};
use crate::store::{postgres, MemoryStore, PgAuthorRepository, PgEntryRepository};
use crate::usecase::Services;

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("could not connect to postgres at {host}:{port}/{database}: {source}")]
    Database {
        host: String,
        port: u16,
        database: String,
        #[source]
        source: sqlx::Error,
    },
}

/// Construct the use-case services for the configured store.
pub async fn build_services(config: &BubbleConfig) -> Result<Services, StartupError> {
    match config.database.driver {
        StoreDriver::Postgres => {
            let db = &config.database;
            let pool = postgres::connect(db).await.map_err(|source| StartupError::Database {
                host: db.host.clone(),
                port: db.port,
                database: db.name.clone(),
                source,
            })?;
            tracing::info!(
                host = %db.host,
                port = db.port,
                database = %db.name,
                max_connections = db.max_connections,
                "Postgres pool ready"
            );
            Ok(Services::from_repositories(
                Arc::new(PgEntryRepository::new(pool.clone())),
                Arc::new(PgAuthorRepository::new(pool)),
            ))
        }
        StoreDriver::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            Ok(memory_services())
        }
    }
}

/// Services backed by one fresh [`MemoryStore`].
pub fn memory_services() -> Services {
    let store = Arc::new(MemoryStore::new());
    Services::from_repositories(store.clone(), store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntryInput;

    #[tokio::test]
    async fn test_memory_driver_builds_working_services() {
        let mut config = BubbleConfig::default();
        config.database.driver = StoreDriver::Memory;

        let services = build_services(&config).await.unwrap();
        let created = services
            .entries
            .create_entry(EntryInput {
                title: "Hi".into(),
                slug: "hi".into(),
                body: String::new(),
                author: "ana".into(),
            })
            .await
            .unwrap();
        assert_eq!(services.entries.entry_by_slug("hi").await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_unreachable_postgres_is_fatal() {
        let mut config = BubbleConfig::default();
        config.database.host = "127.0.0.1".into();
        config.database.port = 1; // nothing listens here
        config.database.acquire_timeout_secs = 1;

        let err = build_services(&config).await.err().unwrap();
        assert!(err.to_string().contains("127.0.0.1:1/bubble"));
    }
}
