//! PostgreSQL repositories.
//!
//! # Responsibilities
//! - Build the connection pool from `DatabaseConfig`
//! - Issue one parameterized statement per operation
//! - Map rows into `Entry` / `Author` via `FromRow`

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;
use crate::model::{Author, AuthorRecord, AuthorRecordChanges, Entry, EntryInput};
use crate::store::{AuthorRepository, EntryRepository, StoreError, StoreResult};

const ENTRY_COLUMNS: &str = "id, title, slug, body, author, created_at";
const AUTHOR_COLUMNS: &str = "id, username, email, password_hash";

/// Open the shared pool and make sure the server answers.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.name);

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(options)
        .await?;

    ping(&pool).await?;
    Ok(pool)
}

/// Round-trip a trivial query.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Entries table on a shared pool.
#[derive(Clone)]
pub struct PgEntryRepository {
    pool: PgPool,
}

impl PgEntryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntryRepository for PgEntryRepository {
    async fn list(&self) -> StoreResult<Vec<Entry>> {
        let entries = sqlx::query_as::<_, Entry>(&format!(
            "SELECT {ENTRY_COLUMNS} FROM entries ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Entry> {
        let entry = sqlx::query_as::<_, Entry>(&format!(
            "SELECT {ENTRY_COLUMNS} FROM entries WHERE id = $1"
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(entry)
    }

    async fn get_by_slug(&self, slug: &str) -> StoreResult<Entry> {
        let entry = sqlx::query_as::<_, Entry>(&format!(
            "SELECT {ENTRY_COLUMNS} FROM entries WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_one(&self.pool)
        .await?;
        Ok(entry)
    }

    async fn create(&self, input: EntryInput) -> StoreResult<Entry> {
        let entry = sqlx::query_as::<_, Entry>(&format!(
            "INSERT INTO entries (title, slug, body, author, created_at) \
             VALUES ($1, $2, $3, $4, NOW()) RETURNING {ENTRY_COLUMNS}"
        ))
        .bind(&input.title)
        .bind(&input.slug)
        .bind(&input.body)
        .bind(&input.author)
        .fetch_one(&self.pool)
        .await?;
        Ok(entry)
    }

    async fn update(&self, id: i64, input: EntryInput) -> StoreResult<Entry> {
        sqlx::query_as::<_, Entry>(&format!(
            "UPDATE entries SET title = $1, slug = $2, body = $3, author = $4 \
             WHERE id = $5 RETURNING {ENTRY_COLUMNS}"
        ))
        .bind(&input.title)
        .bind(&input.slug)
        .bind(&input.body)
        .bind(&input.author)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: i64) -> StoreResult<Entry> {
        sqlx::query_as::<_, Entry>(&format!(
            "DELETE FROM entries WHERE id = $1 RETURNING {ENTRY_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }
}

/// Authors table on a shared pool.
#[derive(Clone)]
pub struct PgAuthorRepository {
    pool: PgPool,
}

impl PgAuthorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorRepository for PgAuthorRepository {
    async fn list(&self) -> StoreResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(&format!(
            "SELECT {AUTHOR_COLUMNS} FROM authors ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(authors)
    }

    async fn get_by_username(&self, username: &str) -> StoreResult<Author> {
        let author = sqlx::query_as::<_, Author>(&format!(
            "SELECT {AUTHOR_COLUMNS} FROM authors WHERE username = $1"
        ))
        .bind(username)
        .fetch_one(&self.pool)
        .await?;
        Ok(author)
    }

    async fn get_by_email(&self, email: &str) -> StoreResult<Author> {
        let author = sqlx::query_as::<_, Author>(&format!(
            "SELECT {AUTHOR_COLUMNS} FROM authors WHERE email = $1"
        ))
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(author)
    }

    async fn create(&self, record: AuthorRecord) -> StoreResult<Author> {
        let author = sqlx::query_as::<_, Author>(&format!(
            "INSERT INTO authors (username, email, password_hash) \
             VALUES ($1, $2, $3) RETURNING {AUTHOR_COLUMNS}"
        ))
        .bind(&record.username)
        .bind(&record.email)
        .bind(&record.password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(author)
    }

    async fn update(&self, username: &str, changes: AuthorRecordChanges) -> StoreResult<Author> {
        sqlx::query_as::<_, Author>(&format!(
            "UPDATE authors SET email = $1, password_hash = $2 \
             WHERE username = $3 RETURNING {AUTHOR_COLUMNS}"
        ))
        .bind(&changes.email)
        .bind(&changes.password_hash)
        .bind(username)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, username: &str) -> StoreResult<Author> {
        sqlx::query_as::<_, Author>(&format!(
            "DELETE FROM authors WHERE username = $1 RETURNING {AUTHOR_COLUMNS}"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }
}
