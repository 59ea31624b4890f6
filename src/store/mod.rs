//! Persistence subsystem.
//!
//! # Data Flow
//! ```text
//! use-case call
//!     → EntryRepository / AuthorRepository (trait objects)
//!     → postgres.rs (one parameterized statement on the shared PgPool)
//!       or memory.rs (process-local tables)
//!     → rows mapped to model records
//!     → sqlx errors classified into StoreError
//! ```
//!
//! # Design Decisions
//! - Every operation is a single statement: no retries, no transactions
//! - Mutations use `RETURNING`, so callers get the stored record back
//! - Uniqueness is the store's job; nothing is pre-checked here

pub mod error;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::model::{Author, AuthorRecord, AuthorRecordChanges, Entry, EntryInput};

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use postgres::{PgAuthorRepository, PgEntryRepository};

/// Storage contract for entries.
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// All entries, ascending by id.
    async fn list(&self) -> StoreResult<Vec<Entry>>;
    async fn get_by_id(&self, id: i64) -> StoreResult<Entry>;
    async fn get_by_slug(&self, slug: &str) -> StoreResult<Entry>;
    /// Insert and return the stored entry with its id and timestamp.
    async fn create(&self, input: EntryInput) -> StoreResult<Entry>;
    /// Replace title, slug, body and author. `created_at` is untouched.
    async fn update(&self, id: i64, input: EntryInput) -> StoreResult<Entry>;
    /// Remove and return the deleted entry.
    async fn delete(&self, id: i64) -> StoreResult<Entry>;
}

/// Storage contract for authors.
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// All authors, ascending by id.
    async fn list(&self) -> StoreResult<Vec<Author>>;
    async fn get_by_username(&self, username: &str) -> StoreResult<Author>;
    async fn get_by_email(&self, email: &str) -> StoreResult<Author>;
    async fn create(&self, record: AuthorRecord) -> StoreResult<Author>;
    async fn update(&self, username: &str, changes: AuthorRecordChanges) -> StoreResult<Author>;
    async fn delete(&self, username: &str) -> StoreResult<Author>;
}
