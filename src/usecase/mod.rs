//! Use-case layer.
//!
//! A thin seam between transport and persistence. The HTTP layer only sees
//! the [`EntryUseCase`] and [`AuthorUseCase`] traits, so handlers can run
//! against any implementation, including test doubles.

pub mod author;
pub mod credentials;
pub mod entry;

use std::sync::Arc;

use async_trait::async_trait;

use crate::model::{Author, AuthorChanges, Entry, EntryInput, NewAuthor};
use crate::store::{AuthorRepository, EntryRepository, StoreResult};

pub use author::AuthorService;
pub use entry::EntryService;

/// Entry operations exposed to handlers.
#[async_trait]
pub trait EntryUseCase: Send + Sync {
    async fn list_entries(&self) -> StoreResult<Vec<Entry>>;
    async fn entry_by_id(&self, id: i64) -> StoreResult<Entry>;
    async fn entry_by_slug(&self, slug: &str) -> StoreResult<Entry>;
    async fn create_entry(&self, input: EntryInput) -> StoreResult<Entry>;
    async fn update_entry(&self, id: i64, input: EntryInput) -> StoreResult<Entry>;
    async fn delete_entry(&self, id: i64) -> StoreResult<Entry>;
}

/// Author operations exposed to handlers.
#[async_trait]
pub trait AuthorUseCase: Send + Sync {
    async fn list_authors(&self) -> StoreResult<Vec<Author>>;
    async fn author_by_username(&self, username: &str) -> StoreResult<Author>;
    async fn author_by_email(&self, email: &str) -> StoreResult<Author>;
    async fn create_author(&self, author: NewAuthor) -> StoreResult<Author>;
    async fn update_author(&self, username: &str, changes: AuthorChanges) -> StoreResult<Author>;
    async fn delete_author(&self, username: &str) -> StoreResult<Author>;
}

/// The use-cases handed to the HTTP layer.
#[derive(Clone)]
pub struct Services {
    pub entries: Arc<dyn EntryUseCase>,
    pub authors: Arc<dyn AuthorUseCase>,
}

impl Services {
    /// Wire the default services on top of a pair of repositories.
    pub fn from_repositories(
        entries: Arc<dyn EntryRepository>,
        authors: Arc<dyn AuthorRepository>,
    ) -> Self {
        Self {
            entries: Arc::new(EntryService::new(entries)),
            authors: Arc::new(AuthorService::new(authors)),
        }
    }
}
