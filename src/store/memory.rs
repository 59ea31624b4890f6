//! Process-local store.
//!
//! Backs both repository traits with concurrent maps. Unique keys (slug,
//! username, email) are reserved in index maps before a row is written, so
//! two concurrent writers cannot both claim the same key.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry as MapEntry;
use dashmap::DashMap;

use crate::model::{Author, AuthorRecord, AuthorRecordChanges, Entry, EntryInput};
use crate::store::{AuthorRepository, EntryRepository, StoreError, StoreResult};

/// In-memory tables for entries and authors.
#[derive(Debug)]
pub struct MemoryStore {
    entries: DashMap<i64, Entry>,
    slugs: DashMap<String, i64>,
    next_entry_id: AtomicI64,

    authors: DashMap<i64, Author>,
    usernames: DashMap<String, i64>,
    emails: DashMap<String, i64>,
    next_author_id: AtomicI64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            slugs: DashMap::new(),
            next_entry_id: AtomicI64::new(1),
            authors: DashMap::new(),
            usernames: DashMap::new(),
            emails: DashMap::new(),
            next_author_id: AtomicI64::new(1),
        }
    }

    /// Number of stored entries.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of stored authors.
    pub fn author_count(&self) -> usize {
        self.authors.len()
    }
}

/// Claim `key` for `id` in a unique index. Re-claiming your own key is a no-op.
fn reserve(index: &DashMap<String, i64>, key: &str, id: i64, what: &str) -> StoreResult<()> {
    match index.entry(key.to_string()) {
        MapEntry::Occupied(slot) if *slot.get() != id => Err(StoreError::Conflict(format!(
            "{} '{}' already exists",
            what, key
        ))),
        MapEntry::Occupied(_) => Ok(()),
        MapEntry::Vacant(slot) => {
            slot.insert(id);
            Ok(())
        }
    }
}

fn release(index: &DashMap<String, i64>, key: &str, id: i64) {
    index.remove_if(key, |_, owner| *owner == id);
}

fn sorted_by_id<T: Clone>(map: &DashMap<i64, T>) -> Vec<T> {
    let mut rows: Vec<(i64, T)> = map.iter().map(|r| (*r.key(), r.value().clone())).collect();
    rows.sort_by_key(|(id, _)| *id);
    rows.into_iter().map(|(_, row)| row).collect()
}

#[async_trait]
impl EntryRepository for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Entry>> {
        Ok(sorted_by_id(&self.entries))
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Entry> {
        self.entries
            .get(&id)
            .map(|r| r.value().clone())
            .ok_or(StoreError::NotFound)
    }

    async fn get_by_slug(&self, slug: &str) -> StoreResult<Entry> {
        let id = self.slugs.get(slug).map(|r| *r.value()).ok_or(StoreError::NotFound)?;
        self.get_by_id(id).await
    }

    async fn create(&self, input: EntryInput) -> StoreResult<Entry> {
        let id = self.next_entry_id.fetch_add(1, Ordering::SeqCst);
        reserve(&self.slugs, &input.slug, id, "slug")?;

        let entry = Entry {
            id,
            title: input.title,
            slug: input.slug,
            body: input.body,
            author: input.author,
            created_at: Utc::now(),
        };
        self.entries.insert(id, entry.clone());
        Ok(entry)
    }

    async fn update(&self, id: i64, input: EntryInput) -> StoreResult<Entry> {
        let mut row = self.entries.get_mut(&id).ok_or(StoreError::NotFound)?;

        if row.slug != input.slug {
            reserve(&self.slugs, &input.slug, id, "slug")?;
            release(&self.slugs, &row.slug, id);
        }

        row.title = input.title;
        row.slug = input.slug;
        row.body = input.body;
        row.author = input.author;
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> StoreResult<Entry> {
        let (_, entry) = self.entries.remove(&id).ok_or(StoreError::NotFound)?;
        release(&self.slugs, &entry.slug, id);
        Ok(entry)
    }
}

#[async_trait]
impl AuthorRepository for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Author>> {
        Ok(sorted_by_id(&self.authors))
    }

    async fn get_by_username(&self, username: &str) -> StoreResult<Author> {
        let id = self
            .usernames
            .get(username)
            .map(|r| *r.value())
            .ok_or(StoreError::NotFound)?;
        self.authors
            .get(&id)
            .map(|r| r.value().clone())
            .ok_or(StoreError::NotFound)
    }

    async fn get_by_email(&self, email: &str) -> StoreResult<Author> {
        let id = self
            .emails
            .get(email)
            .map(|r| *r.value())
            .ok_or(StoreError::NotFound)?;
        self.authors
            .get(&id)
            .map(|r| r.value().clone())
            .ok_or(StoreError::NotFound)
    }

    async fn create(&self, record: AuthorRecord) -> StoreResult<Author> {
        let id = self.next_author_id.fetch_add(1, Ordering::SeqCst);
        reserve(&self.usernames, &record.username, id, "username")?;
        if let Err(e) = reserve(&self.emails, &record.email, id, "email") {
            release(&self.usernames, &record.username, id);
            return Err(e);
        }

        let author = Author {
            id,
            username: record.username,
            email: record.email,
            password_hash: record.password_hash,
        };
        self.authors.insert(id, author.clone());
        Ok(author)
    }

    async fn update(&self, username: &str, changes: AuthorRecordChanges) -> StoreResult<Author> {
        let id = self
            .usernames
            .get(username)
            .map(|r| *r.value())
            .ok_or(StoreError::NotFound)?;
        let mut row = self.authors.get_mut(&id).ok_or(StoreError::NotFound)?;

        if row.email != changes.email {
            reserve(&self.emails, &changes.email, id, "email")?;
            release(&self.emails, &row.email, id);
        }

        row.email = changes.email;
        row.password_hash = changes.password_hash;
        Ok(row.clone())
    }

    async fn delete(&self, username: &str) -> StoreResult<Author> {
        let (_, id) = self.usernames.remove(username).ok_or(StoreError::NotFound)?;
        let (_, author) = self.authors.remove(&id).ok_or(StoreError::NotFound)?;
        release(&self.emails, &author.email, id);
        Ok(author)
    }
}
