//! Blog entries (posts).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::model::{require_non_empty, require_no_slash};

/// A stored entry. `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Entry {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub body: String,
    /// Free-text author name; not joined against `authors`.
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// Client-supplied fields for create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryInput {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub body: String,
    pub author: String,
}

impl EntryInput {
    /// Collect every field-level problem with this input.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();
        require_non_empty(&mut problems, "title", &self.title);
        require_non_empty(&mut problems, "slug", &self.slug);
        require_no_slash(&mut problems, "slug", &self.slug);
        require_non_empty(&mut problems, "author", &self.author);

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}
