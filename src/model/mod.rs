//! Domain records and the input shapes accepted over HTTP.

pub mod author;
pub mod entry;

pub use author::{Author, AuthorChanges, AuthorRecord, AuthorRecordChanges, NewAuthor};
pub use entry::{Entry, EntryInput};

fn require_non_empty(problems: &mut Vec<String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        problems.push(format!("{} must not be empty", field));
    }
}

// Slugs and usernames travel as a single path segment.
fn require_no_slash(problems: &mut Vec<String>, field: &str, value: &str) {
    if value.contains('/') {
        problems.push(format!("{} must not contain '/'", field));
    }
}
