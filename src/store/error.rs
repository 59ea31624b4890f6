//! Closed error taxonomy for the persistence boundary.

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Errors returned by repositories and use-cases.
///
/// The string payloads carry internal detail for logs. They are not meant
/// for clients; the HTTP layer describes failures by kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No row matched the lookup key.
    #[error("record not found")]
    NotFound,

    /// A unique constraint (slug, username, email) was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The store rejected the values (null, check or data exception).
    #[error("invalid data: {0}")]
    Invalid(String),

    /// Connectivity, pool exhaustion, or any other store failure.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A failure inside the service itself, such as password hashing.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for repository and use-case operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db) => {
                let detail = db.message().to_string();
                match db.kind() {
                    ErrorKind::UniqueViolation => StoreError::Conflict(detail),
                    ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
                    | ErrorKind::ForeignKeyViolation => StoreError::Invalid(detail),
                    // SQLSTATE class 22: data exception (value too long, bad encoding, ...)
                    _ if db.code().is_some_and(|c| c.starts_with("22")) => StoreError::Invalid(detail),
                    _ => StoreError::Unavailable(err.to_string()),
                }
            }
            _ => StoreError::Unavailable(err.to_string()),
        }
    }
}
