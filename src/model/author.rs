//! Authors.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::model::{require_no_slash, require_non_empty};

/// A stored author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Author {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Argon2id PHC string, never exposed in JSON.
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Request body for creating an author.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAuthor {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request body for updating an author. The username comes from the path.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorChanges {
    pub email: String,
    pub password: String,
}

/// What the store receives on create: the password is already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRecord {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// What the store receives on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRecordChanges {
    pub email: String,
    pub password_hash: String,
}

fn check_email(problems: &mut Vec<String>, email: &str) {
    require_non_empty(problems, "email", email);
    if !email.trim().is_empty() && !email.contains('@') {
        problems.push("email must contain '@'".to_string());
    }
}

impl NewAuthor {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();
        require_non_empty(&mut problems, "username", &self.username);
        require_no_slash(&mut problems, "username", &self.username);
        check_email(&mut problems, &self.email);
        require_non_empty(&mut problems, "password", &self.password);

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}

impl AuthorChanges {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();
        check_email(&mut problems, &self.email);
        require_non_empty(&mut problems, "password", &self.password);

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_not_serialized() {
        let author = Author {
            id: 7,
            username: "ironhide".into(),
            email: "ironhide@autobots.com".into(),
            password_hash: "$argon2id$secret".into(),
        };
        let json = serde_json::to_value(&author).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 7, "username": "ironhide", "email": "ironhide@autobots.com"})
        );
    }

    #[test]
    fn test_new_author_validation() {
        let ok = NewAuthor {
            username: "bumblebee".into(),
            email: "bumblebee@autobots.com".into(),
            password: "1235".into(),
        };
        assert!(ok.validate().is_ok());

        let bad = NewAuthor {
            username: "hot/rod".into(),
            email: "hot.rod".into(),
            password: "".into(),
        };
        assert_eq!(
            bad.validate().unwrap_err(),
            vec![
                "username must not contain '/'",
                "email must contain '@'",
                "password must not be empty",
            ]
        );
    }

    #[test]
    fn test_changes_ignore_username_in_body() {
        let changes: AuthorChanges = serde_json::from_str(
            r#"{"username":"ignored","email":"a@b.c","password":"pw"}"#,
        )
        .unwrap();
        assert_eq!(changes.email, "a@b.c");
        assert!(changes.validate().is_ok());
    }
}
