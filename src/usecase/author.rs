use std::sync::Arc;

use async_trait::async_trait;

use crate::model::{Author, AuthorChanges, AuthorRecord, AuthorRecordChanges, NewAuthor};
use crate::store::{AuthorRepository, StoreResult};
use crate::usecase::credentials::hash_password_blocking;
use crate::usecase::AuthorUseCase;

/// Forwards author operations to the repository, hashing passwords on the way in.
#[derive(Clone)]
pub struct AuthorService {
    repo: Arc<dyn AuthorRepository>,
}

impl AuthorService {
    pub fn new(repo: Arc<dyn AuthorRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl AuthorUseCase for AuthorService {
    async fn list_authors(&self) -> StoreResult<Vec<Author>> {
        self.repo.list().await
    }

    async fn author_by_username(&self, username: &str) -> StoreResult<Author> {
        self.repo.get_by_username(username).await
    }

    async fn author_by_email(&self, email: &str) -> StoreResult<Author> {
        self.repo.get_by_email(email).await
    }

    async fn create_author(&self, author: NewAuthor) -> StoreResult<Author> {
        let password_hash = hash_password_blocking(author.password).await?;
        self.repo
            .create(AuthorRecord {
                username: author.username,
                email: author.email,
                password_hash,
            })
            .await
    }

    async fn update_author(&self, username: &str, changes: AuthorChanges) -> StoreResult<Author> {
        let password_hash = hash_password_blocking(changes.password).await?;
        self.repo
            .update(
                username,
                AuthorRecordChanges {
                    email: changes.email,
                    password_hash,
                },
            )
            .await
    }

    async fn delete_author(&self, username: &str) -> StoreResult<Author> {
        self.repo.delete(username).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::usecase::credentials::verify_password;

    fn service() -> (AuthorService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (AuthorService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_create_stores_hash_not_plaintext() {
        let (service, store) = service();
        let created = service
            .create_author(NewAuthor {
                username: "bumblebee".into(),
                email: "bumblebee@autobots.com".into(),
                password: "1235".into(),
            })
            .await
            .unwrap();

        let stored = store.get_by_username("bumblebee").await.unwrap();
        assert_eq!(stored.id, created.id);
        assert_ne!(stored.password_hash, "1235");
        assert!(verify_password("1235", &stored.password_hash));
    }

    #[tokio::test]
    async fn test_update_rehashes_password() {
        let (service, store) = service();
        service
            .create_author(NewAuthor {
                username: "optimus".into(),
                email: "optimus.prime@autobots.com".into(),
                password: "2345".into(),
            })
            .await
            .unwrap();

        let updated = service
            .update_author(
                "optimus",
                AuthorChanges {
                    email: "prime@autobots.com".into(),
                    password: "roll-out".into(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.email, "prime@autobots.com");
        let stored = store.get_by_username("optimus").await.unwrap();
        assert!(verify_password("roll-out", &stored.password_hash));
        assert!(!verify_password("2345", &stored.password_hash));
    }
}
