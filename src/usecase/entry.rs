use std::sync::Arc;

use async_trait::async_trait;

use crate::model::{Entry, EntryInput};
use crate::store::{EntryRepository, StoreResult};
use crate::usecase::EntryUseCase;

/// Forwards every entry operation to the repository unchanged.
#[derive(Clone)]
pub struct EntryService {
    repo: Arc<dyn EntryRepository>,
}

impl EntryService {
    pub fn new(repo: Arc<dyn EntryRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl EntryUseCase for EntryService {
    async fn list_entries(&self) -> StoreResult<Vec<Entry>> {
        self.repo.list().await
    }

    async fn entry_by_id(&self, id: i64) -> StoreResult<Entry> {
        self.repo.get_by_id(id).await
    }

    async fn entry_by_slug(&self, slug: &str) -> StoreResult<Entry> {
        self.repo.get_by_slug(slug).await
    }

    async fn create_entry(&self, input: EntryInput) -> StoreResult<Entry> {
        self.repo.create(input).await
    }

    async fn update_entry(&self, id: i64, input: EntryInput) -> StoreResult<Entry> {
        self.repo.update(id, input).await
    }

    async fn delete_entry(&self, id: i64) -> StoreResult<Entry> {
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;
    use chrono::Utc;
    use std::sync::Mutex;

    /// Records the last call and replays a canned result.
    struct RecordingRepo {
        calls: Mutex<Vec<String>>,
        result: StoreResult<Entry>,
    }

    impl RecordingRepo {
        fn returning(result: StoreResult<Entry>) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                result,
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) -> StoreResult<Entry> {
            self.calls.lock().unwrap().push(call);
            self.result.clone()
        }
    }

    #[async_trait]
    impl EntryRepository for RecordingRepo {
        async fn list(&self) -> StoreResult<Vec<Entry>> {
            self.record("list".into()).map(|e| vec![e])
        }
        async fn get_by_id(&self, id: i64) -> StoreResult<Entry> {
            self.record(format!("get_by_id {id}"))
        }
        async fn get_by_slug(&self, slug: &str) -> StoreResult<Entry> {
            self.record(format!("get_by_slug {slug}"))
        }
        async fn create(&self, input: EntryInput) -> StoreResult<Entry> {
            self.record(format!("create {}", input.slug))
        }
        async fn update(&self, id: i64, input: EntryInput) -> StoreResult<Entry> {
            self.record(format!("update {id} {}", input.slug))
        }
        async fn delete(&self, id: i64) -> StoreResult<Entry> {
            self.record(format!("delete {id}"))
        }
    }

    fn entry() -> Entry {
        Entry {
            id: 1,
            title: "Test".into(),
            slug: "test".into(),
            body: "Body".into(),
            author: "author".into(),
            created_at: Utc::now(),
        }
    }

    fn input() -> EntryInput {
        EntryInput {
            title: "Test".into(),
            slug: "test".into(),
            body: "Body".into(),
            author: "author".into(),
        }
    }

    #[tokio::test]
    async fn test_forwards_each_operation() {
        let repo = RecordingRepo::returning(Ok(entry()));
        let service = EntryService::new(repo.clone());

        assert_eq!(service.list_entries().await.unwrap().len(), 1);
        service.entry_by_id(1).await.unwrap();
        service.entry_by_slug("test").await.unwrap();
        service.create_entry(input()).await.unwrap();
        service.update_entry(1, input()).await.unwrap();
        service.delete_entry(1).await.unwrap();

        assert_eq!(
            repo.calls(),
            vec![
                "list",
                "get_by_id 1",
                "get_by_slug test",
                "create test",
                "update 1 test",
                "delete 1",
            ]
        );
    }

    #[tokio::test]
    async fn test_errors_pass_through_unchanged() {
        let repo = RecordingRepo::returning(Err(StoreError::Unavailable("connection refused".into())));
        let service = EntryService::new(repo);

        assert_eq!(
            service.entry_by_id(999).await,
            Err(StoreError::Unavailable("connection refused".into()))
        );
    }
}
