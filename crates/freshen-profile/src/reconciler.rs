use crate::notice::{report, NoticeSink};
use crate::state::UserStore;
use freshen_core::constants::USER_STORAGE_KEY;
use freshen_core::{ProfileError, UploadOutcome, UserRecord};
use freshen_storage::KeyValueStore;
use std::sync::Arc;

/// Applies an upload outcome to durable storage and the shared user state.
#[derive(Clone)]
pub struct Reconciler {
    store: Arc<dyn KeyValueStore>,
    users: UserStore,
    notices: Arc<dyn NoticeSink>,
}

impl Reconciler {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        users: UserStore,
        notices: Arc<dyn NoticeSink>,
    ) -> Self {
        Self {
            store,
            users,
            notices,
        }
    }

    /// On success the record is written under `user` first and published
    /// only once the write has succeeded. Any failure shows the generic
    /// upload notice once and leaves both storage and state untouched.
    pub async fn reconcile(&self, outcome: UploadOutcome) -> Result<UserRecord, ProfileError> {
        let result = match outcome {
            UploadOutcome::Success(record) => self.apply(record).await,
            UploadOutcome::Failure(reason) => Err(ProfileError::NetworkOrServerFailure(reason)),
        };

        if let Err(err) = &result {
            report(self.notices.as_ref(), err, "Profile image update not applied");
        }
        result
    }

    async fn apply(&self, record: UserRecord) -> Result<UserRecord, ProfileError> {
        let serialized = record
            .to_json()
            .map_err(|e| ProfileError::StorageWriteFailure(e.to_string()))?;

        self.store
            .set_item(USER_STORAGE_KEY, &serialized)
            .await
            .map_err(|e| ProfileError::StorageWriteFailure(e.to_string()))?;

        self.users.replace(record.clone());
        tracing::info!(
            user_id = record.id().unwrap_or("-"),
            "User record updated"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use freshen_core::Notice;
    use freshen_storage::{MemoryKeyValueStore, StorageError, StorageResult};
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNotices(Mutex<Vec<Notice>>);

    impl NoticeSink for RecordingNotices {
        fn show(&self, notice: Notice) {
            self.0.lock().unwrap().push(notice);
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn set_item(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::WriteFailed("disk full".into()))
        }

        async fn get_item(&self, _key: &str) -> StorageResult<Option<String>> {
            Ok(None)
        }

        async fn remove_item(&self, _key: &str) -> StorageResult<()> {
            Ok(())
        }
    }

    fn previous() -> UserRecord {
        serde_json::from_value(json!({ "@id": "/users/42", "firstName": "Old" })).unwrap()
    }

    fn updated() -> UserRecord {
        serde_json::from_value(json!({
            "@id": "/users/42",
            "firstName": "Ama",
            "phone": null,
            "profileImagePath": "/img/42.jpg"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn success_persists_then_publishes() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let users = UserStore::with_user(previous());
        let notices = Arc::new(RecordingNotices::default());
        let reconciler = Reconciler::new(store.clone(), users.clone(), notices.clone());

        let record = reconciler
            .reconcile(UploadOutcome::Success(updated()))
            .await
            .unwrap();

        assert_eq!(record, updated());
        assert_eq!(*users.current().unwrap(), updated());
        let stored = store.get_item(USER_STORAGE_KEY).await.unwrap().unwrap();
        assert_eq!(UserRecord::from_json(&stored).unwrap(), updated());
        assert!(notices.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failure_leaves_state_untouched() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let users = UserStore::with_user(previous());
        let notices = Arc::new(RecordingNotices::default());
        let reconciler = Reconciler::new(store.clone(), users.clone(), notices.clone());

        let err = reconciler
            .reconcile(UploadOutcome::Failure("HTTP 500".into()))
            .await
            .unwrap_err();

        assert!(matches!(err, ProfileError::NetworkOrServerFailure(_)));
        assert_eq!(*users.current().unwrap(), previous());
        assert_eq!(store.get_item(USER_STORAGE_KEY).await.unwrap(), None);
        assert_eq!(*notices.0.lock().unwrap(), vec![Notice::UploadFailed]);
    }

    #[tokio::test]
    async fn storage_fault_blocks_publish() {
        let users = UserStore::with_user(previous());
        let notices = Arc::new(RecordingNotices::default());
        let reconciler = Reconciler::new(Arc::new(BrokenStore), users.clone(), notices.clone());

        let err = reconciler
            .reconcile(UploadOutcome::Success(updated()))
            .await
            .unwrap_err();

        assert!(matches!(err, ProfileError::StorageWriteFailure(_)));
        assert_eq!(*users.current().unwrap(), previous());
        assert_eq!(*notices.0.lock().unwrap(), vec![Notice::UploadFailed]);
    }

    #[tokio::test]
    async fn reconciling_twice_is_idempotent() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let users = UserStore::with_user(previous());
        let notices = Arc::new(RecordingNotices::default());
        let reconciler = Reconciler::new(store.clone(), users.clone(), notices);

        let outcome = UploadOutcome::Success(updated());
        reconciler.reconcile(outcome.clone()).await.unwrap();
        let once_state = users.current().unwrap();
        let once_stored = store.get_item(USER_STORAGE_KEY).await.unwrap();

        reconciler.reconcile(outcome).await.unwrap();
        assert_eq!(users.current().unwrap(), once_state);
        assert_eq!(store.get_item(USER_STORAGE_KEY).await.unwrap(), once_stored);
    }
}
