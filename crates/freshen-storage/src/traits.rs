//! Storage abstraction trait

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Durable string key-value store.
///
/// `set_item` either stores the whole value or fails; readers never observe
/// a partially written value.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Returns `None` when the key has never been written or was removed.
    async fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Removing a missing key is not an error.
    async fn remove_item(&self, key: &str) -> StorageResult<()>;
}

/// Keys are flat names: non-empty, no path separators, no traversal.
pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }
    if key.contains("..") || key.contains('/') || key.contains('\\') || key.starts_with('.') {
        return Err(StorageError::InvalidKey(format!(
            "Storage key contains invalid characters: {}",
            key
        )));
    }
    Ok(())
}
