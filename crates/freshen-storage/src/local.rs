use crate::traits::{validate_key, KeyValueStore, StorageError, StorageResult};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

const VALUE_EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "json.tmp";

/// Local filesystem store: one file per key under `base_path`.
#[derive(Clone, Debug)]
pub struct LocalKeyValueStore {
    base_path: PathBuf,
}

impl LocalKeyValueStore {
    /// Create a new store rooted at `base_path`, creating the directory if needed.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::WriteFailed(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalKeyValueStore { base_path })
    }

    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.base_path.join(format!("{}.{}", key, VALUE_EXTENSION)))
    }

    fn key_to_temp_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.{}", key, TEMP_EXTENSION))
    }
}

#[async_trait]
impl KeyValueStore for LocalKeyValueStore {
    /// Writes to a sibling temp file, syncs it, then renames over the target.
    async fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.key_to_path(key)?;
        let tmp = self.key_to_temp_path(key);
        let start = std::time::Instant::now();

        let mut file = fs::File::create(&tmp).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create file {}: {}", tmp.display(), e))
        })?;

        file.write_all(value.as_bytes()).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write file {}: {}", tmp.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", tmp.display(), e))
        })?;
        drop(file);

        if let Err(e) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(StorageError::WriteFailed(format!(
                "Failed to move {} into place: {}",
                path.display(),
                e
            )));
        }

        tracing::debug!(
            key = %key,
            size_bytes = value.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local store write successful"
        );

        Ok(())
    }

    async fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.key_to_path(key)?;

        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::ReadFailed(format!(
                "Failed to read file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn remove_item(&self, key: &str) -> StorageResult<()> {
        let path = self.key_to_path(key)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(key = %key, "Local store item removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::IoError(e)),
        }
    }
}
