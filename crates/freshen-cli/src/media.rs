//! Media library backed by a file given on the command line.

use async_trait::async_trait;
use freshen_core::PickOptions;
use freshen_profile::capability::{file_uri, guess_image_mime};
use freshen_profile::{MediaLibrary, PermissionStatus, PickResult, PickedAsset};
use std::path::{Path, PathBuf};

/// "Picks" the configured file. Permission is granted when the file is
/// readable; a missing file behaves like a refused library.
pub struct FileMediaLibrary {
    path: PathBuf,
}

impl FileMediaLibrary {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn asset(path: &Path) -> PickedAsset {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string);
        let mime_type = file_name
            .as_deref()
            .and_then(guess_image_mime)
            .map(str::to_string);

        PickedAsset {
            uri: file_uri(path),
            mime_type,
            file_name,
        }
    }
}

#[async_trait]
impl MediaLibrary for FileMediaLibrary {
    async fn request_permission(&self) -> PermissionStatus {
        match tokio::fs::metadata(&self.path).await {
            Ok(meta) if meta.is_file() => PermissionStatus::Granted,
            _ => PermissionStatus::Denied,
        }
    }

    async fn pick_image(&self, options: PickOptions) -> PickResult {
        if options.crop_square {
            tracing::debug!(path = %self.path.display(), "Square crop is left to the server");
        }
        match tokio::fs::canonicalize(&self.path).await {
            Ok(path) => PickResult::Picked(Self::asset(&path)),
            Err(e) => {
                tracing::debug!(error = %e, "Selected file vanished");
                PickResult::Cancelled
            }
        }
    }
}
