use crate::capability::{
    file_name_from_uri, guess_image_mime, MediaLibrary, PermissionStatus, PickResult, PickedAsset,
};
use freshen_core::{MediaSelection, PickOptions};
use std::sync::Arc;

const FALLBACK_MIME: &str = "image/jpeg";
const FALLBACK_FILE_NAME: &str = "profile.jpg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionResult {
    Selected(MediaSelection),
    /// The user closed the picker. Not an error.
    Cancelled,
    PermissionDenied,
}

/// Obtains one still image from the user, honoring the permission state.
#[derive(Clone)]
pub struct Selector {
    library: Arc<dyn MediaLibrary>,
    options: PickOptions,
}

impl Selector {
    pub fn new(library: Arc<dyn MediaLibrary>) -> Self {
        Self {
            library,
            options: PickOptions::profile_image(),
        }
    }

    pub async fn request_selection(&self) -> SelectionResult {
        if self.library.request_permission().await == PermissionStatus::Denied {
            tracing::debug!("Media library permission denied");
            return SelectionResult::PermissionDenied;
        }

        match self.library.pick_image(self.options).await {
            PickResult::Cancelled => {
                tracing::debug!("Image picker cancelled");
                SelectionResult::Cancelled
            }
            PickResult::Picked(asset) => SelectionResult::Selected(selection_from_asset(asset)),
        }
    }
}

/// Fills in a missing file name from the URI and a missing MIME type from the
/// file extension.
fn selection_from_asset(asset: PickedAsset) -> MediaSelection {
    let display_name = asset
        .file_name
        .filter(|name| !name.is_empty())
        .or_else(|| file_name_from_uri(&asset.uri))
        .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string());

    let mime_type = asset
        .mime_type
        .filter(|mime| !mime.is_empty())
        .or_else(|| guess_image_mime(&display_name).map(str::to_string))
        .unwrap_or_else(|| FALLBACK_MIME.to_string());

    MediaSelection::new(asset.uri, mime_type, display_name)
}
