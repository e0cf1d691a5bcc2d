use serde::{Deserialize, Serialize};

/// Local reference to a user-chosen image plus its metadata.
///
/// Produced by the picker and consumed once by the upload step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSelection {
    /// URI-like handle of the local resource (e.g. `file:///.../a.jpg`)
    pub source_handle: String,
    pub mime_type: String,
    pub display_name: String,
}

impl MediaSelection {
    pub fn new(
        source_handle: impl Into<String>,
        mime_type: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            source_handle: source_handle.into(),
            mime_type: mime_type.into(),
            display_name: display_name.into(),
        }
    }
}

/// Picker constraints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickOptions {
    /// Enforce a 1:1 crop
    pub crop_square: bool,
    /// Compression quality in `0.0..=1.0`
    pub quality: f32,
}

impl PickOptions {
    pub fn new(crop_square: bool, quality: f32) -> Self {
        Self {
            crop_square,
            quality: quality.clamp(0.0, 1.0),
        }
    }

    /// Square crop at full quality, as used for profile images.
    pub fn profile_image() -> Self {
        Self::new(true, 1.0)
    }
}

impl Default for PickOptions {
    fn default() -> Self {
        Self::profile_image()
    }
}
