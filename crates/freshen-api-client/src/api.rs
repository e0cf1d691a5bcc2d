//! Domain methods for the Freshen API client.

use crate::{ApiClient, ApiError};
use freshen_core::constants::{PROFILE_IMAGE_FIELD, UPDATE_IMAGES_SUFFIX};
use freshen_core::UserRecord;

/// Endpoint for replacing a user's images: `base + user_id + "/update_images"`.
///
/// `user_id` is the user IRI (e.g. `/users/42`); nothing is normalized.
pub fn update_images_url(base: &str, user_id: &str) -> String {
    format!("{}{}{}", base, user_id, UPDATE_IMAGES_SUFFIX)
}

impl ApiClient {
    /// Upload a new profile image for `user_id` and return the updated user.
    pub async fn update_images(
        &self,
        user_id: &str,
        file_name: &str,
        mime_type: &str,
        data: Vec<u8>,
    ) -> Result<UserRecord, ApiError> {
        let part = reqwest::multipart::Part::bytes(data)
            .file_name(file_name.to_string())
            .mime_str(mime_type)
            .map_err(|e| ApiError::InvalidRequest(format!("Invalid MIME type {}: {}", mime_type, e)))?;

        let form = reqwest::multipart::Form::new().part(PROFILE_IMAGE_FIELD, part);

        tracing::debug!(
            user_id = %user_id,
            file_name = %file_name,
            mime_type = %mime_type,
            "Posting profile image"
        );

        self.post_multipart(&format!("{}{}", user_id, UPDATE_IMAGES_SUFFIX), form)
            .await
    }
}
