use crate::capability::ResourceLoader;
use crate::state::BusyFlag;
use freshen_api_client::api::update_images_url;
use freshen_api_client::{ApiClient, Auth};
use freshen_core::constants::UPLOAD_TIMEOUT;
use freshen_core::{MediaSelection, UploadOutcome};
use std::sync::Arc;
use std::time::Duration;

/// Sends one selection to the `update_images` endpoint and classifies the
/// result. One attempt per call: no retry, no cancellation.
#[derive(Clone)]
pub struct Uploader {
    loader: Arc<dyn ResourceLoader>,
    timeout: Duration,
    busy: BusyFlag,
}

impl Uploader {
    pub fn new(loader: Arc<dyn ResourceLoader>) -> Self {
        Self {
            loader,
            timeout: UPLOAD_TIMEOUT,
            busy: BusyFlag::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn busy_flag(&self) -> &BusyFlag {
        &self.busy
    }

    /// The busy flag is raised on entry, before the picked resource is read,
    /// so it also covers that read and refuses a concurrent upload from the
    /// start. It is lowered on every return path before this returns.
    pub async fn upload(
        &self,
        selection: MediaSelection,
        endpoint_base: &str,
        user_id: &str,
        token: &str,
    ) -> UploadOutcome {
        let Some(_busy) = self.busy.try_begin() else {
            tracing::warn!(user_id = %user_id, "Upload refused: another upload is in flight");
            return UploadOutcome::Failure("An upload is already in progress".to_string());
        };

        let url = update_images_url(endpoint_base, user_id);
        let start = std::time::Instant::now();
        tracing::info!(
            url = %url,
            file_name = %selection.display_name,
            mime_type = %selection.mime_type,
            "Uploading profile image"
        );

        match self.send(&selection, endpoint_base, user_id, token).await {
            Ok(outcome) => {
                tracing::info!(
                    url = %url,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Profile image upload successful"
                );
                outcome
            }
            Err(reason) => {
                tracing::warn!(
                    url = %url,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    error = %reason,
                    "Profile image upload failed"
                );
                UploadOutcome::Failure(reason)
            }
        }
    }

    async fn send(
        &self,
        selection: &MediaSelection,
        endpoint_base: &str,
        user_id: &str,
        token: &str,
    ) -> Result<UploadOutcome, String> {
        let data = self
            .loader
            .load(&selection.source_handle)
            .await
            .map_err(|e| format!("Failed to read {}: {}", selection.source_handle, e))?;

        let client = ApiClient::new(
            endpoint_base.to_string(),
            Auth::Bearer(token.to_string()),
            self.timeout,
        )
        .map_err(|e| e.to_string())?;

        let record = client
            .update_images(
                user_id,
                &selection.display_name,
                &selection.mime_type,
                data,
            )
            .await
            .map_err(|e| e.to_string())?;

        Ok(UploadOutcome::Success(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::io;

    struct StaticLoader(Option<Vec<u8>>);

    #[async_trait]
    impl ResourceLoader for StaticLoader {
        async fn load(&self, _source_handle: &str) -> io::Result<Vec<u8>> {
            self.0
                .clone()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "gone"))
        }
    }

    fn selection() -> MediaSelection {
        MediaSelection::new("file://a.jpg", "image/jpeg", "a.jpg")
    }

    #[tokio::test]
    async fn unreadable_resource_is_a_failure_without_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let uploader = Uploader::new(Arc::new(StaticLoader(None)));
        let outcome = uploader
            .upload(selection(), &server.url(), "/users/42", "tok123")
            .await;

        mock.assert_async().await;
        assert!(matches!(outcome, UploadOutcome::Failure(reason) if reason.contains("gone")));
        assert!(!uploader.busy_flag().is_busy());
    }

    #[tokio::test]
    async fn refuses_while_busy() {
        let uploader = Uploader::new(Arc::new(StaticLoader(Some(b"x".to_vec()))));
        let _held = uploader.busy_flag().try_begin().unwrap();

        let outcome = uploader
            .upload(selection(), "http://127.0.0.1:9", "/users/42", "tok123")
            .await;
        assert!(matches!(outcome, UploadOutcome::Failure(_)));
        assert!(uploader.busy_flag().is_busy());
    }

    #[tokio::test]
    async fn success_clears_busy_flag() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/users/42/update_images")
            .with_status(201)
            .with_body(r#"{"@id":"/users/42","profileImagePath":"/img/42.jpg"}"#)
            .create_async()
            .await;

        let uploader = Uploader::new(Arc::new(StaticLoader(Some(b"x".to_vec()))));
        let outcome = uploader
            .upload(selection(), &server.url(), "/users/42", "tok123")
            .await;

        match outcome {
            UploadOutcome::Success(record) => {
                assert_eq!(record.profile_image_path(), Some("/img/42.jpg"))
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(!uploader.busy_flag().is_busy());
    }
}
