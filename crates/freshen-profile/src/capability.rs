//! Device capabilities consumed by the workflow.
//!
//! Hosts implement these for the platform they run on; tests use fakes.

use async_trait::async_trait;
use freshen_core::PickOptions;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::io;
use std::path::Path;

/// Characters escaped in the path of a `file://` URI. `%` must be escaped so
/// the loader's decode yields the original name back.
const PATH_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Asset returned by a picker. Platforms do not always report a MIME type or
/// a file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedAsset {
    pub uri: String,
    pub mime_type: Option<String>,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickResult {
    Picked(PickedAsset),
    Cancelled,
}

/// Access to the device media library.
#[async_trait]
pub trait MediaLibrary: Send + Sync {
    /// Check and, if needed, request read access. May prompt the user.
    async fn request_permission(&self) -> PermissionStatus;

    /// Present a picker restricted to still images.
    async fn pick_image(&self, options: PickOptions) -> PickResult;
}

/// Resolves a picked resource handle to its bytes.
#[async_trait]
pub trait ResourceLoader: Send + Sync {
    async fn load(&self, source_handle: &str) -> io::Result<Vec<u8>>;
}

/// Reads `file://` URIs and bare paths from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileResourceLoader;

impl FileResourceLoader {
    pub fn resolve_path(source_handle: &str) -> io::Result<String> {
        let raw = match source_handle.split_once("://") {
            Some(("file", rest)) => rest,
            Some((scheme, _)) => {
                return Err(io::Error::new(
                    io::ErrorKind::Unsupported,
                    format!("Unsupported resource scheme: {}", scheme),
                ))
            }
            None => source_handle,
        };

        let path = percent_decode_str(raw)
            .decode_utf8()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        if path.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Empty resource path",
            ));
        }
        Ok(path.into_owned())
    }
}

#[async_trait]
impl ResourceLoader for FileResourceLoader {
    async fn load(&self, source_handle: &str) -> io::Result<Vec<u8>> {
        let path = Self::resolve_path(source_handle)?;
        tokio::fs::read(path).await
    }
}

/// `file://` URI for a local path, readable back by `FileResourceLoader`.
pub fn file_uri(path: &Path) -> String {
    format!(
        "file://{}",
        utf8_percent_encode(&path.to_string_lossy(), PATH_SET)
    )
}

/// MIME type for common still-image extensions.
pub fn guess_image_mime(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit_once('.')?.1.to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        _ => None,
    }
}

/// Last path segment of a URI, without query or fragment.
pub fn file_name_from_uri(uri: &str) -> Option<String> {
    let without_query = uri.split(['?', '#']).next().unwrap_or(uri);
    let name = without_query.rsplit('/').next()?;
    if name.is_empty() || name.contains(':') {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_guessing() {
        assert_eq!(guess_image_mime("a.JPG"), Some("image/jpeg"));
        assert_eq!(guess_image_mime("shot.png"), Some("image/png"));
        assert_eq!(guess_image_mime("notes.txt"), None);
        assert_eq!(guess_image_mime("noext"), None);
    }

    #[test]
    fn file_names_from_uris() {
        assert_eq!(
            file_name_from_uri("file:///data/cache/IMG_01.jpg").as_deref(),
            Some("IMG_01.jpg")
        );
        assert_eq!(
            file_name_from_uri("content://media/photo.png?x=1").as_deref(),
            Some("photo.png")
        );
        assert_eq!(file_name_from_uri("file:///data/"), None);
    }

    #[test]
    fn resolve_file_uris() {
        assert_eq!(
            FileResourceLoader::resolve_path("file:///tmp/my%20pic.jpg").unwrap(),
            "/tmp/my pic.jpg"
        );
        assert_eq!(
            FileResourceLoader::resolve_path("/tmp/a.jpg").unwrap(),
            "/tmp/a.jpg"
        );
        let err = FileResourceLoader::resolve_path("content://media/1").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
    }

    #[tokio::test]
    async fn loads_bytes_from_file_uri() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.jpg");
        std::fs::write(&path, b"jpeg").unwrap();

        let uri = file_uri(&path);
        let bytes = FileResourceLoader.load(&uri).await.unwrap();
        assert_eq!(bytes, b"jpeg");
    }

    #[test]
    fn file_uri_escapes_reserved_characters() {
        assert_eq!(
            file_uri(Path::new("/tmp/100%41 #1?.jpg")),
            "file:///tmp/100%2541%20%231%3F.jpg"
        );
        assert_eq!(
            FileResourceLoader::resolve_path(&file_uri(Path::new("/tmp/100%41.jpg"))).unwrap(),
            "/tmp/100%41.jpg"
        );
    }
}
