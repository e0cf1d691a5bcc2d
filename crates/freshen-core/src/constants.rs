use std::time::Duration;

/// Bound on a single profile image upload.
pub const UPLOAD_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Durable storage key holding the serialized current user.
pub const USER_STORAGE_KEY: &str = "user";

/// Durable storage key holding the bearer token of the signed-in user.
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Multipart field carrying the image file.
pub const PROFILE_IMAGE_FIELD: &str = "profileImageFile";

/// Path segment appended to the user IRI for the image update endpoint.
pub const UPDATE_IMAGES_SUFFIX: &str = "/update_images";

pub const DEFAULT_API_URL: &str = "https://admin.freshen-up.net";
