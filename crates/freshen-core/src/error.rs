//! Error types module
//!
//! All failures of the profile image workflow are unified under
//! `ProfileError`. `Cancelled` picks are not errors and never appear here.

use crate::notice::Notice;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected outcomes like a refused permission
    Debug,
    /// Warning level - for recoverable issues like a failed upload
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata describing how an error is presented to the user and the logs.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "STORAGE_WRITE_FAILURE")
    fn error_code(&self) -> &'static str;

    /// Notice shown to the user, if any
    fn notice(&self) -> Option<Notice>;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Media library permission denied")]
    PermissionDenied,

    #[error("Upload failed: {0}")]
    NetworkOrServerFailure(String),

    #[error("Failed to persist user record: {0}")]
    StorageWriteFailure(String),

    #[error("No signed-in user")]
    MissingUser,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ProfileError {
    fn from(err: serde_json::Error) -> Self {
        ProfileError::InvalidInput(format!("JSON error: {}", err))
    }
}

impl ErrorMetadata for ProfileError {
    fn error_code(&self) -> &'static str {
        match self {
            ProfileError::PermissionDenied => "PERMISSION_DENIED",
            ProfileError::NetworkOrServerFailure(_) => "NETWORK_OR_SERVER_FAILURE",
            ProfileError::StorageWriteFailure(_) => "STORAGE_WRITE_FAILURE",
            ProfileError::MissingUser => "MISSING_USER",
            ProfileError::InvalidInput(_) => "INVALID_INPUT",
            ProfileError::Config(_) => "CONFIG_ERROR",
        }
    }

    fn notice(&self) -> Option<Notice> {
        match self {
            ProfileError::PermissionDenied => Some(Notice::PermissionDenied),
            ProfileError::NetworkOrServerFailure(_)
            | ProfileError::StorageWriteFailure(_)
            | ProfileError::MissingUser
            | ProfileError::InvalidInput(_) => Some(Notice::UploadFailed),
            ProfileError::Config(_) => None,
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            ProfileError::PermissionDenied => LogLevel::Debug,
            ProfileError::NetworkOrServerFailure(_) | ProfileError::InvalidInput(_) => {
                LogLevel::Warn
            }
            ProfileError::StorageWriteFailure(_)
            | ProfileError::MissingUser
            | ProfileError::Config(_) => LogLevel::Error,
        }
    }
}
