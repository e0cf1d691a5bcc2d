//! Freshen Core Library
//!
//! Domain models, error types, configuration and user-facing notices shared
//! by the storage, API client and profile crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod notice;

// Re-export commonly used types
pub use config::ProfileConfig;
pub use error::{ErrorMetadata, LogLevel, ProfileError};
pub use models::{
    ApplicationStatus, MediaSelection, PickOptions, Session, UploadOutcome, UserRecord,
};
pub use notice::{Locale, Notice};
