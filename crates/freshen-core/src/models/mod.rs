pub mod media;
pub mod session;
pub mod user;

pub use media::{MediaSelection, PickOptions};
pub use session::Session;
pub use user::{ApplicationStatus, UploadOutcome, UserRecord};
