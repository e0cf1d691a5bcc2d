//! Profile Image Updater.
//!
//! Lets the signed-in user pick a square still image, uploads it to the
//! per-user `update_images` endpoint and, once the server confirms, persists
//! and publishes the returned user record.
//!
//! The flow is `Selector -> Uploader -> Reconciler`, driven by
//! [`ProfileImageUpdater`]. Device capabilities (permission, picker, reading
//! the picked resource) are injected through the traits in [`capability`].

pub mod capability;
pub mod notice;
pub mod reconciler;
pub mod selector;
pub mod session;
pub mod state;
pub mod uploader;
pub mod view;
pub mod workflow;

pub use capability::{
    FileResourceLoader, MediaLibrary, PermissionStatus, PickResult, PickedAsset, ResourceLoader,
};
pub use notice::{NoticeSink, TracingNoticeSink};
pub use reconciler::Reconciler;
pub use selector::{SelectionResult, Selector};
pub use session::{restore_session, store_login, RestoredSession};
pub use state::{BusyFlag, BusyGuard, UserStore};
pub use uploader::Uploader;
pub use view::ProfileView;
pub use workflow::{ProfileImageUpdater, WorkflowResult, WorkflowState};
