#![allow(dead_code)]

use async_trait::async_trait;
use freshen_core::{Notice, PickOptions, Session, UserRecord};
use freshen_profile::{
    BusyFlag, MediaLibrary, NoticeSink, PermissionStatus, PickResult, PickedAsset,
    ProfileImageUpdater, Reconciler, ResourceLoader, Selector, Uploader, UserStore,
};
use freshen_storage::{KeyValueStore, MemoryKeyValueStore};
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

pub const TOKEN: &str = "tok123";
pub const USER_ID: &str = "/users/42";

/// Media library fake with a scripted answer and optional gate.
pub struct FakeLibrary {
    pub permission: PermissionStatus,
    pub pick: PickResult,
    pub permission_prompts: AtomicUsize,
    pub picks: AtomicUsize,
    /// Busy flag value seen while the picker was open.
    pub busy_at_pick: Mutex<Option<bool>>,
    pub busy: Mutex<Option<BusyFlag>>,
    pub gate: Option<Arc<Notify>>,
}

impl FakeLibrary {
    pub fn new(permission: PermissionStatus, pick: PickResult) -> Self {
        Self {
            permission,
            pick,
            permission_prompts: AtomicUsize::new(0),
            picks: AtomicUsize::new(0),
            busy_at_pick: Mutex::new(None),
            busy: Mutex::new(None),
            gate: None,
        }
    }

    pub fn granted(uri: &str, mime: &str, name: &str) -> Self {
        Self::new(
            PermissionStatus::Granted,
            PickResult::Picked(PickedAsset {
                uri: uri.to_string(),
                mime_type: Some(mime.to_string()),
                file_name: Some(name.to_string()),
            }),
        )
    }

    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }
}

#[async_trait]
impl MediaLibrary for FakeLibrary {
    async fn request_permission(&self) -> PermissionStatus {
        self.permission_prompts.fetch_add(1, Ordering::SeqCst);
        self.permission
    }

    async fn pick_image(&self, _options: PickOptions) -> PickResult {
        self.picks.fetch_add(1, Ordering::SeqCst);
        if let Some(flag) = self.busy.lock().unwrap().as_ref() {
            *self.busy_at_pick.lock().unwrap() = Some(flag.is_busy());
        }
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.pick.clone()
    }
}

/// Serves fixed bytes and records whether the busy flag was up while loading.
pub struct MemoryLoader {
    pub bytes: Vec<u8>,
    pub busy: Mutex<Option<BusyFlag>>,
    pub busy_at_load: AtomicBool,
}

impl MemoryLoader {
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
            busy: Mutex::new(None),
            busy_at_load: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl ResourceLoader for MemoryLoader {
    async fn load(&self, _source_handle: &str) -> io::Result<Vec<u8>> {
        if let Some(flag) = self.busy.lock().unwrap().as_ref() {
            self.busy_at_load.store(flag.is_busy(), Ordering::SeqCst);
        }
        Ok(self.bytes.clone())
    }
}

#[derive(Default)]
pub struct RecordingNotices(pub Mutex<Vec<Notice>>);

impl RecordingNotices {
    pub fn shown(&self) -> Vec<Notice> {
        self.0.lock().unwrap().clone()
    }
}

impl NoticeSink for RecordingNotices {
    fn show(&self, notice: Notice) {
        self.0.lock().unwrap().push(notice);
    }
}

pub fn signed_in_user() -> UserRecord {
    serde_json::from_value(serde_json::json!({
        "@id": USER_ID,
        "firstName": "Old",
        "lastName": "Name",
        "email": "ama@example.com"
    }))
    .unwrap()
}

pub fn session() -> Session {
    Session::new(TOKEN)
}

pub struct Harness {
    pub updater: Arc<ProfileImageUpdater>,
    pub library: Arc<FakeLibrary>,
    pub loader: Arc<MemoryLoader>,
    pub store: Arc<MemoryKeyValueStore>,
    pub users: UserStore,
    pub notices: Arc<RecordingNotices>,
}

impl Harness {
    pub fn new(library: FakeLibrary, endpoint_base: &str) -> Self {
        Self::with_timeout(library, endpoint_base, Duration::from_secs(5))
    }

    pub fn with_timeout(library: FakeLibrary, endpoint_base: &str, timeout: Duration) -> Self {
        let library = Arc::new(library);
        let loader = Arc::new(MemoryLoader::new(b"fakejpegbytes"));
        let store = Arc::new(MemoryKeyValueStore::new());
        let users = UserStore::with_user(signed_in_user());
        let notices = Arc::new(RecordingNotices::default());

        let uploader = Uploader::new(loader.clone()).with_timeout(timeout);
        *library.busy.lock().unwrap() = Some(uploader.busy_flag().clone());
        *loader.busy.lock().unwrap() = Some(uploader.busy_flag().clone());

        let reconciler = Reconciler::new(store.clone(), users.clone(), notices.clone());
        let updater = ProfileImageUpdater::new(
            Selector::new(library.clone()),
            uploader,
            reconciler,
            users.clone(),
            notices.clone(),
            endpoint_base,
        );

        Self {
            updater: Arc::new(updater),
            library,
            loader,
            store,
            users,
            notices,
        }
    }

    pub async fn stored_user(&self) -> Option<String> {
        self.store.get_item("user").await.unwrap()
    }
}

/// Accepts connections and never answers them.
pub async fn silent_server() -> (String, tokio::task::JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    (format!("http://{}", addr), handle)
}
