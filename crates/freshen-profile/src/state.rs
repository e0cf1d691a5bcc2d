//! Shared state observed by the UI: the current user and the busy flag.

use freshen_core::UserRecord;
use std::sync::Arc;
use tokio::sync::watch;

/// Container for the signed-in user's record.
///
/// `replace` is the only mutation. Subscribers are notified on every
/// replace and always observe a whole record.
#[derive(Clone, Debug)]
pub struct UserStore {
    tx: Arc<watch::Sender<Option<Arc<UserRecord>>>>,
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    pub fn with_user(record: UserRecord) -> Self {
        let store = Self::new();
        store.replace(record);
        store
    }

    pub fn current(&self) -> Option<Arc<UserRecord>> {
        self.tx.borrow().clone()
    }

    /// Swap in `record` wholesale and notify subscribers.
    pub fn replace(&self, record: UserRecord) {
        self.tx.send_replace(Some(Arc::new(record)));
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<UserRecord>>> {
        self.tx.subscribe()
    }
}

/// Advisory flag raised while an upload is in flight.
#[derive(Clone, Debug)]
pub struct BusyFlag {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for BusyFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl BusyFlag {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn is_busy(&self) -> bool {
        *self.tx.borrow()
    }

    /// Raise the flag unless it is already raised. The flag drops back when
    /// the returned guard is dropped.
    pub fn try_begin(&self) -> Option<BusyGuard> {
        let raised = self.tx.send_if_modified(|busy| {
            if *busy {
                false
            } else {
                *busy = true;
                true
            }
        });
        raised.then(|| BusyGuard {
            tx: Arc::clone(&self.tx),
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

#[derive(Debug)]
pub struct BusyGuard {
    tx: Arc<watch::Sender<bool>>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.tx.send_replace(false);
    }
}
