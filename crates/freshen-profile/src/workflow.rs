use crate::notice::{report, NoticeSink};
use crate::reconciler::Reconciler;
use crate::selector::{SelectionResult, Selector};
use crate::state::{BusyFlag, UserStore};
use crate::uploader::Uploader;
use freshen_core::{ProfileError, Session, UserRecord};
use std::sync::Arc;
use tokio::sync::watch;

/// Where a single invocation currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    Selecting,
    Uploading,
    Reconciling,
}

#[derive(Debug)]
pub enum WorkflowResult {
    Updated(UserRecord),
    Cancelled,
    PermissionDenied,
    /// A previous invocation is still running; nothing was done.
    Busy,
    Failed(ProfileError),
}

/// Drives `Selector -> Uploader -> Reconciler` for one user action.
///
/// No state survives an invocation except what the reconciler publishes.
/// While an invocation runs, further calls return [`WorkflowResult::Busy`]
/// so hosts can disable the trigger off [`ProfileImageUpdater::is_active`].
pub struct ProfileImageUpdater {
    selector: Selector,
    uploader: Uploader,
    reconciler: Reconciler,
    users: UserStore,
    notices: Arc<dyn NoticeSink>,
    endpoint_base: String,
    active: BusyFlag,
    state: Arc<watch::Sender<WorkflowState>>,
}

impl ProfileImageUpdater {
    pub fn new(
        selector: Selector,
        uploader: Uploader,
        reconciler: Reconciler,
        users: UserStore,
        notices: Arc<dyn NoticeSink>,
        endpoint_base: impl Into<String>,
    ) -> Self {
        let (state, _rx) = watch::channel(WorkflowState::Idle);
        Self {
            selector,
            uploader,
            reconciler,
            users,
            notices,
            endpoint_base: endpoint_base.into(),
            active: BusyFlag::new(),
            state: Arc::new(state),
        }
    }

    pub fn state(&self) -> WorkflowState {
        *self.state.borrow()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<WorkflowState> {
        self.state.subscribe()
    }

    /// Upload-in-flight flag.
    pub fn busy_flag(&self) -> &BusyFlag {
        self.uploader.busy_flag()
    }

    /// True while any invocation is between selection and reconciliation.
    pub fn is_active(&self) -> bool {
        self.active.is_busy()
    }

    pub async fn run(&self, session: &Session) -> WorkflowResult {
        let Some(_active) = self.active.try_begin() else {
            tracing::debug!("Profile image update already running");
            return WorkflowResult::Busy;
        };

        let result = self.run_steps(session).await;
        self.transition(WorkflowState::Idle);
        result
    }

    async fn run_steps(&self, session: &Session) -> WorkflowResult {
        let Some(user_id) = self.users.current().and_then(|user| user.id().map(str::to_string)) else {
            return self.fail(ProfileError::MissingUser);
        };

        self.transition(WorkflowState::Selecting);
        let selection = match self.selector.request_selection().await {
            SelectionResult::Selected(selection) => selection,
            SelectionResult::Cancelled => return WorkflowResult::Cancelled,
            SelectionResult::PermissionDenied => {
                report(
                    self.notices.as_ref(),
                    &ProfileError::PermissionDenied,
                    "Profile image update aborted",
                );
                return WorkflowResult::PermissionDenied;
            }
        };

        self.transition(WorkflowState::Uploading);
        let outcome = self
            .uploader
            .upload(
                selection,
                &self.endpoint_base,
                &user_id,
                &session.bearer_token,
            )
            .await;

        self.transition(WorkflowState::Reconciling);
        match self.reconciler.reconcile(outcome).await {
            Ok(record) => WorkflowResult::Updated(record),
            Err(err) => WorkflowResult::Failed(err),
        }
    }

    fn fail(&self, err: ProfileError) -> WorkflowResult {
        report(self.notices.as_ref(), &err, "Profile image update aborted");
        WorkflowResult::Failed(err)
    }

    fn transition(&self, next: WorkflowState) {
        let previous = self.state.send_replace(next);
        if previous != next {
            tracing::debug!(from = ?previous, to = ?next, "Profile workflow transition");
        }
    }
}
