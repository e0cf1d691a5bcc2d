//! Restoring and caching the signed-in user across launches.

use crate::state::UserStore;
use freshen_core::constants::{TOKEN_STORAGE_KEY, USER_STORAGE_KEY};
use freshen_core::{ProfileError, Session, UserRecord};
use freshen_storage::KeyValueStore;

#[derive(Debug, Default)]
pub struct RestoredSession {
    pub session: Option<Session>,
    pub user: Option<UserRecord>,
}

/// Load the cached token and user record, publishing the user if present.
///
/// An unreadable cached record is skipped (the user is treated as signed
/// out) rather than failing startup.
pub async fn restore_session(
    store: &dyn KeyValueStore,
    users: &UserStore,
) -> Result<RestoredSession, ProfileError> {
    let token = store
        .get_item(TOKEN_STORAGE_KEY)
        .await
        .map_err(|e| ProfileError::Config(e.to_string()))?;

    let raw_user = store
        .get_item(USER_STORAGE_KEY)
        .await
        .map_err(|e| ProfileError::Config(e.to_string()))?;

    let user = match raw_user.as_deref().map(UserRecord::from_json) {
        Some(Ok(user)) => {
            users.replace(user.clone());
            Some(user)
        }
        Some(Err(e)) => {
            tracing::warn!(error = %e, "Ignoring unreadable cached user record");
            None
        }
        None => None,
    };

    Ok(RestoredSession {
        session: token.filter(|t| !t.is_empty()).map(Session::new),
        user,
    })
}

/// Cache the result of a sign-in: token first, then the user, then publish.
pub async fn store_login(
    store: &dyn KeyValueStore,
    users: &UserStore,
    session: &Session,
    user: UserRecord,
) -> Result<(), ProfileError> {
    store
        .set_item(TOKEN_STORAGE_KEY, &session.bearer_token)
        .await
        .map_err(|e| ProfileError::StorageWriteFailure(e.to_string()))?;

    store
        .set_item(USER_STORAGE_KEY, &user.to_json()?)
        .await
        .map_err(|e| ProfileError::StorageWriteFailure(e.to_string()))?;

    users.replace(user);
    Ok(())
}
