use std::fmt;

/// Credentials of the signed-in user. Read-only for the profile workflow.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub bearer_token: String,
}

impl Session {
    pub fn new(bearer_token: impl Into<String>) -> Self {
        Self {
            bearer_token: bearer_token.into(),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("bearer_token", &"<redacted>")
            .finish()
    }
}
