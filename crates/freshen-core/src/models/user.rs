use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Application (candidature) status attached to a user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
    /// Any status the client does not know yet, kept as sent.
    Other(String),
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Accepted => "ACCEPTED",
            ApplicationStatus::Rejected => "REJECTED",
            ApplicationStatus::Other(raw) => raw,
        }
    }
}

impl From<&str> for ApplicationStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "PENDING" => ApplicationStatus::Pending,
            "ACCEPTED" => ApplicationStatus::Accepted,
            "REJECTED" => ApplicationStatus::Rejected,
            other => ApplicationStatus::Other(other.to_string()),
        }
    }
}

/// User record as returned by the API.
///
/// The record is opaque: it holds the server's JSON object as-is (nulls and
/// unknown fields included) so it serializes back to exactly what was
/// received. Known fields are read through lenient accessors that return
/// `None` for absent, null or oddly shaped values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRecord {
    fields: Map<String, Value>,
}

impl UserRecord {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// IRI of the user resource (e.g. `/users/42`).
    pub fn id(&self) -> Option<&str> {
        self.str_field("@id")
    }

    pub fn first_name(&self) -> Option<&str> {
        self.str_field("firstName")
    }

    pub fn last_name(&self) -> Option<&str> {
        self.str_field("lastName")
    }

    pub fn email(&self) -> Option<&str> {
        self.str_field("email")
    }

    /// Phone numbers arrive either as strings or as bare numbers.
    pub fn phone(&self) -> Option<String> {
        match self.fields.get("phone")? {
            Value::String(phone) => Some(phone.clone()),
            Value::Number(phone) => Some(phone.to_string()),
            _ => None,
        }
    }

    pub fn profile_image_path(&self) -> Option<&str> {
        self.str_field("profileImagePath")
    }

    pub fn application_status(&self) -> Option<ApplicationStatus> {
        self.str_field("statutCandidature").map(ApplicationStatus::from)
    }
}

/// Result of one upload attempt. Consumed by reconciliation, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Success(UserRecord),
    /// Diagnostic reason; not meant to be shown to the user verbatim.
    Failure(String),
}
