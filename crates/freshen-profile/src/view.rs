//! Display data for the profile header, derived from the current record.

use freshen_core::{ApplicationStatus, Locale, UserRecord};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

const INITIALS_AVATAR_URL: &str = "https://ui-avatars.com/api?background=random&name=";
const PHONE_PREFIX: &str = "+225 ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    /// Uploaded image when present, otherwise a generated initials avatar.
    pub avatar_url: String,
    pub display_name: String,
    pub email: String,
    pub phone: String,
    /// Empty when the user has no application.
    pub status_label: String,
}

impl ProfileView {
    pub fn from_record(record: &UserRecord, api_url: &str, locale: Locale) -> Self {
        let first = record.first_name().unwrap_or_default();
        let last = record.last_name().unwrap_or_default();

        let avatar_url = match record.profile_image_path() {
            Some(path) if !path.is_empty() => format!("{}{}", api_url, path),
            _ => format!(
                "{}{}+{}",
                INITIALS_AVATAR_URL,
                utf8_percent_encode(first, NON_ALPHANUMERIC),
                utf8_percent_encode(last, NON_ALPHANUMERIC)
            ),
        };

        let phone = match record.phone() {
            Some(phone) if !phone.is_empty() => format!("{}{}", PHONE_PREFIX, phone),
            _ => String::new(),
        };

        Self {
            avatar_url,
            display_name: format!("{} {}", first, last).trim().to_string(),
            email: record.email().unwrap_or_default().to_string(),
            phone,
            status_label: record
                .application_status()
                .map(|status| status_label(&status, locale).to_string())
                .unwrap_or_default(),
        }
    }
}

/// Unknown statuses are shown as sent by the server.
pub fn status_label(status: &ApplicationStatus, locale: Locale) -> &str {
    match (status, locale) {
        (ApplicationStatus::Pending, Locale::Fr) => "Candidature en attente",
        (ApplicationStatus::Accepted, Locale::Fr) => "Candidature acceptée",
        (ApplicationStatus::Rejected, Locale::Fr) => "Candidature refusée",
        (ApplicationStatus::Pending, Locale::En) => "Application pending",
        (ApplicationStatus::Accepted, Locale::En) => "Application accepted",
        (ApplicationStatus::Rejected, Locale::En) => "Application rejected",
        (ApplicationStatus::Other(raw), _) => raw.as_str(),
    }
}
