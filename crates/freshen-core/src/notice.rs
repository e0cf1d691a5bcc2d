//! User-visible notices raised by the profile workflow.

use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Fr,
    En,
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fr" | "fr-fr" | "fr-ci" => Ok(Locale::Fr),
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            _ => Err(anyhow::anyhow!("Unsupported locale: {}", s)),
        }
    }
}

/// The two fixed alerts of the profile image workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    PermissionDenied,
    UploadFailed,
}

impl Notice {
    pub fn title(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Notice::PermissionDenied, Locale::Fr) => "Permission refusée",
            (Notice::PermissionDenied, Locale::En) => "Permission denied",
            (Notice::UploadFailed, Locale::Fr) => "Erreur",
            (Notice::UploadFailed, Locale::En) => "Error",
        }
    }

    pub fn message(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Notice::PermissionDenied, Locale::Fr) => {
                "Nous avons besoin de la permission pour accéder à votre galerie."
            }
            (Notice::PermissionDenied, Locale::En) => {
                "We need permission to access your photo library."
            }
            (Notice::UploadFailed, Locale::Fr) => {
                "Une erreur s'est produite lors de la mise à jour de votre photo de profil"
            }
            (Notice::UploadFailed, Locale::En) => {
                "An error occurred while updating your profile picture"
            }
        }
    }
}
