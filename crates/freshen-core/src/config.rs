//! Configuration module
//!
//! Settings for the profile client: API base URL, upload timeout, local data
//! directory and notice locale. Values come from the environment (and a
//! `.env` file when present).

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{DEFAULT_API_URL, UPLOAD_TIMEOUT};
use crate::notice::Locale;

const DEFAULT_DATA_DIR: &str = ".freshen";

#[derive(Clone, Debug)]
pub struct ProfileConfig {
    /// Base URL the user IRI is appended to verbatim. A trailing slash is
    /// kept, so a base ending in `/` plus `/users/42` yields `//users/42`.
    pub api_url: String,
    pub upload_timeout: Duration,
    /// Directory backing the durable key-value store
    pub data_dir: PathBuf,
    pub locale: Locale,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            upload_timeout: UPLOAD_TIMEOUT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            locale: Locale::default(),
        }
    }
}

impl ProfileConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("FRESHEN_API_URL")
            .or_else(|| lookup("API_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let upload_timeout = match lookup("FRESHEN_UPLOAD_TIMEOUT_MS") {
            Some(raw) => Duration::from_millis(raw.trim().parse().map_err(|_| {
                anyhow::anyhow!("FRESHEN_UPLOAD_TIMEOUT_MS must be a valid number")
            })?),
            None => UPLOAD_TIMEOUT,
        };

        let data_dir = lookup("FRESHEN_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let locale = match lookup("FRESHEN_LOCALE") {
            Some(raw) => raw.parse()?,
            None => Locale::default(),
        };

        Ok(Self {
            api_url,
            upload_timeout,
            data_dir,
            locale,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.api_url.trim().is_empty() {
            return Err(anyhow::anyhow!("FRESHEN_API_URL must not be empty"));
        }

        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "FRESHEN_API_URL must be an http:// or https:// URL"
            ));
        }

        if self.upload_timeout.is_zero() {
            return Err(anyhow::anyhow!(
                "FRESHEN_UPLOAD_TIMEOUT_MS must be greater than zero"
            ));
        }

        Ok(())
    }
}
