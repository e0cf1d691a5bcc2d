use freshen_core::{ErrorMetadata, Locale, LogLevel, Notice, ProfileError};

/// Presents user-visible notices (alerts, toasts, stderr...).
pub trait NoticeSink: Send + Sync {
    fn show(&self, notice: Notice);
}

/// Notice sink for headless hosts: writes the localized notice to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNoticeSink {
    locale: Locale,
}

impl TracingNoticeSink {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }
}

impl NoticeSink for TracingNoticeSink {
    fn show(&self, notice: Notice) {
        tracing::warn!(
            title = notice.title(self.locale),
            "{}",
            notice.message(self.locale)
        );
    }
}

/// Log `err` at its own level and show its notice, if it has one.
pub(crate) fn report(notices: &dyn NoticeSink, err: &ProfileError, message: &str) {
    let code = err.error_code();
    match err.log_level() {
        LogLevel::Debug => tracing::debug!(code, error = %err, "{}", message),
        LogLevel::Warn => tracing::warn!(code, error = %err, "{}", message),
        LogLevel::Error => tracing::error!(code, error = %err, "{}", message),
    }
    if let Some(notice) = err.notice() {
        notices.show(notice);
    }
}
