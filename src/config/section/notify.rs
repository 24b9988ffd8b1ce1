//! `[notify]` section configuration.

use serde::{Deserialize, Serialize};

/// Desktop build notification settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Notification title.
    pub title: String,
    /// Only notify on failures and on the first success after a failure.
    pub suppress_success: bool,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            title: "webpipe build".into(),
            suppress_success: true,
        }
    }
}
