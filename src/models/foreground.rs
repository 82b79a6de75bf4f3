use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Last known owner of screen/input focus, updated on every
/// window-change notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForegroundState {
    pub current_app_id: String,
    pub last_observed_at: DateTime<Utc>,
}

impl ForegroundState {
    pub fn new(current_app_id: impl Into<String>, observed_at: DateTime<Utc>) -> Self {
        Self {
            current_app_id: current_app_id.into(),
            last_observed_at: observed_at,
        }
    }
}
