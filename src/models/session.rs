use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    Idle,
    Running,
    Stopped,
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Idle
    }
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "Idle",
            SessionState::Running => "Running",
            SessionState::Stopped => "Stopped",
        }
    }
}

/// Terminal outcome of a session, handed to the observability sink.
/// A session only completes when it reaches its natural duration; every
/// other exit carries a reason string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SessionOutcome {
    Completed,
    Failed { reason: String },
}

impl SessionOutcome {
    pub fn failed(reason: impl Into<String>) -> Self {
        SessionOutcome::Failed {
            reason: reason.into(),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, SessionOutcome::Completed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub target_app_id: String,
    pub state: SessionState,
    pub started_at: DateTime<Utc>,
    pub touch_count: u64,
}

impl Session {
    /// A freshly created session starts Idle; the engine moves it to
    /// Running once the target app is in the foreground.
    pub fn new(id: String, target_app_id: String, started_at: DateTime<Utc>) -> Self {
        Self {
            id,
            target_app_id,
            state: SessionState::Idle,
            started_at,
            touch_count: 0,
        }
    }
}
