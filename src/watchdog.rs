//! Foreground-ownership tracking: decides whether a window change means
//! the session lost its target app.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ForegroundState;

/// Platform/system surfaces whose appearance in the foreground does not
/// end a session (status bar, launcher, vendor overlays), matched by
/// package-id prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WatchdogConfig {
    pub ignore_prefixes: Vec<String>,
    /// Package id of the controlling application itself, also ignored.
    pub controller_app_id: Option<String>,
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            ignore_prefixes: vec![
                "android".to_string(),
                "com.android.systemui".to_string(),
                "com.android.launcher".to_string(),
                "com.google.android".to_string(),
                "com.sec.android".to_string(),
            ],
            controller_app_id: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchVerdict {
    /// Target still owns the foreground (or the change was an ignorable
    /// system surface).
    Retained,
    /// A different application took the foreground; the session must stop.
    Lost,
}

/// Tracks the current foreground owner for one session.
pub struct ForegroundWatch {
    target_app_id: String,
    ignore_prefixes: Vec<String>,
    state: Option<ForegroundState>,
}

impl ForegroundWatch {
    pub fn new(target_app_id: impl Into<String>, config: &WatchdogConfig) -> Self {
        let mut ignore_prefixes = config.ignore_prefixes.clone();
        if let Some(own_id) = &config.controller_app_id {
            ignore_prefixes.push(own_id.clone());
        }
        Self {
            target_app_id: target_app_id.into(),
            ignore_prefixes,
            state: None,
        }
    }

    /// Feed one window-change notification; returns whether the session
    /// may continue.
    pub fn observe(&mut self, app_id: &str, observed_at: DateTime<Utc>) -> WatchVerdict {
        self.state = Some(ForegroundState::new(app_id, observed_at));

        if app_id == self.target_app_id {
            return WatchVerdict::Retained;
        }
        if self
            .ignore_prefixes
            .iter()
            .any(|prefix| app_id.starts_with(prefix.as_str()))
        {
            return WatchVerdict::Retained;
        }
        WatchVerdict::Lost
    }

    pub fn state(&self) -> Option<&ForegroundState> {
        self.state.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn watch() -> ForegroundWatch {
        ForegroundWatch::new("com.example.app", &WatchdogConfig::default())
    }

    #[test]
    fn target_app_retains_the_session() {
        let mut watch = watch();
        assert_eq!(
            watch.observe("com.example.app", Utc::now()),
            WatchVerdict::Retained
        );
    }

    #[test]
    fn system_surfaces_are_ignored_by_prefix() {
        let mut watch = watch();
        for package in [
            "android",
            "com.android.systemui",
            "com.android.launcher3",
            "com.google.android.gms",
            "com.sec.android.app.launcher",
        ] {
            assert_eq!(
                watch.observe(package, Utc::now()),
                WatchVerdict::Retained,
                "package: {package}"
            );
        }
    }

    #[test]
    fn foreign_app_loses_the_session() {
        let mut watch = watch();
        assert_eq!(
            watch.observe("com.other.messenger", Utc::now()),
            WatchVerdict::Lost
        );
    }

    #[test]
    fn controller_app_id_is_appended_to_the_ignore_set() {
        let config = WatchdogConfig {
            controller_app_id: Some("com.harness.controller".to_string()),
            ..Default::default()
        };
        let mut watch = ForegroundWatch::new("com.example.app", &config);
        assert_eq!(
            watch.observe("com.harness.controller", Utc::now()),
            WatchVerdict::Retained
        );
    }

    #[test]
    fn every_observation_updates_the_foreground_state() {
        let mut watch = watch();
        let at = Utc::now();
        watch.observe("com.other.messenger", at);
        let state = watch.state().expect("state recorded");
        assert_eq!(state.current_app_id, "com.other.messenger");
        assert_eq!(state.last_observed_at, at);
    }
}
