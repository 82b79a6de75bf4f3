use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::policy::PolicyConfig;
use crate::safety::DenylistConfig;
use crate::scanner::ScannerConfig;
use crate::watchdog::WatchdogConfig;

/// All engine tunables in one serde tree. Hosts either use the defaults
/// or load a JSON file; unknown-at-file-time fields fall back per-section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// How long a session runs before ending naturally.
    pub session_duration_ms: u64,
    /// Random inter-action interval bounds.
    pub tick_min_ms: u64,
    pub tick_max_ms: u64,
    /// Chance of a rescan after a gesture completes successfully.
    pub rescan_probability: f64,
    /// Settle delay before that rescan runs.
    pub rescan_settle_ms: u64,
    /// Grace period between natural end and the home navigation.
    pub home_grace_ms: u64,
    pub scanner: ScannerConfig,
    pub policy: PolicyConfig,
    pub watchdog: WatchdogConfig,
    pub denylist: DenylistConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            session_duration_ms: 30_000,
            tick_min_ms: 3_000,
            tick_max_ms: 8_000,
            rescan_probability: 0.3,
            rescan_settle_ms: 500,
            home_grace_ms: 1_000,
            scanner: ScannerConfig::default(),
            policy: PolicyConfig::default(),
            watchdog: WatchdogConfig::default(),
            denylist: DenylistConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load from a JSON file, falling back to defaults when the file does
    /// not exist.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }
}
