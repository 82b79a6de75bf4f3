//! Contracts for the engine's external collaborators.
//!
//! The engine consumes `SessionSink` and `TouchMarker` directly. The
//! remaining traits are host wiring points for the surrounding system
//! (scheduling, persistence, replication) and are declared here so hosts
//! integrate against one set of interfaces; the engine itself never calls
//! them.

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::models::{Session, SessionOutcome};

/// Observability sink fed by the engine: one `record_touch` per dispatched
/// action and exactly one `report_outcome` per session.
///
/// Failures from either call are logged and ignored by the engine; they
/// never reach the session state machine.
pub trait SessionSink: Send + Sync + 'static {
    fn record_touch(&self, session_id: &str) -> Result<()>;
    fn report_outcome(&self, session_id: &str, outcome: &SessionOutcome) -> Result<()>;
}

/// Transient visual marker shown where a synthetic touch lands.
pub trait TouchMarker: Send + Sync + 'static {
    fn show_touch(&self, x: f32, y: f32);
}

/// Marker that renders nothing; the default for headless hosts.
pub struct NoopMarker;

impl TouchMarker for NoopMarker {
    fn show_touch(&self, _x: f32, _y: f32) {}
}

/// Timer/alarm abstraction that starts a session at a chosen future time.
pub trait RunScheduler: Send + Sync {
    /// Arrange the next unattended run and return when it will fire.
    fn schedule_next_run(&self, target_app_id: &str) -> Result<DateTime<Utc>>;
    fn cancel_scheduled_run(&self) -> Result<()>;
    fn next_run_at(&self) -> Option<DateTime<Utc>>;
}

/// Append-only session record store keyed by session id.
pub trait RecordStore: Send + Sync {
    fn open_record(&self, session: &Session) -> Result<()>;
    fn increment_touch_count(&self, session_id: &str) -> Result<()>;
    fn close_record(&self, session_id: &str, outcome: &SessionOutcome) -> Result<()>;
}

/// Best-effort asynchronous replication of a closed session record to a
/// remote document store.
pub trait RecordReplicator: Send + Sync {
    fn replicate(&self, session_id: &str) -> Result<()>;
}
