use crate::models::SessionOutcome;

/// Inbound platform notification feed. Hosts forward these through
/// `EngineController::notify`; the engine serializes them with its own
/// timers and commands on one queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiNotification {
    /// Content of the watched window changed; triggers a rescan.
    TreeChanged { app_id: String },
    /// A different window took the foreground.
    WindowChanged { app_id: String },
}

/// Everything the session run loop can receive on its inbox. Gesture
/// completions arrive through the dispatch channel instead, polled by the
/// same `select!` so they still serialize with these.
#[derive(Debug)]
pub(crate) enum EngineEvent {
    Notification(UiNotification),
    Halt(StopCause),
}

/// Why a session left Running. Exactly one cause is recorded per session
/// and mapped to its terminal outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StopCause {
    NaturalEnd,
    Manual,
    AppSwitched,
    LaunchFailed(String),
    ServiceDestroyed,
}

impl StopCause {
    pub(crate) fn into_outcome(self) -> SessionOutcome {
        match self {
            StopCause::NaturalEnd => SessionOutcome::Completed,
            StopCause::Manual => SessionOutcome::failed("Stopped manually"),
            StopCause::AppSwitched => SessionOutcome::failed("app switched"),
            StopCause::LaunchFailed(reason) => SessionOutcome::failed(reason),
            StopCause::ServiceDestroyed => SessionOutcome::failed("service destroyed"),
        }
    }
}
