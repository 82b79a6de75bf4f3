use thiserror::Error;

/// Failure taxonomy of the exploration engine.
///
/// Only a launch failure is fatal to a session: it is reported once
/// through the outcome sink and the session ends stopped. Scan failures
/// degrade to a partial or empty candidate list, dispatch cancellations
/// are ignored, and foreground loss is expected control flow rather than
/// an error — none of those surface to callers.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("target app not found")]
    AppNotFound,

    #[error("launch error: {reason}")]
    Launch { reason: String },

    /// A start command arrived while a session was already running.
    #[error("session already active")]
    SessionActive,
}
