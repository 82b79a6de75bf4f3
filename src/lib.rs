//! Autonomous safe-exploration engine for unattended UI soak testing.
//!
//! Attach the engine to a platform via the [`platform::UiDriver`] trait,
//! point it at a target app, and it explores the foreground UI with
//! safety-filtered random gestures until its session duration elapses,
//! the foreground is lost, or a stop command arrives.

pub mod collab;
pub mod config;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod models;
pub mod platform;
pub mod policy;
pub mod safety;
pub mod scanner;
pub mod watchdog;

pub use config::EngineConfig;
pub use engine::{EngineController, UiNotification};
pub use error::EngineError;
pub use models::{ClickableRegion, GestureKind, GestureSpec, Session, SessionOutcome, SessionState};
