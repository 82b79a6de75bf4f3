use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::Utc;
use log::info;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::collab::{NoopMarker, SessionSink, TouchMarker};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::models::{Session, SessionState};
use crate::platform::UiDriver;

use super::events::{EngineEvent, StopCause, UiNotification};
use super::run_loop::{run_session, SessionTask};

struct ActiveSession {
    events: mpsc::UnboundedSender<EngineEvent>,
    cancel: CancellationToken,
    session_rx: watch::Receiver<Session>,
    handle: JoinHandle<()>,
}

/// Host-facing control surface for the exploration engine.
///
/// Cheap to clone; all clones share one session slot. `start` spawns the
/// session task (a tokio runtime must be current) and returns the session
/// id immediately — launch failures surface asynchronously through the
/// outcome sink, never here.
#[derive(Clone)]
pub struct EngineController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    driver: Arc<dyn UiDriver>,
    sink: Arc<dyn SessionSink>,
    marker: Arc<dyn TouchMarker>,
    config: EngineConfig,
    active: Mutex<Option<ActiveSession>>,
}

impl EngineController {
    pub fn new(
        driver: Arc<dyn UiDriver>,
        sink: Arc<dyn SessionSink>,
        config: EngineConfig,
    ) -> Self {
        Self::with_marker(driver, sink, Arc::new(NoopMarker), config)
    }

    pub fn with_marker(
        driver: Arc<dyn UiDriver>,
        sink: Arc<dyn SessionSink>,
        marker: Arc<dyn TouchMarker>,
        config: EngineConfig,
    ) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                driver,
                sink,
                marker,
                config,
                active: Mutex::new(None),
            }),
        }
    }

    /// Start a session against `app_id` and return its id.
    pub fn start(&self, app_id: &str) -> Result<String> {
        let mut active = self.inner.active.lock().unwrap();
        if let Some(current) = active.as_ref() {
            if !current.handle.is_finished() {
                return Err(EngineError::SessionActive.into());
            }
        }

        let session = Session::new(Uuid::new_v4().to_string(), app_id.to_string(), Utc::now());
        let session_id = session.id.clone();

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (session_tx, session_rx) = watch::channel(session.clone());
        let cancel = CancellationToken::new();

        let task = SessionTask {
            session,
            driver: Arc::clone(&self.inner.driver),
            sink: Arc::clone(&self.inner.sink),
            marker: Arc::clone(&self.inner.marker),
            config: self.inner.config.clone(),
            events: events_rx,
            session_tx,
            cancel: cancel.clone(),
        };
        let handle = tokio::spawn(run_session(task));

        *active = Some(ActiveSession {
            events: events_tx,
            cancel,
            session_rx,
            handle,
        });

        info!("session {session_id} started for {app_id}");
        Ok(session_id)
    }

    /// Stop the active session and wait for its outcome report. A no-op
    /// when nothing is running.
    pub async fn stop(&self) -> Result<()> {
        let Some(active) = self.inner.active.lock().unwrap().take() else {
            return Ok(());
        };

        if active
            .events
            .send(EngineEvent::Halt(StopCause::Manual))
            .is_err()
        {
            active.cancel.cancel();
        }

        active
            .handle
            .await
            .context("session task failed to join")?;
        Ok(())
    }

    /// Forward a platform notification into the active session's queue.
    /// Dropped silently when no session is running.
    pub fn notify(&self, notification: UiNotification) {
        let guard = self.inner.active.lock().unwrap();
        if let Some(active) = guard.as_ref() {
            let _ = active
                .events
                .send(EngineEvent::Notification(notification));
        }
    }

    /// Snapshot of the most recent session, while its slot is held.
    pub fn session(&self) -> Option<Session> {
        self.inner
            .active
            .lock()
            .unwrap()
            .as_ref()
            .map(|active| active.session_rx.borrow().clone())
    }

    /// Live view of the session, for hosts that want push updates on
    /// state transitions and touch counts.
    pub fn subscribe(&self) -> Option<watch::Receiver<Session>> {
        self.inner
            .active
            .lock()
            .unwrap()
            .as_ref()
            .map(|active| active.session_rx.clone())
    }

    pub fn state(&self) -> SessionState {
        self.session()
            .map(|session| session.state)
            .unwrap_or_default()
    }
}

impl Drop for ControllerInner {
    fn drop(&mut self) {
        // Mirror of a host tearing the service down mid-session: the run
        // loop observes the cancellation and reports "service destroyed".
        if let Ok(slot) = self.active.get_mut() {
            if let Some(active) = slot.take() {
                active.cancel.cancel();
            }
        }
    }
}
