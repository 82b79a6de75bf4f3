use std::sync::Arc;

use chrono::Utc;
use log::{debug, info, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{sleep, sleep_until, Duration, Instant};
use tokio_util::sync::CancellationToken;

use crate::collab::{SessionSink, TouchMarker};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::models::{ClickableRegion, GestureKind, Session, SessionState};
use crate::platform::{DispatchOutcome, LaunchOutcome, UiDriver};
use crate::policy::{self, PolicyContext};
use crate::scanner;
use crate::watchdog::{ForegroundWatch, WatchVerdict};

use super::events::{EngineEvent, StopCause, UiNotification};

/// Everything one session task owns. Built by the controller, consumed by
/// `run_session`.
pub(crate) struct SessionTask {
    pub session: Session,
    pub driver: Arc<dyn UiDriver>,
    pub sink: Arc<dyn SessionSink>,
    pub marker: Arc<dyn TouchMarker>,
    pub config: EngineConfig,
    pub events: mpsc::UnboundedReceiver<EngineEvent>,
    pub session_tx: watch::Sender<Session>,
    pub cancel: CancellationToken,
}

/// One session from launch to terminal outcome.
///
/// The `select!` below is the engine's single event queue: ticks,
/// notifications, gesture completions, and halt commands all pass through
/// it, so nothing ever touches session state concurrently. Leaving the
/// loop drops every pending timer at once — the unit of cancellation is
/// the whole session.
pub(crate) async fn run_session(mut task: SessionTask) {
    let target = task.session.target_app_id.clone();

    match task.driver.launch(&target) {
        LaunchOutcome::Launched => {}
        LaunchOutcome::NotFound => {
            let cause = StopCause::LaunchFailed(EngineError::AppNotFound.to_string());
            finish(&mut task, cause).await;
            return;
        }
        LaunchOutcome::Error(reason) => {
            let cause = StopCause::LaunchFailed(EngineError::Launch { reason }.to_string());
            finish(&mut task, cause).await;
            return;
        }
    }

    task.session.state = SessionState::Running;
    let _ = task.session_tx.send(task.session.clone());
    info!(
        "session {} running against {target}",
        task.session.id
    );

    let mut rng = StdRng::from_entropy();
    let mut foreground = ForegroundWatch::new(target.clone(), &task.config.watchdog);

    let mut candidates = rescan(&task, "initial");

    let deadline = Instant::now() + Duration::from_millis(task.config.session_duration_ms);
    let mut next_tick = Instant::now() + tick_interval(&mut rng, &task.config);
    let mut rescan_at: Option<Instant> = None;
    let mut in_flight: Option<oneshot::Receiver<DispatchOutcome>> = None;

    let cause = loop {
        tokio::select! {
            biased;

            _ = task.cancel.cancelled() => break StopCause::ServiceDestroyed,

            event = task.events.recv() => match event {
                Some(EngineEvent::Halt(cause)) => break cause,
                Some(EngineEvent::Notification(UiNotification::WindowChanged { app_id })) => {
                    if foreground.observe(&app_id, Utc::now()) == WatchVerdict::Lost {
                        info!(
                            "session {}: foreground moved to {app_id}, halting",
                            task.session.id
                        );
                        candidates.clear();
                        break StopCause::AppSwitched;
                    }
                }
                Some(EngineEvent::Notification(UiNotification::TreeChanged { app_id })) => {
                    if app_id == target {
                        candidates = rescan(&task, "tree-changed");
                    }
                }
                None => break StopCause::ServiceDestroyed,
            },

            outcome = async { in_flight.as_mut().expect("in-flight gesture").await },
                if in_flight.is_some() =>
            {
                in_flight = None;
                match outcome {
                    Ok(result) => note_completion(result, &mut rescan_at, &mut rng, &task.config),
                    Err(_) => debug!("gesture completion channel dropped"),
                }
            }

            _ = sleep_until(deadline) => break StopCause::NaturalEnd,

            _ = async { sleep_until(rescan_at.expect("rescan deadline")).await },
                if rescan_at.is_some() =>
            {
                rescan_at = None;
                candidates = rescan(&task, "post-gesture");
            }

            _ = sleep_until(next_tick) => {
                act(&mut task, &candidates, &mut in_flight, &mut rng);
                next_tick = Instant::now() + tick_interval(&mut rng, &task.config);
            }
        }
    };

    finish(&mut task, cause).await;
}

fn rescan(task: &SessionTask, trigger: &str) -> Vec<ClickableRegion> {
    let candidates = scanner::scan(
        task.driver.as_ref(),
        &task.config.denylist,
        &task.config.scanner,
    );
    debug!(
        "session {}: {trigger} scan found {} candidates",
        task.session.id,
        candidates.len()
    );
    candidates
}

/// Run the policy once and dispatch whatever it picks.
fn act(
    task: &mut SessionTask,
    candidates: &[ClickableRegion],
    in_flight: &mut Option<oneshot::Receiver<DispatchOutcome>>,
    rng: &mut StdRng,
) {
    let (screen_width, screen_height) = task.driver.screen_size();
    let activity = task.driver.foreground_activity();
    let ctx = PolicyContext {
        candidates,
        screen_width,
        screen_height,
        current_activity: activity.as_deref(),
    };

    let Some(spec) = policy::decide(&ctx, &task.config.policy, rng) else {
        debug!(
            "session {}: back navigation suppressed on main screen",
            task.session.id
        );
        return;
    };

    if let Some((x, y)) = spec.origin() {
        task.marker.show_touch(x, y);
    }
    record_touch(task);

    match spec.kind {
        GestureKind::BackNavigation => task.driver.global_back(),
        GestureKind::Tap | GestureKind::Swipe => {
            *in_flight = Some(task.driver.dispatch(spec));
        }
    }
}

fn record_touch(task: &mut SessionTask) {
    task.session.touch_count += 1;
    let _ = task.session_tx.send(task.session.clone());
    if let Err(err) = task.sink.record_touch(&task.session.id) {
        warn!(
            "session {}: touch record failed: {err:#}",
            task.session.id
        );
    }
}

/// Gesture completion feedback: a successful gesture occasionally arms a
/// delayed rescan to track UI drift; a cancelled one is ignored.
fn note_completion(
    outcome: DispatchOutcome,
    rescan_at: &mut Option<Instant>,
    rng: &mut StdRng,
    config: &EngineConfig,
) {
    match outcome {
        DispatchOutcome::Completed => {
            if rng.gen::<f64>() < config.rescan_probability {
                *rescan_at =
                    Some(Instant::now() + Duration::from_millis(config.rescan_settle_ms));
            }
        }
        DispatchOutcome::Cancelled => debug!("gesture cancelled by platform"),
    }
}

fn tick_interval(rng: &mut StdRng, config: &EngineConfig) -> Duration {
    if config.tick_min_ms >= config.tick_max_ms {
        return Duration::from_millis(config.tick_min_ms);
    }
    Duration::from_millis(rng.gen_range(config.tick_min_ms..config.tick_max_ms))
}

/// Terminal transition: mark Stopped, run the natural-end home
/// navigation, and report exactly one outcome.
async fn finish(task: &mut SessionTask, cause: StopCause) {
    task.session.state = SessionState::Stopped;
    let _ = task.session_tx.send(task.session.clone());

    if cause == StopCause::NaturalEnd {
        sleep(Duration::from_millis(task.config.home_grace_ms)).await;
        task.driver.navigate_home();
    }

    let outcome = cause.into_outcome();
    info!(
        "session {} finished after {} touches: {outcome:?}",
        task.session.id, task.session.touch_count
    );
    if let Err(err) = task.sink.report_outcome(&task.session.id, &outcome) {
        warn!(
            "session {}: outcome report failed: {err:#}",
            task.session.id
        );
    }
}
