//! Scriptable in-memory platform driver for tests and host dry runs.
//!
//! The sim tracks every node handle it lends out and counts releases, so
//! tests can assert that a scan returned every borrowed node.

use std::sync::{
    atomic::{AtomicIsize, AtomicUsize, Ordering},
    Arc, Mutex,
};

use anyhow::{anyhow, Result};
use tokio::sync::oneshot;

use crate::collab::{SessionSink, TouchMarker};
use crate::models::{GestureSpec, Rect, SessionOutcome};

use super::{DispatchOutcome, LaunchOutcome, UiDriver, UiNode};

/// Blueprint for one node of the simulated UI tree.
#[derive(Debug, Clone, Default)]
pub struct SimNodeSpec {
    pub text: Option<String>,
    pub label: Option<String>,
    pub identifier: Option<String>,
    pub clickable: bool,
    pub focusable: bool,
    pub long_clickable: bool,
    /// `None` makes every bounds read fail, modeling a detached node.
    pub bounds: Option<Rect>,
    /// When set, text/label/identifier reads fail.
    pub broken_attributes: bool,
    pub children: Vec<Arc<SimNodeSpec>>,
}

impl SimNodeSpec {
    pub fn container(children: Vec<SimNodeSpec>) -> Self {
        Self {
            bounds: Some(Rect::new(0, 0, 1080, 1920)),
            children: children.into_iter().map(Arc::new).collect(),
            ..Default::default()
        }
    }

    pub fn button(text: &str, bounds: Rect) -> Self {
        Self {
            text: Some(text.to_string()),
            clickable: true,
            bounds: Some(bounds),
            ..Default::default()
        }
    }

    pub fn with_identifier(mut self, identifier: &str) -> Self {
        self.identifier = Some(identifier.to_string());
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn with_children(mut self, children: Vec<SimNodeSpec>) -> Self {
        self.children = children.into_iter().map(Arc::new).collect();
        self
    }
}

struct SimState {
    screen: (u32, u32),
    launch_outcome: Mutex<LaunchOutcome>,
    tree: Mutex<Option<Arc<SimNodeSpec>>>,
    activity: Mutex<Option<String>>,
    launches: Mutex<Vec<String>>,
    gestures: Mutex<Vec<GestureSpec>>,
    dispatch_outcome: Mutex<DispatchOutcome>,
    back_presses: AtomicUsize,
    home_navigations: AtomicUsize,
    live_handles: AtomicIsize,
    total_borrows: AtomicUsize,
}

/// Scriptable `UiDriver`: the test sets up a tree, foreground activity,
/// and launch/dispatch outcomes, then inspects what the engine did.
#[derive(Clone)]
pub struct SimDriver {
    state: Arc<SimState>,
}

impl SimDriver {
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        Self {
            state: Arc::new(SimState {
                screen: (screen_width, screen_height),
                launch_outcome: Mutex::new(LaunchOutcome::Launched),
                tree: Mutex::new(None),
                activity: Mutex::new(None),
                launches: Mutex::new(Vec::new()),
                gestures: Mutex::new(Vec::new()),
                dispatch_outcome: Mutex::new(DispatchOutcome::Completed),
                back_presses: AtomicUsize::new(0),
                home_navigations: AtomicUsize::new(0),
                live_handles: AtomicIsize::new(0),
                total_borrows: AtomicUsize::new(0),
            }),
        }
    }

    pub fn set_tree(&self, root: SimNodeSpec) {
        *self.state.tree.lock().unwrap() = Some(Arc::new(root));
    }

    pub fn clear_tree(&self) {
        *self.state.tree.lock().unwrap() = None;
    }

    pub fn set_activity(&self, activity: &str) {
        *self.state.activity.lock().unwrap() = Some(activity.to_string());
    }

    pub fn set_launch_outcome(&self, outcome: LaunchOutcome) {
        *self.state.launch_outcome.lock().unwrap() = outcome;
    }

    pub fn set_dispatch_outcome(&self, outcome: DispatchOutcome) {
        *self.state.dispatch_outcome.lock().unwrap() = outcome;
    }

    pub fn launches(&self) -> Vec<String> {
        self.state.launches.lock().unwrap().clone()
    }

    pub fn dispatched(&self) -> Vec<GestureSpec> {
        self.state.gestures.lock().unwrap().clone()
    }

    pub fn dispatch_count(&self) -> usize {
        self.state.gestures.lock().unwrap().len()
    }

    pub fn back_press_count(&self) -> usize {
        self.state.back_presses.load(Ordering::SeqCst)
    }

    pub fn home_navigation_count(&self) -> usize {
        self.state.home_navigations.load(Ordering::SeqCst)
    }

    /// Node handles currently borrowed and not yet released. Zero after a
    /// well-behaved scan.
    pub fn live_node_handles(&self) -> isize {
        self.state.live_handles.load(Ordering::SeqCst)
    }

    /// Total node handles lent out since creation.
    pub fn total_node_borrows(&self) -> usize {
        self.state.total_borrows.load(Ordering::SeqCst)
    }
}

impl UiDriver for SimDriver {
    fn launch(&self, app_id: &str) -> LaunchOutcome {
        self.state.launches.lock().unwrap().push(app_id.to_string());
        self.state.launch_outcome.lock().unwrap().clone()
    }

    fn navigate_home(&self) {
        self.state.home_navigations.fetch_add(1, Ordering::SeqCst);
    }

    fn screen_size(&self) -> (u32, u32) {
        self.state.screen
    }

    fn foreground_activity(&self) -> Option<String> {
        self.state.activity.lock().unwrap().clone()
    }

    fn ui_root(&self) -> Option<Box<dyn UiNode>> {
        let root = self.state.tree.lock().unwrap().clone()?;
        Some(Box::new(SimNode::borrow(root, Arc::clone(&self.state))))
    }

    fn dispatch(&self, gesture: GestureSpec) -> oneshot::Receiver<DispatchOutcome> {
        self.state.gestures.lock().unwrap().push(gesture);
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(*self.state.dispatch_outcome.lock().unwrap());
        rx
    }

    fn global_back(&self) {
        self.state.back_presses.fetch_add(1, Ordering::SeqCst);
    }
}

/// `SessionSink` double that records every call and can be told to fail.
#[derive(Default)]
pub struct RecordingSink {
    touches: Mutex<Vec<String>>,
    outcomes: Mutex<Vec<(String, SessionOutcome)>>,
    fail_calls: std::sync::atomic::AtomicBool,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every subsequent sink call return an error.
    pub fn fail_from_now_on(&self) {
        self.fail_calls.store(true, Ordering::SeqCst);
    }

    pub fn touch_count(&self) -> usize {
        self.touches.lock().unwrap().len()
    }

    pub fn outcomes(&self) -> Vec<(String, SessionOutcome)> {
        self.outcomes.lock().unwrap().clone()
    }
}

impl SessionSink for RecordingSink {
    fn record_touch(&self, session_id: &str) -> Result<()> {
        if self.fail_calls.load(Ordering::SeqCst) {
            return Err(anyhow!("sink unavailable"));
        }
        self.touches.lock().unwrap().push(session_id.to_string());
        Ok(())
    }

    fn report_outcome(&self, session_id: &str, outcome: &SessionOutcome) -> Result<()> {
        if self.fail_calls.load(Ordering::SeqCst) {
            return Err(anyhow!("sink unavailable"));
        }
        self.outcomes
            .lock()
            .unwrap()
            .push((session_id.to_string(), outcome.clone()));
        Ok(())
    }
}

/// `TouchMarker` double that remembers every marker position.
#[derive(Default)]
pub struct RecordingMarker {
    points: Mutex<Vec<(f32, f32)>>,
}

impl RecordingMarker {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn points(&self) -> Vec<(f32, f32)> {
        self.points.lock().unwrap().clone()
    }
}

impl TouchMarker for RecordingMarker {
    fn show_touch(&self, x: f32, y: f32) {
        self.points.lock().unwrap().push((x, y));
    }
}

struct SimNode {
    spec: Arc<SimNodeSpec>,
    state: Arc<SimState>,
}

impl SimNode {
    fn borrow(spec: Arc<SimNodeSpec>, state: Arc<SimState>) -> Self {
        state.live_handles.fetch_add(1, Ordering::SeqCst);
        state.total_borrows.fetch_add(1, Ordering::SeqCst);
        Self { spec, state }
    }
}

impl Drop for SimNode {
    fn drop(&mut self) {
        self.state.live_handles.fetch_sub(1, Ordering::SeqCst);
    }
}

impl UiNode for SimNode {
    fn text(&self) -> Result<Option<String>> {
        if self.spec.broken_attributes {
            return Err(anyhow!("node detached while reading text"));
        }
        Ok(self.spec.text.clone())
    }

    fn label(&self) -> Result<Option<String>> {
        if self.spec.broken_attributes {
            return Err(anyhow!("node detached while reading label"));
        }
        Ok(self.spec.label.clone())
    }

    fn identifier(&self) -> Result<Option<String>> {
        if self.spec.broken_attributes {
            return Err(anyhow!("node detached while reading identifier"));
        }
        Ok(self.spec.identifier.clone())
    }

    fn is_clickable(&self) -> bool {
        self.spec.clickable
    }

    fn is_focusable(&self) -> bool {
        self.spec.focusable
    }

    fn is_long_clickable(&self) -> bool {
        self.spec.long_clickable
    }

    fn bounds(&self) -> Result<Rect> {
        self.spec
            .bounds
            .ok_or_else(|| anyhow!("bounds unavailable"))
    }

    fn child_count(&self) -> usize {
        self.spec.children.len()
    }

    fn child(&self, index: usize) -> Option<Box<dyn UiNode>> {
        let child = self.spec.children.get(index)?;
        Some(Box::new(SimNode::borrow(
            Arc::clone(child),
            Arc::clone(&self.state),
        )))
    }
}
