use anyhow::Result;
use tokio::sync::oneshot;

use crate::models::{GestureSpec, Rect};

pub mod sim;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    Launched,
    NotFound,
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Completed,
    Cancelled,
}

/// Borrowed handle onto one node of the foreground app's UI element tree.
///
/// Handles are scoped acquisitions: dropping one releases the underlying
/// platform reference. No handle may outlive the scan that borrowed it,
/// which keeps the platform's node-reference pool from exhausting.
///
/// Attribute accessors return `Result` because the underlying node can
/// detach between acquisition and read; callers treat a failed read as
/// unsafe-to-touch (classifier) or skip the subtree (scanner).
pub trait UiNode {
    fn text(&self) -> Result<Option<String>>;
    fn label(&self) -> Result<Option<String>>;
    fn identifier(&self) -> Result<Option<String>>;
    fn is_clickable(&self) -> bool;
    fn is_focusable(&self) -> bool;
    fn is_long_clickable(&self) -> bool;
    fn bounds(&self) -> Result<Rect>;
    fn child_count(&self) -> usize;
    fn child(&self, index: usize) -> Option<Box<dyn UiNode>>;
}

/// Platform surface the engine drives. Implementations wrap whatever the
/// host OS exposes for app launching, UI-tree inspection, and synthetic
/// input delivery.
///
/// `dispatch` is fire-and-forget: it returns a receiver that resolves with
/// the platform's completion verdict, which the engine feeds back through
/// its own event queue.
pub trait UiDriver: Send + Sync + 'static {
    fn launch(&self, app_id: &str) -> LaunchOutcome;

    /// Return to the idle/launcher screen.
    fn navigate_home(&self);

    /// Full screen size in physical pixels (width, height).
    fn screen_size(&self) -> (u32, u32);

    /// Class name of the activity currently in the foreground, if the
    /// platform can resolve it.
    fn foreground_activity(&self) -> Option<String>;

    /// Borrow the root of the current UI element tree. `None` when no
    /// window is active or the tree is unreadable.
    fn ui_root(&self) -> Option<Box<dyn UiNode>>;

    fn dispatch(&self, gesture: GestureSpec) -> oneshot::Receiver<DispatchOutcome>;

    /// Global "navigate back" command; not a pointer gesture.
    fn global_back(&self);
}
