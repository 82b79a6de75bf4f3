use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum GestureKind {
    Tap,
    Swipe,
    BackNavigation,
}

/// A synthetic input gesture, consumed immediately by the dispatch step.
///
/// Tap and Swipe carry a pointer path; BackNavigation is a global back
/// command with a single marker point at screen center.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureSpec {
    pub kind: GestureKind,
    pub points: Vec<(f32, f32)>,
    pub duration_ms: u64,
}

impl GestureSpec {
    /// First point of the path, where the visual marker is shown.
    pub fn origin(&self) -> Option<(f32, f32)> {
        self.points.first().copied()
    }
}
