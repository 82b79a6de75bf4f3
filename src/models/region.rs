use serde::{Deserialize, Serialize};

/// Screen rectangle in physical pixels, origin top-left.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f32 {
        (self.left + self.right) as f32 / 2.0
    }

    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) as f32 / 2.0
    }
}

/// An on-screen rectangle deemed eligible for synthetic interaction.
/// Produced fresh on every scan; the candidate set is replaced wholesale
/// and never survives a foreground switch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickableRegion {
    pub bounds: Rect,
    pub is_interactive: bool,
}

impl ClickableRegion {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            is_interactive: true,
        }
    }
}
