//! Builds concrete gesture paths from target coordinates.

use rand::Rng;

use crate::models::{GestureKind, GestureSpec};
use crate::policy::PolicyConfig;

/// Single-point tap at (x, y).
pub fn tap(x: f32, y: f32, config: &PolicyConfig) -> GestureSpec {
    GestureSpec {
        kind: GestureKind::Tap,
        points: vec![(x, y)],
        duration_ms: config.tap_duration_ms,
    }
}

/// Swipe starting at (x, y) with random horizontal drift and a mostly
/// vertical travel, upward or downward with equal probability.
pub fn swipe(x: f32, y: f32, config: &PolicyConfig, rng: &mut impl Rng) -> GestureSpec {
    let dx = rng.gen_range(-config.swipe_drift_px..=config.swipe_drift_px) as f32;
    let travel =
        rng.gen_range(config.swipe_travel_min_px..=config.swipe_travel_max_px) as f32;
    let dy = if rng.gen_bool(0.5) { -travel } else { travel };

    GestureSpec {
        kind: GestureKind::Swipe,
        points: vec![(x, y), (x + dx, y + dy)],
        duration_ms: config.swipe_duration_ms,
    }
}

/// Global back command. Carries the screen center as its single point so
/// the visual marker has somewhere to land; no pointer path is synthesized.
pub fn back_navigation(screen_width: u32, screen_height: u32) -> GestureSpec {
    GestureSpec {
        kind: GestureKind::BackNavigation,
        points: vec![(screen_width as f32 / 2.0, screen_height as f32 / 2.0)],
        duration_ms: 0,
    }
}
