//! Probabilistic selection of the next input gesture.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::gesture;
use crate::models::{ClickableRegion, GestureKind, GestureSpec};

/// Tunables for action selection and gesture synthesis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolicyConfig {
    /// Draws below `tap_cutoff` tap; between the cutoffs swipe; above
    /// `swipe_cutoff` navigate back (only when a verified candidate
    /// exists). Without candidates the tap cutoff alone splits Tap/Swipe.
    pub tap_cutoff: f32,
    pub swipe_cutoff: f32,
    /// Jitter around a candidate's center, pixels per axis.
    pub region_jitter_px: i32,
    /// Jitter around screen center when no candidate exists.
    pub fallback_jitter_px: i32,
    pub tap_duration_ms: u64,
    pub swipe_duration_ms: u64,
    /// Horizontal drift of a swipe end point.
    pub swipe_drift_px: i32,
    /// Vertical travel magnitude range of a swipe.
    pub swipe_travel_min_px: i32,
    pub swipe_travel_max_px: i32,
    /// Activity-name fragments identifying the app's landing screen,
    /// where back navigation is suppressed.
    pub main_screen_markers: Vec<String>,
    /// Activity-name suffixes with the same effect.
    pub main_screen_suffixes: Vec<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            tap_cutoff: 0.6,
            swipe_cutoff: 0.8,
            region_jitter_px: 20,
            fallback_jitter_px: 200,
            tap_duration_ms: 100,
            swipe_duration_ms: 300,
            swipe_drift_px: 100,
            swipe_travel_min_px: 200,
            swipe_travel_max_px: 400,
            main_screen_markers: vec![
                "MainActivity".to_string(),
                "LauncherActivity".to_string(),
                "HomeActivity".to_string(),
            ],
            main_screen_suffixes: vec![".Main".to_string()],
        }
    }
}

/// Inputs the policy evaluates on each tick.
pub struct PolicyContext<'a> {
    pub candidates: &'a [ClickableRegion],
    pub screen_width: u32,
    pub screen_height: u32,
    /// Foreground activity class name, when the platform can resolve it.
    pub current_activity: Option<&'a str>,
}

/// Map a uniform draw in [0,1) onto a gesture kind.
///
/// With no verified candidate there is no element to justify a dismissal
/// gesture, so back navigation is never eligible in that branch.
pub fn choose_kind(has_candidates: bool, r: f32, config: &PolicyConfig) -> GestureKind {
    if has_candidates {
        if r < config.tap_cutoff {
            GestureKind::Tap
        } else if r < config.swipe_cutoff {
            GestureKind::Swipe
        } else {
            GestureKind::BackNavigation
        }
    } else if r < config.tap_cutoff {
        GestureKind::Tap
    } else {
        GestureKind::Swipe
    }
}

/// Heuristic match for the application's main/landing screen.
pub fn is_main_screen(activity: &str, config: &PolicyConfig) -> bool {
    let lowered = activity.to_lowercase();
    config
        .main_screen_markers
        .iter()
        .any(|marker| lowered.contains(&marker.to_lowercase()))
        || config
            .main_screen_suffixes
            .iter()
            .any(|suffix| lowered.ends_with(&suffix.to_lowercase()))
}

/// Produce the next gesture, or `None` when the chosen action downgrades
/// to a no-op (back navigation on the landing screen).
pub fn decide(
    ctx: &PolicyContext<'_>,
    config: &PolicyConfig,
    rng: &mut impl Rng,
) -> Option<GestureSpec> {
    let (x, y) = if let Some(region) = pick_region(ctx.candidates, rng) {
        let jitter = config.region_jitter_px;
        (
            region.bounds.center_x() + rng.gen_range(-jitter..=jitter) as f32,
            region.bounds.center_y() + rng.gen_range(-jitter..=jitter) as f32,
        )
    } else {
        let jitter = config.fallback_jitter_px;
        (
            ctx.screen_width as f32 / 2.0 + rng.gen_range(-jitter..=jitter) as f32,
            ctx.screen_height as f32 / 2.0 + rng.gen_range(-jitter..=jitter) as f32,
        )
    };

    let r = rng.gen::<f32>();
    match choose_kind(!ctx.candidates.is_empty(), r, config) {
        GestureKind::Tap => Some(gesture::tap(x, y, config)),
        GestureKind::Swipe => Some(gesture::swipe(x, y, config, rng)),
        GestureKind::BackNavigation => {
            let on_main_screen = ctx
                .current_activity
                .map(|activity| is_main_screen(activity, config))
                .unwrap_or(false);
            if on_main_screen {
                None
            } else {
                Some(gesture::back_navigation(
                    ctx.screen_width,
                    ctx.screen_height,
                ))
            }
        }
    }
}

fn pick_region<'a>(
    candidates: &'a [ClickableRegion],
    rng: &mut impl Rng,
) -> Option<&'a ClickableRegion> {
    if candidates.is_empty() {
        return None;
    }
    Some(&candidates[rng.gen_range(0..candidates.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rect;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SCREEN: (u32, u32) = (1080, 1920);

    fn region(left: i32, top: i32, right: i32, bottom: i32) -> ClickableRegion {
        ClickableRegion::new(Rect::new(left, top, right, bottom))
    }

    fn ctx<'a>(
        candidates: &'a [ClickableRegion],
        activity: Option<&'a str>,
    ) -> PolicyContext<'a> {
        PolicyContext {
            candidates,
            screen_width: SCREEN.0,
            screen_height: SCREEN.1,
            current_activity: activity,
        }
    }

    #[test]
    fn kind_split_follows_the_draw_with_candidates() {
        let config = PolicyConfig::default();
        assert_eq!(choose_kind(true, 0.0, &config), GestureKind::Tap);
        assert_eq!(choose_kind(true, 0.5, &config), GestureKind::Tap);
        assert_eq!(choose_kind(true, 0.6, &config), GestureKind::Swipe);
        assert_eq!(choose_kind(true, 0.79, &config), GestureKind::Swipe);
        assert_eq!(
            choose_kind(true, 0.8, &config),
            GestureKind::BackNavigation
        );
        assert_eq!(
            choose_kind(true, 0.99, &config),
            GestureKind::BackNavigation
        );
    }

    #[test]
    fn back_is_never_chosen_without_candidates() {
        let config = PolicyConfig::default();
        assert_eq!(choose_kind(false, 0.9, &config), GestureKind::Swipe);
        assert_eq!(choose_kind(false, 0.99, &config), GestureKind::Swipe);
        assert_eq!(choose_kind(false, 0.3, &config), GestureKind::Tap);
    }

    #[test]
    fn empirical_distribution_matches_60_20_20() {
        let config = PolicyConfig::default();
        let candidates = [region(0, 400, 200, 600)];
        let mut rng = StdRng::seed_from_u64(7);

        let mut taps = 0u32;
        let mut swipes = 0u32;
        let mut backs = 0u32;
        const N: u32 = 10_000;
        for _ in 0..N {
            // Non-main activity, so back navigation is never downgraded.
            match decide(&ctx(&candidates, Some("com.example.DetailActivity")), &config, &mut rng)
            {
                Some(spec) => match spec.kind {
                    GestureKind::Tap => taps += 1,
                    GestureKind::Swipe => swipes += 1,
                    GestureKind::BackNavigation => backs += 1,
                },
                None => panic!("no action should be suppressed off the main screen"),
            }
        }

        let tolerance = 0.025;
        assert!((taps as f64 / N as f64 - 0.6).abs() < tolerance, "taps: {taps}");
        assert!((swipes as f64 / N as f64 - 0.2).abs() < tolerance, "swipes: {swipes}");
        assert!((backs as f64 / N as f64 - 0.2).abs() < tolerance, "backs: {backs}");
    }

    #[test]
    fn tap_lands_near_the_candidate_center() {
        let config = PolicyConfig::default();
        // Center (100, 200).
        let candidates = [region(0, 100, 200, 300)];
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..1_000 {
            let Some(spec) =
                decide(&ctx(&candidates, Some("com.example.DetailActivity")), &config, &mut rng)
            else {
                panic!("no suppression expected");
            };
            if spec.kind != GestureKind::Tap {
                continue;
            }
            let (x, y) = spec.points[0];
            assert!((x - 100.0).abs() <= 20.0, "x drifted: {x}");
            assert!((y - 200.0).abs() <= 20.0, "y drifted: {y}");
            assert_eq!(spec.duration_ms, 100);
        }
    }

    #[test]
    fn empty_candidates_target_screen_center() {
        let config = PolicyConfig::default();
        let mut rng = StdRng::seed_from_u64(13);

        for _ in 0..1_000 {
            let Some(spec) = decide(&ctx(&[], None), &config, &mut rng) else {
                panic!("tap/swipe is always produced without candidates");
            };
            assert_ne!(spec.kind, GestureKind::BackNavigation);
            let (x, y) = spec.points[0];
            assert!((x - 540.0).abs() <= 200.0, "x out of band: {x}");
            assert!((y - 960.0).abs() <= 200.0, "y out of band: {y}");
        }
    }

    #[test]
    fn back_downgrades_to_noop_on_main_screen() {
        let config = PolicyConfig::default();
        let candidates = [region(0, 400, 200, 600)];
        let mut rng = StdRng::seed_from_u64(17);

        let mut saw_suppression = false;
        let mut saw_back = false;
        for _ in 0..1_000 {
            match decide(
                &ctx(&candidates, Some("com.example.MainActivity")),
                &config,
                &mut rng,
            ) {
                None => saw_suppression = true,
                Some(spec) if spec.kind == GestureKind::BackNavigation => saw_back = true,
                Some(_) => {}
            }
        }
        assert!(saw_suppression, "back draws should downgrade on the main screen");
        assert!(!saw_back, "back must never execute on the main screen");
    }

    #[test]
    fn main_screen_heuristic_matches_the_known_names() {
        let config = PolicyConfig::default();
        assert!(is_main_screen("com.example.MainActivity", &config));
        assert!(is_main_screen("com.example.ui.LauncherActivity", &config));
        assert!(is_main_screen("com.example.HOMEACTIVITY", &config));
        assert!(is_main_screen("com.example.Main", &config));
        assert!(!is_main_screen("com.example.DetailActivity", &config));
        assert!(!is_main_screen("com.example.MainframeViewer", &config));
    }
}
