//! Depth-first walk of the foreground UI element tree, producing the
//! candidate region list for the action policy.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::models::{ClickableRegion, Rect};
use crate::platform::{UiDriver, UiNode};
use crate::safety::{classify, DenylistConfig, Verdict};

/// Geometric admissibility thresholds for candidate regions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScannerConfig {
    /// Minimum element width/height in pixels (exclusive).
    pub min_width: i32,
    pub min_height: i32,
    /// Vertical margins excluding the system status and navigation bars.
    pub top_margin: i32,
    pub bottom_margin: i32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            min_width: 50,
            min_height: 50,
            top_margin: 100,
            bottom_margin: 100,
        }
    }
}

/// Scan the current UI tree and return the fresh candidate list.
///
/// The walk never fails: an unreadable root yields an empty list, and an
/// unreadable node drops that node and its subtree while the rest of the
/// scan proceeds. Every borrowed node handle is released on every exit
/// path; nothing from the tree outlives the call.
pub fn scan(
    driver: &dyn UiDriver,
    denylist: &DenylistConfig,
    config: &ScannerConfig,
) -> Vec<ClickableRegion> {
    let (_, screen_height) = driver.screen_size();
    let mut regions = Vec::new();

    let Some(root) = driver.ui_root() else {
        debug!("scan: no active window root");
        return regions;
    };

    visit(root, screen_height as i32, denylist, config, &mut regions);
    regions
}

fn visit(
    node: Box<dyn UiNode>,
    screen_height: i32,
    denylist: &DenylistConfig,
    config: &ScannerConfig,
    out: &mut Vec<ClickableRegion>,
) {
    if node.is_clickable() || node.is_focusable() || node.is_long_clickable() {
        if classify_node(node.as_ref(), denylist).is_safe() {
            match node.bounds() {
                Ok(bounds) => {
                    if is_admissible(&bounds, screen_height, config) {
                        out.push(ClickableRegion::new(bounds));
                    }
                }
                Err(err) => {
                    // Node detached mid-scan; drop it and its subtree.
                    debug!("scan: skipping unreadable node: {err}");
                    return;
                }
            }
        }
    }

    for index in 0..node.child_count() {
        if let Some(child) = node.child(index) {
            visit(child, screen_height, denylist, config, out);
        }
    }
}

/// Classify a live node, failing closed: any attribute read error marks
/// the node unsafe.
fn classify_node(node: &dyn UiNode, denylist: &DenylistConfig) -> Verdict {
    let text = match node.text() {
        Ok(value) => value.unwrap_or_default(),
        Err(_) => return Verdict::Unsafe,
    };
    let label = match node.label() {
        Ok(value) => value.unwrap_or_default(),
        Err(_) => return Verdict::Unsafe,
    };
    let identifier = match node.identifier() {
        Ok(value) => value.unwrap_or_default(),
        Err(_) => return Verdict::Unsafe,
    };

    classify(&text, &label, &identifier, denylist)
}

/// Width/height above the minimum and vertically clear of the system bar
/// margins.
pub fn is_admissible(bounds: &Rect, screen_height: i32, config: &ScannerConfig) -> bool {
    bounds.width() > config.min_width
        && bounds.height() > config.min_height
        && bounds.top > config.top_margin
        && bounds.bottom < screen_height - config.bottom_margin
}
