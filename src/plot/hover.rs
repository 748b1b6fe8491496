//! Hover interaction parameters and the wording of the hover panel.
//!
//! Hit-testing runs client-side, but the strings the panel shows are
//! fixed here so the wording is testable and stays identical across
//! embed and standalone output.

use crate::config::MapConfig;

/// Most records listed in the panel for a single hover hit.
pub const MAX_VISIBLE: usize = 5;

/// Panel header template; `{n}` is the number of records under the cursor.
pub const HEADER_TEMPLATE: &str = "Number of protests: {n}";

/// Note shown when exactly one record is hidden by the visible cap.
pub const ONE_HIDDEN_NOTE: &str = "Additional protest not shown";

/// Note template for two or more hidden records; `{n}` is the hidden count.
pub const MANY_HIDDEN_TEMPLATE: &str = "Additional {n} protests not shown";

fn fill(template: &str, n: usize) -> String {
    template.replace("{n}", &n.to_string())
}

/// Hover behavior attached to the point layer.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverSpec {
    /// Hit-test radius around the cursor, in pixels.
    pub radius: f64,
    /// Cap on records listed per hit.
    pub max_visible: usize,
}

impl HoverSpec {
    pub fn from_config(map: &MapConfig) -> Self {
        HoverSpec {
            radius: map.hover_radius,
            max_visible: MAX_VISIBLE,
        }
    }
}

/// First line of the hover panel for a hit of `count` records.
pub fn panel_header(count: usize) -> String {
    fill(HEADER_TEMPLATE, count)
}

/// Note appended when a hit has more records than the panel lists.
///
/// Returns `None` when nothing is hidden. The wording distinguishes one
/// hidden record from several.
pub fn overflow_note(hidden: usize) -> Option<String> {
    match hidden {
        0 => None,
        1 => Some(ONE_HIDDEN_NOTE.to_string()),
        n => Some(fill(MANY_HIDDEN_TEMPLATE, n)),
    }
}
