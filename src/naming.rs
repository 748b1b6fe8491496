//! Deterministic naming for generated HTML elements.
//!
//! Every id the writer emits is derived from input names through [`slug`],
//! so re-running the pipeline on identical input produces byte-identical
//! output. Nothing here is random or time-based.

use std::sync::OnceLock;

use regex::Regex;

/// Root id of the embedded widget; everything else hangs off this.
pub const WIDGET_ID: &str = "protest-map";

/// Id of the map surface element.
pub const MAP_ID: &str = "protest-map-canvas";

/// Id of the hover/info panel element.
pub const PANEL_ID: &str = "protest-map-panel";

/// Id of the widget column holding the filter selects.
pub const FILTERS_ID: &str = "protest-map-filters";

fn non_word() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").unwrap())
}

/// Turn an arbitrary column name into an id-safe slug.
///
/// `"Event Type (F3)"` becomes `"event-type-f3"`. A name with no
/// alphanumeric characters at all falls back to `"field"`.
pub fn slug(name: &str) -> String {
    let lowered = name.to_lowercase();
    let replaced = non_word().replace_all(&lowered, "-");
    let trimmed = replaced.trim_matches('-');
    if trimmed.is_empty() {
        "field".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Element id for the filter select bound to `column`.
pub fn filter_id(column: &str) -> String {
    format!("{}-filter-{}", WIDGET_ID, slug(column))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_flattens_punctuation() {
        assert_eq!(slug("Event Type (F3)"), "event-type-f3");
        assert_eq!(slug("School Name"), "school-name");
        assert_eq!(slug("already-sluggy"), "already-sluggy");
    }

    #[test]
    fn test_slug_empty_fallback() {
        assert_eq!(slug("!!!"), "field");
        assert_eq!(slug(""), "field");
    }

    #[test]
    fn test_filter_id_is_prefixed() {
        assert_eq!(filter_id("Event Type"), "protest-map-filter-event-type");
    }

    #[test]
    fn test_slug_is_stable() {
        // Same input, same output; ids must never vary between runs.
        assert_eq!(slug("Location"), slug("Location"));
    }
}
