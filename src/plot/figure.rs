//! Top-level figure tree composed from the loaded dataset.

use crate::catalog::FilterSpec;
use crate::config::MapConfig;
use crate::plot::hover::HoverSpec;
use crate::plot::layer::PointLayer;
use crate::plot::viewport::{TileSource, Viewport};
use crate::plot::widget::SelectWidget;
use crate::reader::Dataset;

/// Side panel that shows hover hits, and a dataset summary while idle.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoPanel {
    /// Panel width in pixels, half the map width.
    pub width: u32,
    /// Panel height in pixels, matching the map.
    pub height: u32,
    /// Text shown when no marker is hovered.
    pub resting_text: String,
}

/// The whole composed map: surface, layer, interactions, widgets, panel.
///
/// Composition is pure. Two calls over the same dataset and configuration
/// produce equal figures, which is what makes the exported files
/// byte-identical across runs.
#[derive(Debug, Clone, PartialEq)]
pub struct MapFigure {
    pub title: String,
    pub viewport: Viewport,
    pub tiles: TileSource,
    pub points: PointLayer,
    pub hover: HoverSpec,
    pub widgets: Vec<SelectWidget>,
    pub panel: InfoPanel,
}

impl MapFigure {
    /// Composes the figure from an aggregated dataset and its filter
    /// catalog.
    ///
    /// Expects nation counts to be current, so run
    /// [`crate::aggregate::count_protests`] first; the idle summary in the
    /// panel reports how many countries have at least one protest.
    pub fn compose(dataset: &Dataset, filters: &[FilterSpec], map: &MapConfig) -> Self {
        let countries = dataset
            .nations
            .iter()
            .filter(|n| n.protest_count > 0)
            .count();
        MapFigure {
            title: map.title.clone(),
            viewport: Viewport::from_config(map),
            tiles: TileSource {
                url_template: map.tile_url.clone(),
                attribution: map.tile_attribution.clone(),
            },
            points: PointLayer::from_records(&dataset.protests, map),
            hover: HoverSpec::from_config(map),
            widgets: filters.iter().map(SelectWidget::from_spec).collect(),
            panel: InfoPanel {
                width: map.width / 2,
                height: map.height,
                resting_text: summary_line(dataset.protests.len(), countries),
            },
        }
    }
}

/// Idle panel text, e.g. `"12 protests across 3 countries"`.
fn summary_line(protests: usize, countries: usize) -> String {
    format!(
        "{} {} across {} {}",
        protests,
        if protests == 1 { "protest" } else { "protests" },
        countries,
        if countries == 1 { "country" } else { "countries" },
    )
}
