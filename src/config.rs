//! TOML configuration for the map pipeline.
//!
//! Every field has a built-in default mirroring the layout this tool was
//! first written for, so a bare `protest-map` run works without any config
//! file. A `map.toml` can override input paths, the CSV column names, map
//! styling, and output paths. Colors are validated at load time; values are
//! kept as the original CSS strings because they pass straight through to
//! the generated page.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{ProtestMapError, Result};

/// Default config file path, used when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "map.toml";

/// Top-level configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Input file locations and CSV schema.
#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    /// Protest events CSV.
    #[serde(default = "default_protests")]
    pub protests: PathBuf,
    /// National boundary polygons, GeoJSON FeatureCollection.
    #[serde(default = "default_nations")]
    pub nations: PathBuf,
    /// Directory polled for changes in watch mode.
    #[serde(default = "default_watch_dir")]
    pub watch_dir: PathBuf,
    /// GeoJSON property holding the nation name.
    #[serde(default = "default_nation_name_property")]
    pub nation_name_property: String,
    #[serde(default = "default_description_column")]
    pub description_column: String,
    #[serde(default = "default_location_column")]
    pub location_column: String,
    #[serde(default = "default_event_type_column")]
    pub event_type_column: String,
    #[serde(default = "default_longitude_column")]
    pub longitude_column: String,
    #[serde(default = "default_latitude_column")]
    pub latitude_column: String,
    /// Categorical columns that get a filter widget, in display order.
    /// Must name columns declared above (location or event type).
    #[serde(default = "default_filter_columns")]
    pub filter_columns: Vec<String>,
}

/// Map appearance: viewport, tiles, markers, hover behavior.
#[derive(Debug, Deserialize, Clone)]
pub struct MapConfig {
    #[serde(default = "default_title")]
    pub title: String,
    /// Plot size in pixels.
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Initial viewport, Web-Mercator meters (EPSG:3857).
    #[serde(default = "default_x_range")]
    pub x_range: (f64, f64),
    #[serde(default = "default_y_range")]
    pub y_range: (f64, f64),
    /// Tile URL template with {z}/{x}/{y} placeholders.
    #[serde(default = "default_tile_url")]
    pub tile_url: String,
    #[serde(default = "default_tile_attribution")]
    pub tile_attribution: String,
    /// Marker diameter in pixels.
    #[serde(default = "default_marker_size")]
    pub marker_size: f64,
    #[serde(default = "default_marker_fill")]
    pub marker_fill: String,
    #[serde(default = "default_marker_fill_opacity")]
    pub marker_fill_opacity: f64,
    #[serde(default = "default_marker_line")]
    pub marker_line: String,
    #[serde(default = "default_marker_line_opacity")]
    pub marker_line_opacity: f64,
    /// Hover hit-test radius in pixels around the cursor.
    #[serde(default = "default_hover_radius")]
    pub hover_radius: f64,
}

/// Output file locations. Parent directories are not created: a missing
/// directory is a write failure, reported as such.
#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    /// Embed mode: HTML fragment for inclusion in a static site.
    #[serde(default = "default_embed_fragment")]
    pub embed_fragment: PathBuf,
    /// Embed mode: bootstrap script tags for the page head.
    #[serde(default = "default_embed_header")]
    pub embed_header: PathBuf,
    /// Standalone mode: single self-contained page.
    #[serde(default = "default_standalone")]
    pub standalone: PathBuf,
}

fn default_protests() -> PathBuf {
    PathBuf::from("data/protests.csv")
}

fn default_nations() -> PathBuf {
    PathBuf::from("data/nations.geojson")
}

fn default_watch_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_nation_name_property() -> String {
    "name".to_string()
}

fn default_description_column() -> String {
    "Description".to_string()
}

fn default_location_column() -> String {
    "Location".to_string()
}

fn default_event_type_column() -> String {
    "Event Type".to_string()
}

fn default_longitude_column() -> String {
    "Longitude".to_string()
}

fn default_latitude_column() -> String {
    "Latitude".to_string()
}

fn default_filter_columns() -> Vec<String> {
    vec![default_location_column(), default_event_type_column()]
}

fn default_title() -> String {
    "Protest".to_string()
}

fn default_width() -> u32 {
    600
}

fn default_height() -> u32 {
    700
}

fn default_x_range() -> (f64, f64) {
    (-2_450_000.0, 6_450_000.0)
}

fn default_y_range() -> (f64, f64) {
    (-4_300_000.0, 4_600_000.0)
}

fn default_tile_url() -> String {
    "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string()
}

fn default_tile_attribution() -> String {
    "&copy; OpenStreetMap contributors".to_string()
}

fn default_marker_size() -> f64 {
    6.0
}

fn default_marker_fill() -> String {
    "purple".to_string()
}

fn default_marker_fill_opacity() -> f64 {
    0.5
}

fn default_marker_line() -> String {
    "gray".to_string()
}

fn default_marker_line_opacity() -> f64 {
    0.5
}

fn default_hover_radius() -> f64 {
    8.0
}

fn default_embed_fragment() -> PathBuf {
    PathBuf::from("site/_includes/map/map.html")
}

fn default_embed_header() -> PathBuf {
    PathBuf::from("site/_includes/map_heading.html")
}

fn default_standalone() -> PathBuf {
    PathBuf::from("map-standalone.html")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input: InputConfig::default(),
            map: MapConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            protests: default_protests(),
            nations: default_nations(),
            watch_dir: default_watch_dir(),
            nation_name_property: default_nation_name_property(),
            description_column: default_description_column(),
            location_column: default_location_column(),
            event_type_column: default_event_type_column(),
            longitude_column: default_longitude_column(),
            latitude_column: default_latitude_column(),
            filter_columns: default_filter_columns(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
            x_range: default_x_range(),
            y_range: default_y_range(),
            tile_url: default_tile_url(),
            tile_attribution: default_tile_attribution(),
            marker_size: default_marker_size(),
            marker_fill: default_marker_fill(),
            marker_fill_opacity: default_marker_fill_opacity(),
            marker_line: default_marker_line(),
            marker_line_opacity: default_marker_line_opacity(),
            hover_radius: default_hover_radius(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            embed_fragment: default_embed_fragment(),
            embed_header: default_embed_header(),
            standalone: default_standalone(),
        }
    }
}

impl AppConfig {
    /// Load configuration from an explicit path, or fall back to built-in
    /// defaults when no path is given and the default file is absent.
    ///
    /// An explicitly named file must exist; a missing `map.toml` is fine.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from_file(p),
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::load_from_file(default)
                } else {
                    let config = Self::default();
                    config.validate()?;
                    Ok(config)
                }
            }
        }
    }

    /// Parse and validate a TOML config file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ProtestMapError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config: AppConfig = toml::from_str(&content).map_err(|e| {
            ProtestMapError::ConfigError(format!(
                "Failed to parse {}: {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configs the rest of the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        check_color("map.marker_fill", &self.map.marker_fill)?;
        check_color("map.marker_line", &self.map.marker_line)?;
        check_opacity("map.marker_fill_opacity", self.map.marker_fill_opacity)?;
        check_opacity("map.marker_line_opacity", self.map.marker_line_opacity)?;

        if self.map.x_range.0 >= self.map.x_range.1 {
            return Err(ProtestMapError::ConfigError(format!(
                "map.x_range must be (min, max), got ({}, {})",
                self.map.x_range.0, self.map.x_range.1
            )));
        }
        if self.map.y_range.0 >= self.map.y_range.1 {
            return Err(ProtestMapError::ConfigError(format!(
                "map.y_range must be (min, max), got ({}, {})",
                self.map.y_range.0, self.map.y_range.1
            )));
        }
        if self.map.width == 0 || self.map.height == 0 {
            return Err(ProtestMapError::ConfigError(
                "map.width and map.height must be positive".to_string(),
            ));
        }
        if self.map.marker_size <= 0.0 {
            return Err(ProtestMapError::ConfigError(format!(
                "map.marker_size must be positive, got {}",
                self.map.marker_size
            )));
        }
        if self.map.hover_radius <= 0.0 {
            return Err(ProtestMapError::ConfigError(format!(
                "map.hover_radius must be positive, got {}",
                self.map.hover_radius
            )));
        }
        if self.input.filter_columns.is_empty() {
            return Err(ProtestMapError::ConfigError(
                "input.filter_columns must name at least one column".to_string(),
            ));
        }
        Ok(())
    }
}

fn check_color(field: &str, value: &str) -> Result<()> {
    csscolorparser::parse(value).map_err(|e| {
        ProtestMapError::ConfigError(format!("{} is not a CSS color ('{}'): {}", field, value, e))
    })?;
    Ok(())
}

fn check_opacity(field: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ProtestMapError::ConfigError(format!(
            "{} must be between 0 and 1, got {}",
            field, value
        )));
    }
    Ok(())
}
