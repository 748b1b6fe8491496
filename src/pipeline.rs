//! End-to-end pipeline: load inputs, compose the figure, export output.
//!
//! One run is a straight line through the crate: read the protest CSV and
//! the nation GeoJSON, count protests per nation, collect the filter
//! catalog, compose the figure, render it, and write the files for the
//! requested mode. The watch loop calls the same entry point once per
//! detected change.

use tracing::info;

use crate::aggregate;
use crate::catalog;
use crate::config::AppConfig;
use crate::plot::MapFigure;
use crate::reader;
use crate::writer::{self, HtmlWriter, MapArtifacts, Writer};
use crate::Result;

/// Loads the inputs and renders them into output artifacts.
pub fn build_artifacts(config: &AppConfig) -> Result<MapArtifacts> {
    let mut dataset = reader::load_dataset(config)?;
    aggregate::count_protests(&dataset.protests, &mut dataset.nations);
    let filters = catalog::collect_filters(&dataset.protests, &config.input)?;
    let figure = MapFigure::compose(&dataset, &filters, &config.map);
    info!(
        "Composed figure: {} markers, {} filter widgets",
        figure.points.markers.len(),
        figure.widgets.len()
    );
    HtmlWriter::new().write(&figure)
}

/// One embed-mode run, producing the fragment and header include files.
pub fn generate_embed(config: &AppConfig) -> Result<()> {
    let artifacts = build_artifacts(config)?;
    writer::export_embed(&artifacts, &config.output)
}

/// One standalone run, producing a single self-contained page.
pub fn generate_standalone(config: &AppConfig) -> Result<()> {
    let artifacts = build_artifacts(config)?;
    writer::export_standalone(&artifacts, &config.output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{InputConfig, OutputConfig};
    use crate::ProtestMapError;
    use std::fs;
    use std::path::Path;

    const PROTESTS_CSV: &str = "\
Description,Location,Event Type,Longitude,Latitude
march on the square,Uptown College,March,0.5,0.5
overnight sit-in,Downtown University,Sit-in,0.25,0.75
";

    const NATIONS_GEOJSON: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {"name": "Atlantis"},
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]
            }
        }]
    }"#;

    fn config_in(dir: &Path) -> AppConfig {
        fs::write(dir.join("protests.csv"), PROTESTS_CSV).unwrap();
        fs::write(dir.join("nations.geojson"), NATIONS_GEOJSON).unwrap();
        AppConfig {
            input: InputConfig {
                protests: dir.join("protests.csv"),
                nations: dir.join("nations.geojson"),
                watch_dir: dir.to_path_buf(),
                ..InputConfig::default()
            },
            output: OutputConfig {
                embed_fragment: dir.join("map.html"),
                embed_header: dir.join("heading.html"),
                standalone: dir.join("standalone.html"),
            },
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_standalone_run_writes_single_page() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        generate_standalone(&config).unwrap();
        let page = fs::read_to_string(dir.path().join("standalone.html")).unwrap();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("march on the square"));
        assert!(page.contains("2 protests across 1 country"));
        assert!(page.contains("leaflet.js"));
        assert!(!dir.path().join("map.html").exists());
    }

    #[test]
    fn test_embed_run_writes_fragment_and_header() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        generate_embed(&config).unwrap();
        let fragment = fs::read_to_string(dir.path().join("map.html")).unwrap();
        let header = fs::read_to_string(dir.path().join("heading.html")).unwrap();
        assert!(fragment.contains("Uptown College"));
        assert!(header.contains("leaflet.js"));
        assert!(!fragment.contains("leaflet.js"));
        assert!(!dir.path().join("standalone.html").exists());
    }

    #[test]
    fn test_repeated_runs_are_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        generate_standalone(&config).unwrap();
        let first = fs::read(dir.path().join("standalone.html")).unwrap();
        generate_standalone(&config).unwrap();
        let second = fs::read(dir.path().join("standalone.html")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.input.protests = dir.path().join("absent.csv");
        let err = generate_embed(&config).unwrap_err();
        assert!(matches!(err, ProtestMapError::DataError(_)));
    }

    #[test]
    fn test_filter_widgets_follow_configured_columns() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let artifacts = build_artifacts(&config).unwrap();
        assert!(artifacts
            .fragment
            .contains("id=\"protest-map-filter-location\""));
        assert!(artifacts
            .fragment
            .contains("id=\"protest-map-filter-event-type\""));
    }
}
