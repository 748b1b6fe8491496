//! National boundary GeoJSON loader.
//!
//! Expects a FeatureCollection of (Multi)Polygons carrying the nation name
//! in a configurable property. Features without a usable name or with
//! non-polygonal geometry are skipped; an unparsable file is a data error.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use geo::MultiPolygon;
use geojson::GeoJson;
use tracing::debug;

use crate::{ProtestMapError, Result};

use super::NationPolygon;

/// Read the boundary GeoJSON at `path` into nation polygons.
///
/// Every returned nation starts with `protest_count == 0`.
pub fn load_nations(path: &Path, name_property: &str) -> Result<Vec<NationPolygon>> {
    let file = File::open(path).map_err(|e| {
        ProtestMapError::DataError(format!(
            "Failed to open nations GeoJSON {}: {}",
            path.display(),
            e
        ))
    })?;
    let reader = BufReader::new(file);

    // Loads the whole file into memory; boundary files are a few MB at most.
    let geojson = GeoJson::from_reader(reader).map_err(|e| {
        ProtestMapError::DataError(format!("Failed to parse {}: {}", path.display(), e))
    })?;

    let collection = match geojson {
        GeoJson::FeatureCollection(fc) => fc,
        _ => {
            return Err(ProtestMapError::DataError(format!(
                "{} must be a GeoJSON FeatureCollection",
                path.display()
            )))
        }
    };

    let mut nations = Vec::new();
    for feature in collection.features {
        let name = match feature
            .properties
            .as_ref()
            .and_then(|props| props.get(name_property))
        {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => {
                debug!("Skipping feature without '{}' property", name_property);
                continue;
            }
        };

        let geometry = match feature.geometry {
            Some(geometry) => {
                let converted: geo::Geometry<f64> = geometry.value.try_into().map_err(|e| {
                    ProtestMapError::DataError(format!(
                        "Invalid geometry for feature '{}': {}",
                        name, e
                    ))
                })?;
                match converted {
                    geo::Geometry::MultiPolygon(mp) => mp,
                    geo::Geometry::Polygon(p) => MultiPolygon::new(vec![p]),
                    _ => {
                        debug!("Skipping non-polygonal feature '{}'", name);
                        continue;
                    }
                }
            }
            None => continue,
        };

        nations.push(NationPolygon {
            name,
            geometry,
            protest_count: 0,
        });
    }

    Ok(nations)
}
