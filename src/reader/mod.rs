//! Input loading for the map pipeline.
//!
//! The reader turns the two configured input files into typed in-memory
//! tables:
//!
//! - `protests.rs` reads the protest events CSV into [`ProtestRecord`]s,
//! - `nations.rs` reads the boundary GeoJSON into [`NationPolygon`]s.
//!
//! Both loaders fail fast: a missing file or a malformed row is a
//! [`DataError`](crate::ProtestMapError::DataError), propagated to the
//! caller rather than recovered. The one tolerated irregularity is a
//! non-polygonal GeoJSON feature; boundary files routinely carry stray
//! points and lines, and those are skipped.

mod nations;
mod protests;

use geo::{MultiPolygon, Point};
use tracing::info;

use crate::config::AppConfig;
use crate::Result;

pub use nations::load_nations;
pub use protests::load_protests;

/// One protest event, immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtestRecord {
    /// Free-text description of the event.
    pub description: String,
    /// Human-readable location name (campus, city, venue).
    pub location: String,
    /// Event-type category.
    pub event_type: String,
    /// Geographic position, longitude/latitude degrees (WGS84).
    pub point: Point<f64>,
}

/// One nation's boundary with its derived protest count.
///
/// The count starts at zero and is written exactly once by
/// [`aggregate::count_protests`](crate::aggregate::count_protests).
#[derive(Debug, Clone)]
pub struct NationPolygon {
    pub name: String,
    pub geometry: MultiPolygon<f64>,
    pub protest_count: u32,
}

/// Both input tables for one pipeline run.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub protests: Vec<ProtestRecord>,
    pub nations: Vec<NationPolygon>,
}

/// Load both configured inputs.
pub fn load_dataset(config: &AppConfig) -> Result<Dataset> {
    let protests = load_protests(&config.input.protests, &config.input)?;
    info!(
        "Loaded {} protest records from {}",
        protests.len(),
        config.input.protests.display()
    );

    let nations = load_nations(&config.input.nations, &config.input.nation_name_property)?;
    info!(
        "Loaded {} nation boundaries from {}",
        nations.len(),
        config.input.nations.display()
    );

    Ok(Dataset { protests, nations })
}
