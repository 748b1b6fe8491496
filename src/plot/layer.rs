//! Point layer rendering every protest record as one marker.

use crate::config::MapConfig;
use crate::reader::ProtestRecord;

/// One rendered protest marker.
///
/// Markers carry their source attributes so the hover panel and the
/// filter widgets can address them client-side without a second lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Longitude in degrees.
    pub lon: f64,
    /// Latitude in degrees.
    pub lat: f64,
    pub description: String,
    pub location: String,
    pub event_type: String,
}

impl Marker {
    fn from_record(record: &ProtestRecord) -> Self {
        Marker {
            lon: record.point.x(),
            lat: record.point.y(),
            description: record.description.clone(),
            location: record.location.clone(),
            event_type: record.event_type.clone(),
        }
    }
}

/// Shared visual style for every marker in the layer.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    /// Marker diameter in pixels.
    pub size: f64,
    /// Fill color, any CSS color form.
    pub fill: String,
    pub fill_opacity: f64,
    /// Outline color.
    pub line: String,
    pub line_opacity: f64,
}

impl MarkerStyle {
    pub fn from_config(map: &MapConfig) -> Self {
        MarkerStyle {
            size: map.marker_size,
            fill: map.marker_fill.clone(),
            fill_opacity: map.marker_fill_opacity,
            line: map.marker_line.clone(),
            line_opacity: map.marker_line_opacity,
        }
    }
}

/// The protest layer: one marker per record, in record order.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLayer {
    pub markers: Vec<Marker>,
    pub style: MarkerStyle,
}

impl PointLayer {
    /// Builds the layer preserving the input record order.
    pub fn from_records(records: &[ProtestRecord], map: &MapConfig) -> Self {
        PointLayer {
            markers: records.iter().map(Marker::from_record).collect(),
            style: MarkerStyle::from_config(map),
        }
    }
}
