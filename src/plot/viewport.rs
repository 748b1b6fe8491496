//! Viewport, interactive tools, and tile source for the map surface.

use crate::config::MapConfig;
use crate::plot::mercator;

/// Interactive tool enabled on the map surface.
///
/// The composed map carries exactly two tools, one per gesture: wheel
/// scrolling zooms and click-dragging pans. Both are active by default
/// so the map responds to either gesture without a toolbar selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Zoom on mouse-wheel scroll.
    WheelZoom,
    /// Pan on click-drag.
    DragPan,
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tool::WheelZoom => write!(f, "wheel_zoom"),
            Tool::DragPan => write!(f, "drag_pan"),
        }
    }
}

/// Raster tile source drawn underneath the protest layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSource {
    /// URL template with `{z}`, `{x}`, `{y}` placeholders.
    pub url_template: String,
    /// Attribution line shown on the map surface.
    pub attribution: String,
}

/// Bounding box in degrees, derived from the Mercator viewport ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LonLatBounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

/// Initial extent and fixed pixel size of the map surface.
///
/// Ranges are Web-Mercator meters. The extent describes what is visible
/// before any interaction; panning and zooming move past it freely.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Horizontal range in meters, `(min, max)`.
    pub x_range: (f64, f64),
    /// Vertical range in meters, `(min, max)`.
    pub y_range: (f64, f64),
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Tools enabled on the surface, all active.
    pub tools: Vec<Tool>,
}

impl Viewport {
    /// Builds the viewport from map configuration with both gesture tools
    /// enabled.
    pub fn from_config(map: &MapConfig) -> Self {
        Viewport {
            x_range: map.x_range,
            y_range: map.y_range,
            width: map.width,
            height: map.height,
            tools: vec![Tool::WheelZoom, Tool::DragPan],
        }
    }

    /// Converts the Mercator extent into degree bounds.
    pub fn lon_lat_bounds(&self) -> LonLatBounds {
        let (west, south) = mercator::to_lon_lat(self.x_range.0, self.y_range.0);
        let (east, north) = mercator::to_lon_lat(self.x_range.1, self.y_range.1);
        LonLatBounds {
            west,
            south,
            east,
            north,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_enables_both_gesture_tools() {
        let viewport = Viewport::from_config(&MapConfig::default());
        assert_eq!(viewport.tools, vec![Tool::WheelZoom, Tool::DragPan]);
        assert_eq!(viewport.width, 600);
        assert_eq!(viewport.height, 700);
    }

    #[test]
    fn test_default_extent_matches_configured_ranges() {
        let viewport = Viewport::from_config(&MapConfig::default());
        assert_eq!(viewport.x_range, (-2_450_000.0, 6_450_000.0));
        assert_eq!(viewport.y_range, (-4_300_000.0, 4_600_000.0));
    }

    #[test]
    fn test_lon_lat_bounds_orientation() {
        let viewport = Viewport::from_config(&MapConfig::default());
        let bounds = viewport.lon_lat_bounds();
        assert!(bounds.west < bounds.east);
        assert!(bounds.south < bounds.north);
        // The configured extent spans Africa and Europe, west of 60E.
        assert!(bounds.west < 0.0);
        assert!(bounds.east > 50.0);
    }

    #[test]
    fn test_tool_display_names() {
        assert_eq!(Tool::WheelZoom.to_string(), "wheel_zoom");
        assert_eq!(Tool::DragPan.to_string(), "drag_pan");
    }
}
