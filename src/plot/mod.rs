//! Figure types for the composed map visualization
//!
//! This module contains all the types that represent a composed protest map:
//! the map surface with its viewport and tiles, the protest point layer, the
//! hover interaction, the filter widgets, and the info panel.
//!
//! # Architecture
//!
//! The module is organized into submodules:
//!
//! - `figure` - Main MapFigure struct and the InfoPanel type
//! - `viewport` - Viewport ranges, interactive tools, and the tile source
//! - `layer` - Point layer, markers, and marker styling
//! - `hover` - Hover interaction parameters and panel wording
//! - `widget` - Selection widgets built from the filter catalog
//! - `mercator` - Spherical-Mercator coordinate conversion

pub mod figure;
pub mod hover;
pub mod layer;
pub mod mercator;
pub mod viewport;
pub mod widget;

// Re-export all types for convenience
pub use figure::*;
pub use hover::*;
pub use layer::*;
pub use viewport::*;
pub use widget::*;
