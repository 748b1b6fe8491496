//! protest-map: static interactive map generation for protest event data
//!
//! The crate turns two input files, a CSV of protest events and a GeoJSON
//! of national boundaries, into an embeddable HTML/JS map widget. The
//! pipeline is deliberately linear:
//!
//! ```text
//! reader  ->  aggregate + catalog  ->  plot  ->  writer
//! (load)      (per-nation counts,     (compose  (HTML fragment,
//!              filter choices)         figure)   script tags, standalone)
//! ```
//!
//! The `watch` module drives the pipeline repeatedly from a polling loop;
//! `pipeline` runs it once. All map rendering happens in the viewer's
//! browser: the writer emits the data payload plus bootstrap tags for a
//! CDN-hosted map library, and tile imagery is fetched at view time.

pub mod aggregate;
pub mod catalog;
pub mod config;
pub mod naming;
pub mod pipeline;
pub mod plot;
pub mod reader;
pub mod watch;
pub mod writer;

use thiserror::Error;

/// Crate version string, shown by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Errors produced by the protest-map pipeline.
///
/// The taxonomy is intentionally small: bad input data, failed output
/// writes, and bad configuration. All of them are fatal to a standalone
/// run; the watch loop logs per-iteration failures and keeps polling.
#[derive(Error, Debug)]
pub enum ProtestMapError {
    /// Missing or malformed input data (CSV rows, GeoJSON features).
    #[error("Data error: {0}")]
    DataError(String),

    /// Output write failure (permissions, missing directory).
    #[error("I/O error: {0}")]
    IoError(String),

    /// Figure could not be rendered to HTML.
    #[error("Writer error: {0}")]
    WriterError(String),

    /// Unusable configuration value.
    #[error("Config error: {0}")]
    ConfigError(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ProtestMapError>;

// Re-export the types most callers need so they can be used without
// spelling out the module path.
pub use catalog::FilterSpec;
pub use config::AppConfig;
pub use plot::MapFigure;
pub use reader::{Dataset, NationPolygon, ProtestRecord};
pub use writer::{HtmlWriter, Writer};
