//! Output writers for composed map figures
//!
//! A writer renders a [`MapFigure`] into text artifacts; this module also
//! owns persisting those artifacts to the configured output paths. Two
//! publication modes share one rendering pass:
//!
//! - Embed: the widget fragment and the script-tag header are written to
//!   separate include files for a static-site build.
//! - Standalone: both parts are wrapped into one self-contained HTML page.
//!
//! Rendering the same figure twice yields byte-identical artifacts, so
//! regeneration only changes files when the inputs changed.

pub mod html;

pub use html::HtmlWriter;

use std::fs;
use std::path::Path;

use tracing::info;

use crate::config::OutputConfig;
use crate::plot::MapFigure;
use crate::{ProtestMapError, Result};

/// Common interface for map writers.
pub trait Writer {
    /// Render the figure into its output artifacts.
    fn write(&self, figure: &MapFigure) -> Result<MapArtifacts>;

    /// Check that the figure meets this writer's structural requirements.
    fn validate(&self, figure: &MapFigure) -> Result<()>;
}

/// Rendered text artifacts of one figure.
///
/// The fragment and the header are the embed-mode include files; the
/// standalone page is assembled from the same two parts so the modes can
/// never drift apart.
#[derive(Debug, Clone, PartialEq)]
pub struct MapArtifacts {
    /// Page title for the standalone document.
    pub title: String,
    /// Script and stylesheet tags that load the map runtime.
    pub script_header: String,
    /// Widget markup plus the inline script, without any runtime tags.
    pub fragment: String,
}

impl MapArtifacts {
    /// Wraps the header and the fragment into one complete HTML page.
    ///
    /// The trailing empty container is kept for site stylesheets that
    /// anchor on it.
    pub fn standalone_document(&self) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n{}</head>\n<body>\n{}<div id=\"map-hover-context\">\n</div>\n</body>\n</html>\n",
            html::escape_html(&self.title),
            self.script_header,
            self.fragment,
        )
    }
}

/// Writes the embed include files: the fragment and the script-tag header.
pub fn export_embed(artifacts: &MapArtifacts, output: &OutputConfig) -> Result<()> {
    write_file(&output.embed_fragment, &artifacts.fragment)?;
    write_file(&output.embed_header, &artifacts.script_header)?;
    Ok(())
}

/// Writes the standalone single-page document.
pub fn export_standalone(artifacts: &MapArtifacts, output: &OutputConfig) -> Result<()> {
    write_file(&output.standalone, &artifacts.standalone_document())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| {
        ProtestMapError::IoError(format!("Failed to write {}: {}", path.display(), e))
    })?;
    info!("Wrote {} ({} bytes)", path.display(), contents.len());
    Ok(())
}
