use crate::export::artifact::ExportArtifact;
use crate::foundation::color::Color;
use crate::foundation::error::{LoaderError, LoaderResult};
use crate::scene::host::PreviewHost;
use crate::scene::markup::{XML_DECLARATION, insert_after_root_open};

/// Opacity the snapshot style pins every circle to.
pub const SNAPSHOT_OPACITY: f64 = 0.6;

/// Resting style injected into snapshots so viewers that ignore SMIL still show every dot.
pub fn snapshot_style(dot_color: Color) -> String {
    format!("<style>circle {{ fill: {dot_color}; opacity: {SNAPSHOT_OPACITY}; }}</style>")
}

/// Standalone SVG document cloned from the mounted preview scene.
///
/// The live scene is left untouched.
pub fn svg_snapshot(host: &PreviewHost, dot_color: Color) -> LoaderResult<ExportArtifact> {
    let scene = host
        .scene()
        .ok_or_else(|| LoaderError::validation("no preview scene is mounted"))?;
    let markup = scene.to_markup();
    let styled = insert_after_root_open(&markup, &snapshot_style(dot_color))
        .ok_or_else(|| LoaderError::validation("preview markup has no <svg> root"))?;
    tracing::debug!(circles = scene.circles.len(), "svg snapshot");
    Ok(ExportArtifact::svg(format!("{XML_DECLARATION}{styled}")))
}
