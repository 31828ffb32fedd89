use anyhow::Context as _;

use crate::foundation::error::{LoaderError, LoaderResult};
use crate::render::backend::FrameRGBA;

/// Rasterize static SVG markup to a `width × height` premultiplied frame.
///
/// Used to cross-check the live scene (frozen at an instant) against the CPU backend. SMIL
/// animation elements are ignored by the rasterizer, so animated markup renders its static
/// attributes.
pub fn rasterize_svg(markup: &str, width: u32, height: u32) -> LoaderResult<FrameRGBA> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_str(markup, &opts).context("parse svg tree")?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        LoaderError::surface(format!("failed to allocate {width}x{height} svg pixmap"))
    })?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    Ok(FrameRGBA {
        width,
        height,
        data: pixmap.data().to_vec(),
        premultiplied: true,
    })
}
