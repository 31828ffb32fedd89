use std::fmt::Write as _;

use crate::foundation::color::Color;
use crate::scene::model::{SceneCircle, SvgScene};

/// SVG namespace URI.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
/// XML declaration prefixed to standalone SVG documents.
pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Serialization options for [`SvgScene::to_markup_with`].
#[derive(Clone, Debug, Default)]
pub struct MarkupOpts {
    /// Explicit pixel size for the root element; `None` keeps the responsive `100%` sizing.
    pub pixel_size: Option<u32>,
    /// Background rectangle painted behind every circle.
    pub background: Option<Color>,
}

impl SvgScene {
    /// Responsive markup exactly as mounted in a preview container.
    pub fn to_markup(&self) -> String {
        self.to_markup_with(&MarkupOpts::default())
    }

    /// Serialize the scene to SVG markup.
    pub fn to_markup_with(&self, opts: &MarkupOpts) -> String {
        let vb = self.view_box;
        let (w, h) = match opts.pixel_size {
            Some(px) => (px.to_string(), px.to_string()),
            None => ("100%".to_owned(), "100%".to_owned()),
        };

        let mut out = String::with_capacity(256 + self.circles.len() * 420);
        let _ = write!(
            out,
            "<svg xmlns=\"{SVG_NS}\" viewBox=\"0 0 {vb} {vb}\" width=\"{w}\" height=\"{h}\" \
             preserveAspectRatio=\"xMidYMid meet\">"
        );
        if let Some(bg) = opts.background {
            let _ = write!(
                out,
                "<rect x=\"0\" y=\"0\" width=\"{vb}\" height=\"{vb}\"{}/>",
                paint_attrs(bg)
            );
        }
        for c in &self.circles {
            write_circle(&mut out, c);
        }
        out.push_str("</svg>");
        out
    }
}

fn write_circle(out: &mut String, c: &SceneCircle) {
    let _ = write!(
        out,
        "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{}",
        c.cx,
        c.cy,
        c.r,
        paint_attrs(c.fill)
    );
    if let Some(o) = c.opacity {
        let _ = write!(out, " opacity=\"{o}\"");
    }
    if c.animations.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    for a in &c.animations {
        let _ = write!(
            out,
            "<animate attributeName=\"{}\" values=\"{}\" dur=\"{}s\" begin=\"{}s\" \
             repeatCount=\"indefinite\" calcMode=\"spline\" keySplines=\"{}\"/>",
            a.attr.svg_name(),
            a.values_attr(),
            a.dur,
            a.begin,
            a.key_splines_attr()
        );
    }
    out.push_str("</circle>");
}

// SVG 1.1 renderers ignore alpha in hex fills, so translucency goes to fill-opacity.
fn paint_attrs(color: Color) -> String {
    let hex = color.with_alpha(255).to_hex();
    if color.a == 255 {
        format!(" fill=\"{hex}\"")
    } else {
        format!(
            " fill=\"{hex}\" fill-opacity=\"{}\"",
            f64::from(color.a) / 255.0
        )
    }
}

/// Insert `fragment` directly after the root `<svg ...>` start tag.
///
/// Returns `None` when `markup` has no `<svg` element.
pub fn insert_after_root_open(markup: &str, fragment: &str) -> Option<String> {
    let start = markup.find("<svg")?;
    let end = start + markup[start..].find('>')? + 1;
    let mut out = String::with_capacity(markup.len() + fragment.len());
    out.push_str(&markup[..end]);
    out.push_str(fragment);
    out.push_str(&markup[end..]);
    Some(out)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/markup.rs"]
mod tests;
