//! Lottie (Bodymovin JSON) rendition of the loader.
//!
//! The document is derived from the layout and oscillator timing alone, so it needs no mounted
//! preview scene. Only the subset of the format the loader uses is modelled.

use serde::{Deserialize, Serialize};

use crate::animation::ease::CubicBezierEase;
use crate::animation::oscillator::{AnimatedAttr, Oscillator, dot_oscillators};
use crate::export::artifact::{ARTIFACT_STEM, ExportArtifact};
use crate::foundation::color::Color;
use crate::foundation::error::LoaderResult;
use crate::spiral::layout::{LOGICAL_EXTENT, layout_dots};
use crate::spiral::options::SpiralOptions;
use crate::spiral::tier::{Tier, clamp_display_extent};

/// Frame rate of generated documents.
pub const LOTTIE_FRAME_RATE: f64 = 60.0;
/// Bodymovin schema version written into documents.
pub const LOTTIE_VERSION: &str = "5.7.4";

const LAYER_SHAPE: u8 = 4;
const LAYER_SOLID: u8 = 1;

/// Root of a Lottie document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LottieDocument {
    /// Schema version.
    #[serde(rename = "v")]
    pub version: String,
    /// Frames per second.
    #[serde(rename = "fr")]
    pub frame_rate: f64,
    /// In point, in frames.
    #[serde(rename = "ip")]
    pub in_point: f64,
    /// Out point, in frames.
    #[serde(rename = "op")]
    pub out_point: f64,
    /// Width in pixels.
    #[serde(rename = "w")]
    pub width: u32,
    /// Height in pixels.
    #[serde(rename = "h")]
    pub height: u32,
    /// Name.
    #[serde(rename = "nm")]
    pub name: String,
    /// 3D flag, always 0.
    pub ddd: u8,
    /// Asset list, always empty.
    pub assets: Vec<serde_json::Value>,
    /// Layers, top-most first.
    pub layers: Vec<Layer>,
}

/// A shape layer (one dot) or a solid layer (the background).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// 3D flag, always 0.
    pub ddd: u8,
    /// 1-based layer index.
    #[serde(rename = "ind")]
    pub index: u32,
    /// Layer type: 4 for shapes, 1 for solids.
    #[serde(rename = "ty")]
    pub kind: u8,
    /// Layer name.
    #[serde(rename = "nm")]
    pub name: String,
    /// Time stretch.
    #[serde(rename = "sr")]
    pub stretch: f64,
    /// Layer transform.
    #[serde(rename = "ks")]
    pub transform: LayerTransform,
    /// Auto-orient flag.
    #[serde(rename = "ao")]
    pub auto_orient: u8,
    /// Shape items of a shape layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shapes: Option<Vec<ShapeItem>>,
    /// Solid colour of a solid layer.
    #[serde(rename = "sc", default, skip_serializing_if = "Option::is_none")]
    pub solid_color: Option<String>,
    /// Solid width.
    #[serde(rename = "sw", default, skip_serializing_if = "Option::is_none")]
    pub solid_width: Option<u32>,
    /// Solid height.
    #[serde(rename = "sh", default, skip_serializing_if = "Option::is_none")]
    pub solid_height: Option<u32>,
    /// In point, in frames.
    #[serde(rename = "ip")]
    pub in_point: f64,
    /// Out point, in frames.
    #[serde(rename = "op")]
    pub out_point: f64,
    /// Start time, in frames.
    #[serde(rename = "st")]
    pub start_time: f64,
    /// Blend mode, 0 = normal.
    #[serde(rename = "bm")]
    pub blend_mode: u8,
}

/// Transform block of a layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerTransform {
    /// Opacity, 0..100.
    #[serde(rename = "o")]
    pub opacity: Property,
    /// Rotation in degrees.
    #[serde(rename = "r")]
    pub rotation: Property,
    /// Position.
    #[serde(rename = "p")]
    pub position: Property,
    /// Anchor point.
    #[serde(rename = "a")]
    pub anchor: Property,
    /// Scale in percent.
    #[serde(rename = "s")]
    pub scale: Property,
}

impl LayerTransform {
    fn at(position: [f64; 2], opacity: Property) -> Self {
        Self {
            opacity,
            rotation: Property::fixed(PropertyValue::Scalar(0.0)),
            position: Property::fixed(PropertyValue::Vector(vec![position[0], position[1], 0.0])),
            anchor: Property::fixed(PropertyValue::Vector(vec![0.0, 0.0, 0.0])),
            scale: Property::fixed(PropertyValue::Vector(vec![100.0, 100.0, 100.0])),
        }
    }
}

/// A possibly animated value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// 1 when `k` holds keyframes.
    #[serde(rename = "a")]
    pub animated: u8,
    /// Static value or keyframes.
    #[serde(rename = "k")]
    pub value: PropertyValue,
}

impl Property {
    /// Static property.
    pub fn fixed(value: PropertyValue) -> Self {
        Self { animated: 0, value }
    }

    /// Keyframed property.
    pub fn keyframed(frames: Vec<Keyframe>) -> Self {
        Self {
            animated: 1,
            value: PropertyValue::Keyframes(frames),
        }
    }

    /// Keyframes, when animated.
    pub fn keyframes(&self) -> Option<&[Keyframe]> {
        match &self.value {
            PropertyValue::Keyframes(k) => Some(k),
            _ => None,
        }
    }
}

/// Payload of a [`Property`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Single number.
    Scalar(f64),
    /// Fixed vector.
    Vector(Vec<f64>),
    /// Keyframe list.
    Keyframes(Vec<Keyframe>),
}

/// One keyframe; the ease describes the segment towards the next keyframe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Time in frames.
    pub t: f64,
    /// Value at `t`.
    pub s: Vec<f64>,
    /// Incoming tangent (second control point).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub i: Option<Tangent>,
    /// Outgoing tangent (first control point).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub o: Option<Tangent>,
}

/// Bezier handle in normalized time/value space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tangent {
    /// Time coordinates.
    pub x: Vec<f64>,
    /// Value coordinates.
    pub y: Vec<f64>,
}

/// Shape items used inside a dot layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "ty")]
pub enum ShapeItem {
    /// Group of items.
    #[serde(rename = "gr")]
    Group {
        /// Group name.
        nm: String,
        /// Items, transform last.
        it: Vec<ShapeItem>,
    },
    /// Ellipse centred at `p` with size `s`.
    #[serde(rename = "el")]
    Ellipse {
        /// Centre.
        p: Property,
        /// Width and height.
        s: Property,
    },
    /// Solid fill.
    #[serde(rename = "fl")]
    Fill {
        /// Unit RGBA colour.
        c: Property,
        /// Opacity, 0..100.
        o: Property,
        /// Fill rule, 1 = non-zero.
        r: u8,
    },
    /// Group transform.
    #[serde(rename = "tr")]
    Transform {
        /// Position.
        p: Property,
        /// Anchor point.
        a: Property,
        /// Scale in percent.
        s: Property,
        /// Rotation in degrees.
        r: Property,
        /// Opacity, 0..100.
        o: Property,
    },
}

/// Keyframes reproducing `osc` over `[0, loop_end]` seconds.
///
/// Keyframes sit on every half period of the oscillator, starting at the last one at or before 0
/// and ending at the first one at or after `loop_end`.
pub fn oscillator_keyframes(
    osc: &Oscillator,
    loop_end: f64,
    to_value: impl Fn(f64) -> Vec<f64>,
) -> Vec<Keyframe> {
    let half = osc.dur / 2.0;
    if !(half > 0.0 && half.is_finite()) {
        return Vec::new();
    }
    let mut k = (-osc.begin / half).floor() as i64;
    let mut out = Vec::new();
    loop {
        let t = osc.begin + k as f64 * half;
        let v = if k.rem_euclid(2) == 0 {
            osc.values[0]
        } else {
            osc.values[1]
        };
        let last = t >= loop_end;
        out.push(Keyframe {
            t: t * LOTTIE_FRAME_RATE,
            s: to_value(v),
            i: (!last).then(|| in_tangent(&osc.ease)),
            o: (!last).then(|| out_tangent(&osc.ease)),
        });
        if last {
            break;
        }
        k += 1;
    }
    out
}

fn out_tangent(ease: &CubicBezierEase) -> Tangent {
    Tangent {
        x: vec![ease.x1],
        y: vec![ease.y1],
    }
}

fn in_tangent(ease: &CubicBezierEase) -> Tangent {
    Tangent {
        x: vec![ease.x2],
        y: vec![ease.y2],
    }
}

/// Build the animation document for a display extent.
///
/// One shape layer per dot, scaled like the raster backend, with the solid background last.
pub fn animation_document(
    display_extent: u32,
    options: &SpiralOptions,
) -> LoaderResult<LottieDocument> {
    options.validate()?;
    let extent = clamp_display_extent(display_extent);
    let tier = Tier::for_extent(extent);
    let scale = f64::from(extent) / LOGICAL_EXTENT;
    let duration = options.duration;
    let out_point = duration * LOTTIE_FRAME_RATE;

    let dots = layout_dots(&tier, duration);
    let mut layers = Vec::with_capacity(dots.len() + 1);
    for (i, dot) in dots.iter().enumerate() {
        let mut size = Vec::new();
        let mut opacity = Vec::new();
        for osc in dot_oscillators(dot, tier.dot_radius, duration) {
            match osc.attr {
                AnimatedAttr::Radius => {
                    size = oscillator_keyframes(&osc, duration, |r| {
                        vec![2.0 * r * scale, 2.0 * r * scale]
                    });
                }
                AnimatedAttr::Opacity => {
                    opacity = oscillator_keyframes(&osc, duration, |o| vec![o * 100.0]);
                }
            }
        }
        layers.push(dot_layer(
            i as u32 + 1,
            dot.index,
            [dot.center.x * scale, dot.center.y * scale],
            size,
            opacity,
            options.dot_color,
            out_point,
        ));
    }
    layers.push(background_layer(
        layers.len() as u32 + 1,
        extent,
        options.bg_color,
        out_point,
    ));

    Ok(LottieDocument {
        version: LOTTIE_VERSION.to_owned(),
        frame_rate: LOTTIE_FRAME_RATE,
        in_point: 0.0,
        out_point,
        width: extent,
        height: extent,
        name: ARTIFACT_STEM.to_owned(),
        ddd: 0,
        assets: Vec::new(),
        layers,
    })
}

/// Serialize [`animation_document`] into an artifact.
#[tracing::instrument(skip(options))]
pub fn export_animation_document(
    display_extent: u32,
    options: &SpiralOptions,
) -> LoaderResult<ExportArtifact> {
    let doc = animation_document(display_extent, options)?;
    let json = serde_json::to_vec(&doc)?;
    tracing::debug!(layers = doc.layers.len(), bytes = json.len(), "lottie document");
    Ok(ExportArtifact::lottie(json))
}

fn dot_layer(
    index: u32,
    dot_index: u32,
    center: [f64; 2],
    size: Vec<Keyframe>,
    opacity: Vec<Keyframe>,
    color: Color,
    out_point: f64,
) -> Layer {
    let [r, g, b, a] = color.to_unit_rgba();
    let fixed_vec = |v: Vec<f64>| Property::fixed(PropertyValue::Vector(v));
    let group = ShapeItem::Group {
        nm: "dot".to_owned(),
        it: vec![
            ShapeItem::Ellipse {
                p: fixed_vec(vec![0.0, 0.0]),
                s: Property::keyframed(size),
            },
            ShapeItem::Fill {
                c: fixed_vec(vec![r, g, b, 1.0]),
                o: Property::fixed(PropertyValue::Scalar(a * 100.0)),
                r: 1,
            },
            ShapeItem::Transform {
                p: fixed_vec(vec![0.0, 0.0]),
                a: fixed_vec(vec![0.0, 0.0]),
                s: fixed_vec(vec![100.0, 100.0]),
                r: Property::fixed(PropertyValue::Scalar(0.0)),
                o: Property::fixed(PropertyValue::Scalar(100.0)),
            },
        ],
    };
    Layer {
        ddd: 0,
        index,
        kind: LAYER_SHAPE,
        name: format!("dot {dot_index}"),
        stretch: 1.0,
        transform: LayerTransform::at(center, Property::keyframed(opacity)),
        auto_orient: 0,
        shapes: Some(vec![group]),
        solid_color: None,
        solid_width: None,
        solid_height: None,
        in_point: 0.0,
        out_point,
        start_time: 0.0,
        blend_mode: 0,
    }
}

fn background_layer(index: u32, extent: u32, color: Color, out_point: f64) -> Layer {
    let opacity = f64::from(color.a) / 255.0 * 100.0;
    Layer {
        ddd: 0,
        index,
        kind: LAYER_SOLID,
        name: "background".to_owned(),
        stretch: 1.0,
        transform: LayerTransform::at([0.0, 0.0], Property::fixed(PropertyValue::Scalar(opacity))),
        auto_orient: 0,
        shapes: None,
        solid_color: Some(color.with_alpha(255).to_hex()),
        solid_width: Some(extent),
        solid_height: Some(extent),
        in_point: 0.0,
        out_point,
        start_time: 0.0,
        blend_mode: 0,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/lottie.rs"]
mod tests;
