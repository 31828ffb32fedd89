use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{LoaderError, LoaderResult};

/// Straight-alpha RGBA8 colour.
///
/// Parses from `#RGB`, `#RRGGBB` or `#RRGGBBAA` strings and, in JSON, also from `{r,g,b,a}`
/// objects or `[r,g,b(,a)]` arrays with channels in `0..=1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (straight, not premultiplied).
    pub a: u8,
}

impl Color {
    /// Default dot colour of the loader.
    pub const BRAND_VIOLET: Self = Self::rgb(0x70, 0x42, 0xD2);
    /// Default dark background.
    pub const NIGHT: Self = Self::rgb(0x01, 0x01, 0x09);
    /// Light-theme background.
    pub const PAPER: Self = Self::rgb(0xF2, 0xF2, 0xF0);
    /// Reserved sentinel for colour-key transparency.
    pub const MAGENTA_KEY: Self = Self::rgb(0xFF, 0x00, 0xFF);

    /// Opaque colour from 8-bit channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Colour from 8-bit channels including alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex colour string.
    pub fn from_hex(s: &str) -> LoaderResult<Self> {
        parse_hex(s).map_err(LoaderError::validation)
    }

    /// Lowercase hex form: `#rrggbb`, or `#rrggbbaa` when not opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Same colour with the alpha replaced.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Channels as an array in RGBA order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Channels normalized to `0..=1`, RGBA order.
    pub fn to_unit_rgba(self) -> [f64; 4] {
        self.to_array().map(|c| f64::from(c) / 255.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = LoaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            RgbaObj {
                r: f64,
                g: f64,
                b: f64,
                #[serde(default = "one")]
                a: f64,
            },
            Arr(Vec<f64>),
        }

        fn one() -> f64 {
            1.0
        }

        fn unit(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Self::rgba(unit(r), unit(g), unit(b), unit(a))),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::rgba(unit(*r), unit(*g), unit(*b), 255)),
                [r, g, b, a] => Ok(Self::rgba(unit(*r), unit(*g), unit(*b), unit(*a))),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

fn parse_hex(s: &str) -> Result<Color, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if !s.is_ascii() {
        return Err(format!("invalid hex color \"{s}\""));
    }

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    match s.len() {
        3 => {
            let mut out = [0u8; 3];
            for (slot, i) in out.iter_mut().zip(0..3) {
                let nibble = hex_byte(&s[i..i + 1])?;
                *slot = nibble * 17;
            }
            Ok(Color::rgb(out[0], out[1], out[2]))
        }
        6 => Ok(Color::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(Color::rgba(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        )),
        _ => Err("hex color must be #RGB, #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
