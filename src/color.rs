//! Hex colours and the per-channel linear interpolation used by the sky.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::foundation::{
    core::Rgba8Premul,
    error::{RecorderError, RecorderResult},
};

/// Opaque sRGB colour, written as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` (case-insensitive, `#` optional).
    pub fn from_hex(s: &str) -> RecorderResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 || !s.is_ascii() {
            return Err(RecorderError::validation(format!(
                "hex color must be #RRGGBB, got \"{s}\""
            )));
        }

        fn hex_byte(pair: &str) -> RecorderResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| RecorderError::validation(format!("invalid hex byte \"{pair}\"")))
        }

        Ok(Self {
            r: hex_byte(&s[0..2])?,
            g: hex_byte(&s[2..4])?,
            b: hex_byte(&s[4..6])?,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Premultiplied pixel at the given opacity in [0,1].
    pub fn with_opacity(self, opacity: f32) -> Rgba8Premul {
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, a)
    }

    pub fn opaque(self) -> Rgba8Premul {
        self.with_opacity(1.0)
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb8 {
    type Err = RecorderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Rgb8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Linear per-channel blend from `a` (factor 0) to `b` (factor 1).
///
/// The factor is not clamped: values outside [0,1] extrapolate, and the
/// resulting channels saturate at 0 and 255.
pub fn interpolate_color(a: Rgb8, b: Rgb8, factor: f64) -> Rgb8 {
    fn lerp_channel(c1: u8, c2: u8, t: f64) -> u8 {
        let c1 = f64::from(c1);
        let c2 = f64::from(c2);
        // Half-up rounding.
        let v = (c1 + t * (c2 - c1) + 0.5).floor();
        v.clamp(0.0, 255.0) as u8
    }

    Rgb8 {
        r: lerp_channel(a.r, b.r, factor),
        g: lerp_channel(a.g, b.g, factor),
        b: lerp_channel(a.b, b.b, factor),
    }
}

/// String form of [`interpolate_color`]: `#rrggbb` in, `#rrggbb` out.
pub fn interpolate_hex(color1: &str, color2: &str, factor: f64) -> RecorderResult<String> {
    let a = Rgb8::from_hex(color1)?;
    let b = Rgb8::from_hex(color2)?;
    Ok(interpolate_color(a, b, factor).to_hex())
}

pub mod named {
    use super::Rgb8;

    pub const PEACH_PUFF: Rgb8 = Rgb8::new(0xff, 0xda, 0xb9);
    pub const LIGHT_SALMON: Rgb8 = Rgb8::new(0xff, 0xa0, 0x7a);
    pub const SKY_BLUE: Rgb8 = Rgb8::new(0x87, 0xce, 0xeb);
    pub const LIGHT_BLUE: Rgb8 = Rgb8::new(0xad, 0xd8, 0xe6);
    pub const TOMATO: Rgb8 = Rgb8::new(0xff, 0x63, 0x47);
    pub const YELLOW: Rgb8 = Rgb8::new(0xff, 0xff, 0x00);
    pub const ORANGE: Rgb8 = Rgb8::new(0xff, 0xa5, 0x00);
    pub const CLOUD_GREY: Rgb8 = Rgb8::new(0xcc, 0xcc, 0xcc);
    pub const LINEN: Rgb8 = Rgb8::new(0xfa, 0xf0, 0xe6);
    pub const SADDLE_BROWN: Rgb8 = Rgb8::new(0x8b, 0x45, 0x13);
    pub const LABEL_GREY: Rgb8 = Rgb8::new(0x33, 0x33, 0x33);
    pub const SCORCH: Rgb8 = Rgb8::new(0x5a, 0x2d, 0x0c);
}
