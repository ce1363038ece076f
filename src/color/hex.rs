use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{ThumbError, ThumbResult};

/// Opacity applied to the border color for the frame stroke and the icon-row divider.
pub const BORDER_ALPHA: f32 = 0.4;

/// An opaque sRGB color that was parsed from `#RRGGBB`.
///
/// There is no way to build one from an unchecked string, so any `Rgb8` that reaches
/// markup generation is already safe to splice into an attribute value.
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

    /// Parse a strict `#RRGGBB` color (hex digits are case-insensitive).
    ///
    /// Short forms, a missing `#`, surrounding whitespace and alpha suffixes are all rejected.
    pub fn parse_hex(s: &str) -> ThumbResult<Self> {
        let Some(digits) = s.strip_prefix('#') else {
            return Err(ThumbError::invalid_color(format!(
                "\"{s}\" must start with '#'"
            )));
        };
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ThumbError::invalid_color(format!(
                "\"{s}\" must be '#' followed by exactly 6 hex digits"
            )));
        }

        fn hex_byte(pair: &str) -> ThumbResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| ThumbError::invalid_color(format!("invalid hex byte \"{pair}\"")))
        }

        Ok(Self {
            r: hex_byte(&digits[0..2])?,
            g: hex_byte(&digits[2..4])?,
            b: hex_byte(&digits[4..6])?,
        })
    }

    /// Canonical uppercase `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// CSS-style `rgba(r, g, b, a)` string at the given alpha.
    pub fn rgba_string(self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {alpha})", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb8 {
    type Err = ThumbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
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
        Self::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Parse `hex` and format it as an `rgba(...)` color at a fixed `alpha`.
///
/// Used to derive the translucent border color from a theme's border color.
pub fn hex_to_rgba_with_alpha(hex: &str, alpha: f32) -> ThumbResult<String> {
    if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
        return Err(ThumbError::invalid_color(format!(
            "alpha {alpha} must be within 0..=1"
        )));
    }
    Ok(Rgb8::parse_hex(hex)?.rgba_string(alpha))
}

#[cfg(test)]
#[path = "../../tests/unit/color/hex.rs"]
mod tests;
