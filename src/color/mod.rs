//! Hex color parsing, derived translucent colors and icon recoloring.

pub(crate) mod hex;
pub(crate) mod recolor;

pub use hex::{BORDER_ALPHA, Rgb8, hex_to_rgba_with_alpha};
pub use recolor::{count_fill_attrs, recolor_svg_fills};
