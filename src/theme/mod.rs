//! Theme model, built-in presets and the override resolver.

pub(crate) mod model;
pub(crate) mod presets;
pub(crate) mod resolve;

pub use model::{BackgroundMode, GradientDirection, PartialTheme, Theme};
pub use presets::{PRESETS, Preset, find_preset, preset_names};
pub use resolve::resolve;
