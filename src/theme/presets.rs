use crate::color::Rgb8;
use crate::theme::model::{BackgroundMode, GradientDirection, Theme};

/// A named built-in theme.
#[derive(Clone, Copy, Debug)]
pub struct Preset {
    pub name: &'static str,
    pub theme: Theme,
}

const fn preset(
    name: &'static str,
    secondary: Rgb8,
    title: Rgb8,
    accent: Rgb8,
    border: Rgb8,
) -> Preset {
    Preset {
        name,
        theme: Theme::from_parts(
            BackgroundMode::Gradient,
            Rgb8::new(0xFF, 0xFF, 0xFF),
            secondary,
            GradientDirection::ToBottom,
            title,
            accent,
            accent,
            border,
        ),
    }
}

/// The fixed preset table. Every preset specifies all eight theme fields.
pub static PRESETS: [Preset; 4] = [
    preset(
        "yellow",
        Rgb8::new(0xFF, 0xF9, 0xE5),
        Rgb8::new(0xB0, 0x71, 0x01),
        Rgb8::new(0xF0, 0xAF, 0x0A),
        Rgb8::new(0xFE, 0xCA, 0x43),
    ),
    preset(
        "orange",
        Rgb8::new(0xFE, 0xF4, 0xEC),
        Rgb8::new(0xA6, 0x54, 0x21),
        Rgb8::new(0xD1, 0x6D, 0x10),
        Rgb8::new(0xE5, 0x7C, 0x1A),
    ),
    preset(
        "blue",
        Rgb8::new(0xE6, 0xF4, 0xFF),
        Rgb8::new(0x18, 0x4F, 0x81),
        Rgb8::new(0x00, 0x5D, 0xB1),
        Rgb8::new(0x00, 0x79, 0xCE),
    ),
    preset(
        "magenta",
        Rgb8::new(0xFF, 0xEB, 0xEB),
        Rgb8::new(0xB6, 0x02, 0x61),
        Rgb8::new(0xE0, 0x06, 0x7B),
        Rgb8::new(0xFF, 0x31, 0x9F),
    ),
];

/// Look up a preset by name, ignoring case and surrounding whitespace.
pub fn find_preset(name: &str) -> Option<&'static Preset> {
    let wanted = name.trim();
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(wanted))
}

pub fn preset_names() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|p| p.name)
}
