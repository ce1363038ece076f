use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Rgb8;
use crate::foundation::error::{ThumbError, ThumbResult};

/// How the canvas background is filled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundMode {
    /// Flat fill with the primary color.
    Solid,
    /// Linear gradient from the primary to the secondary color.
    #[default]
    Gradient,
}

impl BackgroundMode {
    pub fn as_token(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Gradient => "gradient",
        }
    }
}

impl fmt::Display for BackgroundMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl FromStr for BackgroundMode {
    type Err = ThumbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solid" => Ok(Self::Solid),
            "gradient" => Ok(Self::Gradient),
            other => Err(ThumbError::invalid_field(
                "backgroundMode",
                format!("\"{other}\" is not one of: solid, gradient"),
            )),
        }
    }
}

/// Direction of the background gradient, from the primary toward the secondary color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientDirection {
    #[default]
    ToBottom,
    ToTop,
    ToRight,
    ToLeft,
    /// Top-left toward bottom-right.
    DiagonalDown,
    /// Bottom-left toward top-right.
    DiagonalUp,
}

impl GradientDirection {
    pub const ALL: [GradientDirection; 6] = [
        Self::ToBottom,
        Self::ToTop,
        Self::ToRight,
        Self::ToLeft,
        Self::DiagonalDown,
        Self::DiagonalUp,
    ];

    pub fn as_token(self) -> &'static str {
        match self {
            Self::ToBottom => "to bottom",
            Self::ToTop => "to top",
            Self::ToRight => "to right",
            Self::ToLeft => "to left",
            Self::DiagonalDown => "to bottom right",
            Self::DiagonalUp => "to top right",
        }
    }

    /// Gradient vector in unit bounding-box space: `(x1, y1, x2, y2)`.
    pub fn unit_vector(self) -> (f64, f64, f64, f64) {
        match self {
            Self::ToBottom => (0.0, 0.0, 0.0, 1.0),
            Self::ToTop => (0.0, 1.0, 0.0, 0.0),
            Self::ToRight => (0.0, 0.0, 1.0, 0.0),
            Self::ToLeft => (1.0, 0.0, 0.0, 0.0),
            Self::DiagonalDown => (0.0, 0.0, 1.0, 1.0),
            Self::DiagonalUp => (0.0, 1.0, 1.0, 0.0),
        }
    }
}

impl fmt::Display for GradientDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl FromStr for GradientDirection {
    type Err = ThumbError;

    /// Accepts CSS-like tokens (`to bottom`), camelCase (`toBottom`), kebab/snake case,
    /// the diagonal names, and the `45deg` / `-45deg` angles offered by the old form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().to_ascii_lowercase();
        match raw.as_str() {
            "45deg" => return Ok(Self::DiagonalUp),
            "-45deg" => return Ok(Self::DiagonalDown),
            _ => {}
        }

        let squashed: String = raw
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();
        match squashed.as_str() {
            "tobottom" | "bottom" => Ok(Self::ToBottom),
            "totop" | "top" => Ok(Self::ToTop),
            "toright" | "right" => Ok(Self::ToRight),
            "toleft" | "left" => Ok(Self::ToLeft),
            "diagonaldown" | "tobottomright" => Ok(Self::DiagonalDown),
            "diagonalup" | "totopright" => Ok(Self::DiagonalUp),
            _ => Err(ThumbError::invalid_field(
                "gradientDirection",
                format!(
                    "\"{}\" is not one of: to bottom, to top, to right, to left, \
                     diagonal down, diagonal up",
                    s.trim()
                ),
            )),
        }
    }
}

/// A complete, validated thumbnail theme.
///
/// Built by [`crate::theme::resolve`] (or taken from a preset) and never mutated afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    background_mode: BackgroundMode,
    primary_color: Rgb8,
    secondary_color: Rgb8,
    gradient_direction: GradientDirection,
    title_color: Rgb8,
    badge_color: Rgb8,
    brand_color: Rgb8,
    border_color: Rgb8,
}

impl Theme {
    #[allow(clippy::too_many_arguments)]
    pub(crate) const fn from_parts(
        background_mode: BackgroundMode,
        primary_color: Rgb8,
        secondary_color: Rgb8,
        gradient_direction: GradientDirection,
        title_color: Rgb8,
        badge_color: Rgb8,
        brand_color: Rgb8,
        border_color: Rgb8,
    ) -> Self {
        Self {
            background_mode,
            primary_color,
            secondary_color,
            gradient_direction,
            title_color,
            badge_color,
            brand_color,
            border_color,
        }
    }

    pub fn background_mode(&self) -> BackgroundMode {
        self.background_mode
    }

    pub fn primary_color(&self) -> Rgb8 {
        self.primary_color
    }

    /// Only meaningful for [`BackgroundMode::Gradient`].
    pub fn secondary_color(&self) -> Rgb8 {
        self.secondary_color
    }

    /// Only meaningful for [`BackgroundMode::Gradient`].
    pub fn gradient_direction(&self) -> GradientDirection {
        self.gradient_direction
    }

    pub fn title_color(&self) -> Rgb8 {
        self.title_color
    }

    pub fn badge_color(&self) -> Rgb8 {
        self.badge_color
    }

    pub fn brand_color(&self) -> Rgb8 {
        self.brand_color
    }

    pub fn border_color(&self) -> Rgb8 {
        self.border_color
    }
}

impl Default for Theme {
    /// Light blue gradient with brand-blue accents.
    fn default() -> Self {
        DEFAULT_THEME
    }
}

pub(crate) const DEFAULT_THEME: Theme = Theme::from_parts(
    BackgroundMode::Gradient,
    Rgb8::new(0xE6, 0xF4, 0xFF),
    Rgb8::new(0xCD, 0xE8, 0xFE),
    GradientDirection::ToBottom,
    Rgb8::new(0x18, 0x4F, 0x81),
    Rgb8::new(0x00, 0x79, 0xCE),
    Rgb8::new(0x00, 0x79, 0xCE),
    Rgb8::new(0x00, 0x79, 0xCE),
);

/// User-supplied theme overrides, still unvalidated.
///
/// Every field is raw text straight from a request, CLI flag or table cell. Empty and
/// whitespace-only values count as absent. The legacy form parameter names are accepted as
/// aliases.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialTheme {
    #[serde(alias = "background_mode", alias = "bgType")]
    pub background_mode: Option<String>,
    #[serde(alias = "primary_color", alias = "bgColor1")]
    pub primary_color: Option<String>,
    #[serde(alias = "secondary_color", alias = "bgColor2")]
    pub secondary_color: Option<String>,
    #[serde(alias = "gradient_direction")]
    pub gradient_direction: Option<String>,
    #[serde(alias = "title_color", alias = "textColor")]
    pub title_color: Option<String>,
    #[serde(alias = "badge_color", alias = "verifiedColor")]
    pub badge_color: Option<String>,
    #[serde(alias = "brand_color", alias = "waygroundColor")]
    pub brand_color: Option<String>,
    #[serde(alias = "border_color")]
    pub border_color: Option<String>,
}

impl PartialTheme {
    /// `true` when no field carries a non-blank value.
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, v)| v.is_none())
    }

    /// Field name and non-blank value, in declaration order.
    pub(crate) fn fields(&self) -> [(&'static str, Option<&str>); 8] {
        fn present(v: &Option<String>) -> Option<&str> {
            v.as_deref().map(str::trim).filter(|s| !s.is_empty())
        }

        [
            ("backgroundMode", present(&self.background_mode)),
            ("primaryColor", present(&self.primary_color)),
            ("secondaryColor", present(&self.secondary_color)),
            ("gradientDirection", present(&self.gradient_direction)),
            ("titleColor", present(&self.title_color)),
            ("badgeColor", present(&self.badge_color)),
            ("brandColor", present(&self.brand_color)),
            ("borderColor", present(&self.border_color)),
        ]
    }
}

/// Parse a color field, reporting failures against the field name.
pub(crate) fn parse_color_field(field: &'static str, value: &str) -> ThumbResult<Rgb8> {
    Rgb8::parse_hex(value).map_err(|e| match e {
        ThumbError::InvalidColor(reason) => ThumbError::invalid_field(field, reason),
        other => other,
    })
}
