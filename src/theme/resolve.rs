use crate::foundation::error::{ThumbError, ThumbResult};
use crate::theme::model::{PartialTheme, Theme, parse_color_field};
use crate::theme::presets::find_preset;

/// Merge user overrides onto a base theme.
///
/// The base is the named preset when `preset` is given (unknown names fail with
/// [`ThumbError::UnknownPreset`]) and the default theme otherwise. Present override fields
/// always win over the base, in preset mode too. A present but unparseable field fails with
/// [`ThumbError::InvalidThemeField`] naming that field; nothing is partially applied.
pub fn resolve(overrides: &PartialTheme, preset: Option<&str>) -> ThumbResult<Theme> {
    let base = match preset.map(str::trim).filter(|p| !p.is_empty()) {
        Some(name) => {
            find_preset(name)
                .ok_or_else(|| ThumbError::unknown_preset(name))?
                .theme
        }
        None => Theme::default(),
    };
    apply_overrides(base, overrides)
}

fn apply_overrides(base: Theme, overrides: &PartialTheme) -> ThumbResult<Theme> {
    let mut background_mode = base.background_mode();
    let mut primary = base.primary_color();
    let mut secondary = base.secondary_color();
    let mut direction = base.gradient_direction();
    let mut title = base.title_color();
    let mut badge = base.badge_color();
    let mut brand = base.brand_color();
    let mut border = base.border_color();

    for (field, value) in overrides.fields() {
        let Some(value) = value else {
            continue;
        };
        match field {
            "backgroundMode" => background_mode = value.parse()?,
            "primaryColor" => primary = parse_color_field(field, value)?,
            "secondaryColor" => secondary = parse_color_field(field, value)?,
            "gradientDirection" => direction = value.parse()?,
            "titleColor" => title = parse_color_field(field, value)?,
            "badgeColor" => badge = parse_color_field(field, value)?,
            "brandColor" => brand = parse_color_field(field, value)?,
            "borderColor" => border = parse_color_field(field, value)?,
            other => {
                return Err(ThumbError::invalid_field(other, "unsupported theme field"));
            }
        }
    }

    Ok(Theme::from_parts(
        background_mode,
        primary,
        secondary,
        direction,
        title,
        badge,
        brand,
        border,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/theme/resolve.rs"]
mod tests;
