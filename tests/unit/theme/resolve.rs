use super::*;
use crate::color::Rgb8;
use crate::theme::model::{BackgroundMode, GradientDirection};
use crate::theme::presets::PRESETS;

fn rgb(hex: &str) -> Rgb8 {
    Rgb8::parse_hex(hex).unwrap()
}

#[test]
fn empty_overrides_yield_the_default_theme() {
    let a = resolve(&PartialTheme::default(), None).unwrap();
    let b = resolve(&PartialTheme::default(), None).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, Theme::default());

    assert_eq!(a.background_mode(), BackgroundMode::Gradient);
    assert_eq!(a.primary_color(), rgb("#E6F4FF"));
    assert_eq!(a.secondary_color(), rgb("#CDE8FE"));
    assert_eq!(a.gradient_direction(), GradientDirection::ToBottom);
    assert_eq!(a.title_color(), rgb("#184F81"));
    assert_eq!(a.badge_color(), rgb("#0079CE"));
    assert_eq!(a.brand_color(), rgb("#0079CE"));
    assert_eq!(a.border_color(), rgb("#0079CE"));
}

#[test]
fn blank_values_count_as_absent() {
    let overrides = PartialTheme {
        primary_color: Some("   ".to_string()),
        gradient_direction: Some(String::new()),
        ..PartialTheme::default()
    };
    assert!(overrides.is_empty());
    assert_eq!(resolve(&overrides, Some("")).unwrap(), Theme::default());
}

#[test]
fn presets_resolve_to_their_table_entry() {
    for p in PRESETS.iter() {
        let t = resolve(&PartialTheme::default(), Some(p.name)).unwrap();
        assert_eq!(t, p.theme, "{}", p.name);
        assert_eq!(t.primary_color(), rgb("#FFFFFF"));
    }

    let blue = resolve(&PartialTheme::default(), Some("  BLUE ")).unwrap();
    assert_eq!(blue.badge_color(), rgb("#005DB1"));
    assert_eq!(blue.secondary_color(), rgb("#E6F4FF"));
}

#[test]
fn unknown_preset_fails() {
    let err = resolve(&PartialTheme::default(), Some("bogus")).unwrap_err();
    assert!(matches!(err, ThumbError::UnknownPreset(ref n) if n == "bogus"));
}

#[test]
fn overrides_win_over_preset_fields() {
    let overrides = PartialTheme {
        title_color: Some("#112233".to_string()),
        background_mode: Some("solid".to_string()),
        ..PartialTheme::default()
    };
    let t = resolve(&overrides, Some("magenta")).unwrap();
    assert_eq!(t.title_color(), rgb("#112233"));
    assert_eq!(t.background_mode(), BackgroundMode::Solid);
    // untouched fields keep the preset values
    assert_eq!(t.badge_color(), rgb("#E0067B"));
    assert_eq!(t.border_color(), rgb("#FF319F"));
}

#[test]
fn invalid_fields_are_named() {
    let cases = [
        (
            PartialTheme {
                primary_color: Some("E6F4FF".to_string()),
                ..PartialTheme::default()
            },
            "primaryColor",
        ),
        (
            PartialTheme {
                border_color: Some("#12345".to_string()),
                ..PartialTheme::default()
            },
            "borderColor",
        ),
        (
            PartialTheme {
                background_mode: Some("radial".to_string()),
                ..PartialTheme::default()
            },
            "backgroundMode",
        ),
        (
            PartialTheme {
                gradient_direction: Some("sideways".to_string()),
                ..PartialTheme::default()
            },
            "gradientDirection",
        ),
    ];

    for (overrides, expected) in cases {
        let err = resolve(&overrides, None).unwrap_err();
        match err {
            ThumbError::InvalidThemeField { field, .. } => assert_eq!(field, expected),
            other => panic!("expected InvalidThemeField for {expected}, got {other:?}"),
        }
        assert!(resolve(&overrides, Some("blue")).is_err());
    }
}

#[test]
fn gradient_direction_spellings() {
    let cases = [
        ("to bottom", GradientDirection::ToBottom),
        ("toBottom", GradientDirection::ToBottom),
        ("TO-TOP", GradientDirection::ToTop),
        ("to_right", GradientDirection::ToRight),
        ("to left", GradientDirection::ToLeft),
        ("diagonalDown", GradientDirection::DiagonalDown),
        ("-45deg", GradientDirection::DiagonalDown),
        ("diagonal up", GradientDirection::DiagonalUp),
        ("45deg", GradientDirection::DiagonalUp),
    ];
    for (token, expected) in cases {
        assert_eq!(token.parse::<GradientDirection>().unwrap(), expected, "{token}");
    }
    for d in GradientDirection::ALL {
        assert_eq!(d.as_token().parse::<GradientDirection>().unwrap(), d);
    }
}

#[test]
fn legacy_parameter_names_deserialize() {
    let json = serde_json::json!({
        "bgType": "solid",
        "bgColor1": "#FFFFFF",
        "textColor": "#000000",
        "verifiedColor": "#FF0000",
        "waygroundColor": "#00FF00",
        "borderColor": "#0000FF"
    });
    let overrides: PartialTheme = serde_json::from_value(json).unwrap();
    let t = resolve(&overrides, None).unwrap();
    assert_eq!(t.background_mode(), BackgroundMode::Solid);
    assert_eq!(t.badge_color(), rgb("#FF0000"));
    assert_eq!(t.brand_color(), rgb("#00FF00"));
    assert_eq!(t.border_color(), rgb("#0000FF"));
}
