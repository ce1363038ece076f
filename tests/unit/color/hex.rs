use super::*;

fn components(rgba: &str) -> (u8, u8, u8, f32) {
    let inner = rgba
        .strip_prefix("rgba(")
        .and_then(|s| s.strip_suffix(')'))
        .unwrap();
    let parts: Vec<&str> = inner.split(", ").collect();
    assert_eq!(parts.len(), 4, "unexpected rgba string {rgba}");
    (
        parts[0].parse().unwrap(),
        parts[1].parse().unwrap(),
        parts[2].parse().unwrap(),
        parts[3].parse().unwrap(),
    )
}

#[test]
fn rgba_components_match_decoded_hex() {
    let samples = [
        ("#000000", (0, 0, 0)),
        ("#FFFFFF", (255, 255, 255)),
        ("#0079CE", (0, 121, 206)),
        ("#0079ce", (0, 121, 206)),
        ("#FECA43", (254, 202, 67)),
        ("#b60261", (182, 2, 97)),
    ];
    for (hex, (r, g, b)) in samples {
        let s = hex_to_rgba_with_alpha(hex, BORDER_ALPHA).unwrap();
        assert_eq!(components(&s), (r, g, b, 0.4), "{hex}");
        assert!(s.ends_with(", 0.4)"), "{s}");
    }
}

#[test]
fn every_channel_value_survives() {
    for v in 0u8..=255 {
        let hex = format!("#{v:02x}{:02X}{v:02X}", 255 - v);
        let (r, g, b, a) = components(&hex_to_rgba_with_alpha(&hex, 0.4).unwrap());
        assert_eq!((r, g, b), (v, 255 - v, v));
        assert_eq!(a, 0.4);
    }
}

#[test]
fn malformed_colors_are_rejected() {
    let bad = [
        "", "#", "0079CE", "#0079C", "#0079CE0", "#0079CEFF", "#FFF", "FFF", "#GG0000",
        "#00 9CE", " #0079CE", "#0079CE ", "rgb(0,0,0)", "#+12345", "#１２３４５６",
    ];
    for s in bad {
        let err = Rgb8::parse_hex(s).unwrap_err();
        assert!(
            matches!(err, ThumbError::InvalidColor(_)),
            "{s:?} gave {err:?}"
        );
        assert!(matches!(
            hex_to_rgba_with_alpha(s, 0.4),
            Err(ThumbError::InvalidColor(_))
        ));
    }
}

#[test]
fn alpha_out_of_range_is_rejected() {
    assert!(hex_to_rgba_with_alpha("#000000", 1.5).is_err());
    assert!(hex_to_rgba_with_alpha("#000000", f32::NAN).is_err());
}

#[test]
fn to_hex_is_uppercase_canonical() {
    let c = Rgb8::parse_hex("#0a0b0c").unwrap();
    assert_eq!(c.to_hex(), "#0A0B0C");
    assert_eq!(c.to_string(), "#0A0B0C");
    assert_eq!("#0A0B0C".parse::<Rgb8>().unwrap(), c);
}

#[test]
fn serde_uses_hex_strings() {
    let c: Rgb8 = serde_json::from_str("\"#E0067B\"").unwrap();
    assert_eq!(c, Rgb8::new(0xE0, 0x06, 0x7B));
    assert_eq!(serde_json::to_string(&c).unwrap(), "\"#E0067B\"");
    assert!(serde_json::from_str::<Rgb8>("\"E0067B\"").is_err());
}
