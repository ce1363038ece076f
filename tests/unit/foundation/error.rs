use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ThumbError::invalid_color("x")
            .to_string()
            .contains("invalid color:")
    );
    assert!(
        ThumbError::unknown_preset("x")
            .to_string()
            .contains("unknown preset:")
    );
    assert!(ThumbError::render("x").to_string().contains("render error:"));
    assert!(
        ThumbError::missing_asset("x")
            .to_string()
            .contains("missing asset:")
    );
    assert!(
        ThumbError::invalid_row("x")
            .to_string()
            .contains("invalid row:")
    );
}

#[test]
fn invalid_field_names_the_field() {
    let err = ThumbError::invalid_field("primaryColor", "bad hex");
    let msg = err.to_string();
    assert!(msg.contains("'primaryColor'"));
    assert!(msg.contains("bad hex"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ThumbError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
