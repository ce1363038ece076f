use super::*;
use crate::color::Rgb8;
use crate::theme::{GradientDirection, PartialTheme, resolve};

fn store() -> AssetStore {
    AssetStore::load_dir(std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("assets")).unwrap()
}

fn compose(theme: &Theme, opts: ComposerOpts) -> Scene {
    let store = store();
    LayoutComposer::new(opts)
        .compose("Fractions Quiz", theme, &Decorations::from_store(&store))
        .unwrap()
}

#[test]
fn nodes_come_in_paint_order() {
    let scene = compose(&Theme::default(), ComposerOpts::default());
    let kinds: Vec<&str> = scene
        .nodes()
        .iter()
        .map(|n| match n {
            SceneNode::Background { .. } => "background",
            SceneNode::Overlay { .. } => "overlay",
            SceneNode::IconRow { .. } => "icon_row",
            SceneNode::Icon { .. } => "icon",
            SceneNode::Bar { .. } => "bar",
            SceneNode::Text(_) => "text",
            SceneNode::Frame { .. } => "frame",
        })
        .collect();
    assert_eq!(kinds, ["background", "icon_row", "text", "frame"]);
    assert_eq!(scene.canvas(), Canvas::THUMBNAIL);
    assert_eq!(scene.corner_radius(), 40.0);
}

#[test]
fn gradient_background_uses_both_colors_and_direction() {
    let scene = compose(&Theme::default(), ComposerOpts::default());
    let SceneNode::Background { rect, paint } = &scene.nodes()[0] else {
        panic!("expected background first");
    };
    assert_eq!(*rect, Canvas::THUMBNAIL.rect());
    assert_eq!(
        *paint,
        Paint::LinearGradient {
            from: Rgb8::new(0xE6, 0xF4, 0xFF),
            to: Rgb8::new(0xCD, 0xE8, 0xFE),
            direction: GradientDirection::ToBottom,
        }
    );
}

#[test]
fn solid_background_ignores_secondary_and_direction() {
    let a = resolve(
        &PartialTheme {
            background_mode: Some("solid".into()),
            primary_color: Some("#112233".into()),
            secondary_color: Some("#FF0000".into()),
            gradient_direction: Some("to right".into()),
            ..PartialTheme::default()
        },
        None,
    )
    .unwrap();
    let b = resolve(
        &PartialTheme {
            background_mode: Some("solid".into()),
            primary_color: Some("#112233".into()),
            secondary_color: Some("#00FF00".into()),
            gradient_direction: Some("to top".into()),
            ..PartialTheme::default()
        },
        None,
    )
    .unwrap();

    let sa = compose(&a, ComposerOpts::default());
    let sb = compose(&b, ComposerOpts::default());
    assert_eq!(sa, sb);
    let SceneNode::Background { paint, .. } = &sa.nodes()[0] else {
        panic!("expected background first");
    };
    assert_eq!(*paint, Paint::Solid(Rgb8::new(0x11, 0x22, 0x33)));
}

#[test]
fn icon_row_geometry_and_colors() {
    let theme = resolve(&PartialTheme::default(), Some("magenta")).unwrap();
    let scene = compose(&theme, ComposerOpts::default());
    let SceneNode::IconRow { rect, children } = &scene.nodes()[1] else {
        panic!("expected icon row");
    };
    assert_eq!((rect.x0, rect.y0, rect.height()), (69.0, 49.0, 96.0));
    assert_eq!(children.len(), 3);

    let SceneNode::Icon { rect: badge, markup } = &children[0] else {
        panic!("expected badge icon");
    };
    assert_eq!((badge.x0, badge.width(), badge.height()), (69.0, 96.0, 96.0));
    assert!(markup.contains(r##"fill="#E0067B""##));
    assert!(!markup.contains("#0079CE"));

    let SceneNode::Bar { rect: bar, fill } = &children[1] else {
        panic!("expected divider");
    };
    assert_eq!((bar.x0, bar.width(), bar.height()), (201.0, 4.0, 96.0));
    assert_eq!(fill, "rgba(255, 49, 159, 0.4)");

    let SceneNode::Text(label) = &children[2] else {
        panic!("expected label");
    };
    assert_eq!(label.text, DEFAULT_LABEL);
    assert_eq!(label.rect.x0, 251.0);
    assert_eq!(label.font_size, 48.0);
    assert_eq!(label.color, theme.badge_color());
    assert_eq!(label.v_align, VAlign::Center);
}

#[test]
fn brand_icon_tail_is_recolored_and_keeps_aspect() {
    let theme = resolve(&PartialTheme::default(), Some("orange")).unwrap();
    let scene = compose(
        &theme,
        ComposerOpts {
            icon_row: IconRowTail::BrandIcon,
        },
    );
    let SceneNode::IconRow { children, .. } = &scene.nodes()[1] else {
        panic!("expected icon row");
    };
    let SceneNode::Icon { rect, markup } = &children[2] else {
        panic!("expected brand icon");
    };
    assert_eq!(rect.x0, 241.0);
    assert_eq!(rect.height(), 96.0);
    assert!((rect.width() - 240.0).abs() < 1e-6);
    assert!(markup.contains(r##"fill="#D16D10""##));
    assert_eq!(scene.text_blocks().count(), 1);
}

#[test]
fn title_block_is_placed_under_the_icon_row() {
    let scene = compose(&Theme::default(), ComposerOpts::default());
    let title = scene.text_blocks().last().unwrap();
    assert_eq!(title.text, "Fractions Quiz");
    assert_eq!(title.rect.x0, 69.0);
    assert_eq!(title.rect.y0, 175.0);
    assert!((title.rect.width() - 849.6).abs() < 1e-9);
    assert_eq!(title.font_size, 64.0);
    assert_eq!(title.line_height, 1.4);
    assert_eq!(title.letter_spacing, -0.5);
    assert_eq!(title.max_lines(), 4);
    assert_eq!(title.color, Theme::default().title_color());
}

#[test]
fn frame_uses_translucent_border() {
    let scene = compose(&Theme::default(), ComposerOpts::default());
    let Some(SceneNode::Frame {
        stroke,
        stroke_width,
        corner_radius,
        ..
    }) = scene.nodes().last()
    else {
        panic!("expected frame last");
    };
    assert_eq!(stroke, "rgba(0, 121, 206, 0.4)");
    assert_eq!(*stroke_width, 4.0);
    assert_eq!(*corner_radius, 38.0);
}

#[test]
fn overlay_sits_in_the_bottom_right_corner() {
    let overlay = OverlayAsset::from_bytes(
        br##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect fill="#000" width="10" height="10"/></svg>"##.to_vec(),
    )
    .unwrap();
    let store = store().with_overlay(overlay);
    let scene = LayoutComposer::default()
        .compose("x", &Theme::default(), &Decorations::from_store(&store))
        .unwrap();
    let SceneNode::Overlay { rect, .. } = &scene.nodes()[1] else {
        panic!("expected overlay after background");
    };
    assert_eq!(*rect, Rect::new(840.0, 270.0, 1200.0, 630.0));
}

#[test]
fn control_characters_in_titles_become_spaces() {
    assert_eq!(sanitize_text("  a\nb\tc  "), "a b c");
}

#[test]
fn compose_is_deterministic() {
    let theme = resolve(&PartialTheme::default(), Some("yellow")).unwrap();
    assert_eq!(
        compose(&theme, ComposerOpts::default()),
        compose(&theme, ComposerOpts::default())
    );
}
