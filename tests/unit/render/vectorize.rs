use super::*;
use crate::assets::AssetStore;
use crate::scene::{ComposerOpts, Decorations, LayoutComposer};
use crate::theme::{PartialTheme, Theme, resolve};

fn store() -> AssetStore {
    AssetStore::load_dir(std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("assets")).unwrap()
}

fn vectorize(title: &str, theme: &Theme) -> SvgDocument {
    let store = store();
    let scene = LayoutComposer::new(ComposerOpts::default())
        .compose(title, theme, &Decorations::from_store(&store))
        .unwrap();
    let mut engine = TextLayoutEngine::new(store.font_bytes()).unwrap();
    scene_to_svg(&scene, &mut engine, store.font_face()).unwrap()
}

#[test]
fn gradient_is_declared_with_direction() {
    let theme = resolve(
        &PartialTheme {
            gradient_direction: Some("to right".into()),
            ..PartialTheme::default()
        },
        None,
    )
    .unwrap();
    let doc = vectorize("Title", &theme);
    assert!(doc.markup.contains(r#"<linearGradient id="bg" x1="0" y1="0" x2="1" y2="0">"#));
    assert!(doc.markup.contains(r##"stop-color="#E6F4FF""##));
    assert!(doc.markup.contains(r##"stop-color="#CDE8FE""##));
    assert!(doc.markup.contains(r#"fill="url(#bg)""#));
}

#[test]
fn solid_background_has_no_gradient() {
    let theme = resolve(
        &PartialTheme {
            background_mode: Some("solid".into()),
            primary_color: Some("#123456".into()),
            ..PartialTheme::default()
        },
        None,
    )
    .unwrap();
    let doc = vectorize("Title", &theme);
    assert!(!doc.markup.contains("linearGradient"));
    assert!(doc.markup.contains(r##"fill="#123456""##));
}

#[test]
fn one_text_element_per_line() {
    let short = vectorize("Short", &Theme::default());
    // label + one title line
    assert_eq!(short.text_nodes, 2);
    assert_eq!(short.markup.matches("<text ").count(), 2);

    let long = vectorize(
        "Adding and Subtracting Decimals: Perfect Quiz for 7th Grade",
        &Theme::default(),
    );
    assert!(long.text_nodes >= 3, "{}", long.text_nodes);
}

#[test]
fn overlong_titles_are_cut_to_four_lines() {
    let title = "word ".repeat(200);
    let doc = vectorize(&title, &Theme::default());
    assert_eq!(doc.text_nodes, 1 + 4);
}

#[test]
fn text_is_xml_escaped() {
    let doc = vectorize("A & <b>\"Q\"</b>", &Theme::default());
    assert_eq!(doc.text_nodes, 2);
    assert!(doc.markup.contains(">A &amp; &lt;b&gt;&quot;Q&quot;&lt;/b&gt;</text>"));
    assert!(!doc.markup.contains("<b>"));
}

#[test]
fn an_unbreakable_word_is_split_across_lines() {
    let doc = vectorize(
        "Supercalifragilisticexpialidocious_Antidisestablishmentarianism",
        &Theme::default(),
    );
    // label + at least two title lines
    assert!(doc.text_nodes >= 3, "{}", doc.text_nodes);
}

#[test]
fn icons_are_embedded_as_data_urls() {
    let doc = vectorize("Title", &Theme::default());
    assert!(doc.markup.contains("data:image/svg+xml;base64,"));
    assert!(doc.markup.contains(r#"clip-path="url(#frame)""#));
}

#[test]
fn escape_xml_handles_quotes() {
    assert_eq!(escape_xml(r#"a'b"c"#), "a&apos;b&quot;c");
}
