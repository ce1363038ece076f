use super::*;
use crate::scene::ComposerOpts;
use crate::theme::{PartialTheme, resolve};

fn store() -> Arc<AssetStore> {
    Arc::new(
        AssetStore::load_dir(std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("assets"))
            .unwrap(),
    )
}

fn render(
    backend: &mut dyn RenderBackend,
    store: &AssetStore,
    title: &str,
    theme: &Theme,
) -> Vec<u8> {
    render_thumbnail(
        title,
        theme,
        &LayoutComposer::new(ComposerOpts::default()),
        &Decorations::from_store(store),
        backend,
    )
    .unwrap()
}

#[test]
fn renders_a_thumbnail_sized_png() {
    let store = store();
    let mut pipeline = RenderPipeline::new(Arc::clone(&store)).unwrap();
    let png = render(&mut pipeline, &store, "Fractions", &Theme::default());
    let img = image::load_from_memory(&png).unwrap();
    assert_eq!((img.width(), img.height()), (1200, 630));
}

#[test]
fn forked_backend_renders_identical_bytes() {
    let store = store();
    let theme = resolve(&PartialTheme::default(), Some("blue")).unwrap();
    let mut pipeline = RenderPipeline::new(Arc::clone(&store)).unwrap();
    let mut fork = pipeline.fork().unwrap();
    let a = render(&mut pipeline, &store, "Same title", &theme);
    let b = render(fork.as_mut(), &store, "Same title", &theme);
    assert_eq!(a, b);
}

#[test]
fn title_without_glyph_coverage_fails() {
    let store = store();
    let mut pipeline = RenderPipeline::new(Arc::clone(&store)).unwrap();
    let err = render_thumbnail(
        "漢字テスト",
        &Theme::default(),
        &LayoutComposer::default(),
        &Decorations::from_store(&store),
        &mut pipeline,
    )
    .unwrap_err();
    assert!(matches!(err, ThumbError::Render(_)), "{err:?}");
}

#[test]
fn thread_pool_rejects_zero_threads() {
    assert!(build_thread_pool(Some(0)).is_err());
    assert!(build_thread_pool(Some(2)).is_ok());
    assert_eq!(normalized_chunk_size(0), 1);
    assert_eq!(normalized_chunk_size(8), 8);
}
