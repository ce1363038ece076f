use std::sync::Arc;

use crate::assets::AssetStore;
use crate::assets::text::TextLayoutEngine;
use crate::foundation::error::{ThumbError, ThumbResult};
use crate::render::backend::RenderBackend;
use crate::render::raster::{rasterize_png, svg_options};
use crate::render::vectorize::scene_to_svg;
use crate::scene::{Decorations, LayoutComposer, Scene};
use crate::theme::Theme;

/// CPU renderer: scene to SVG (with Parley line breaking), then usvg/resvg to PNG.
///
/// Owns its text layout contexts, so one instance serves one thread at a time. Use
/// [`RenderBackend::fork`] to get one per worker; all forks share the same [`AssetStore`].
pub struct RenderPipeline {
    assets: Arc<AssetStore>,
    text: TextLayoutEngine,
    opt: usvg::Options<'static>,
}

impl RenderPipeline {
    pub fn new(assets: Arc<AssetStore>) -> ThumbResult<Self> {
        let text = TextLayoutEngine::new(assets.font_bytes())?;
        let opt = svg_options(assets.fontdb(), &assets.font_face().family);
        Ok(Self { assets, text, opt })
    }

    pub fn assets(&self) -> &Arc<AssetStore> {
        &self.assets
    }
}

impl std::fmt::Debug for RenderPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderPipeline")
            .field("assets", &self.assets)
            .field("family", &self.text.family_name())
            .finish_non_exhaustive()
    }
}

impl RenderBackend for RenderPipeline {
    fn render_scene(&mut self, scene: &Scene) -> ThumbResult<Vec<u8>> {
        let doc = scene_to_svg(scene, &mut self.text, self.assets.font_face())?;
        tracing::trace!(
            bytes = doc.markup.len(),
            text_nodes = doc.text_nodes,
            "scene vectorized"
        );
        rasterize_png(&doc, scene.canvas(), &self.opt)
    }

    fn fork(&self) -> ThumbResult<Box<dyn RenderBackend>> {
        Ok(Box::new(Self::new(Arc::clone(&self.assets))?))
    }
}

/// Compose + render a single thumbnail.
///
/// This is the primary one-shot API: [`LayoutComposer::compose`] followed by
/// [`RenderBackend::render_scene`]. Returns the encoded PNG.
#[tracing::instrument(skip_all, fields(title_len = title.len()))]
pub fn render_thumbnail(
    title: &str,
    theme: &Theme,
    composer: &LayoutComposer,
    decorations: &Decorations<'_>,
    backend: &mut dyn RenderBackend,
) -> ThumbResult<Vec<u8>> {
    let scene = composer.compose(title, theme, decorations)?;
    backend.render_scene(&scene)
}

/// Threading and chunking controls for batch rendering.
#[derive(Clone, Debug)]
pub struct RenderThreading {
    /// Enable parallel rendering when `true`.
    pub parallel: bool,
    /// Rows scheduled per chunk; cancellation is also checked between chunks.
    pub chunk_size: usize,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 16,
            threads: None,
        }
    }
}

pub(crate) fn build_thread_pool(threads: Option<usize>) -> ThumbResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ThumbError::render(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ThumbError::render(format!("failed to build rayon thread pool: {e}")))
}

pub(crate) fn normalized_chunk_size(chunk_size: usize) -> usize {
    chunk_size.max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
