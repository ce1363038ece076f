use crate::foundation::error::ThumbResult;
use crate::scene::Scene;

/// A renderer that turns a composed [`Scene`] into encoded PNG bytes.
///
/// Backends may keep per-instance caches (text layout contexts, scratch buffers), so they take
/// `&mut self` and are not shared between threads. Parallel paths call
/// [`RenderBackend::fork`] once per worker instead.
pub trait RenderBackend: Send {
    /// Render `scene` and return the encoded PNG.
    fn render_scene(&mut self, scene: &Scene) -> ThumbResult<Vec<u8>>;

    /// Construct an equivalent backend for another worker.
    fn fork(&self) -> ThumbResult<Box<dyn RenderBackend>>;
}
