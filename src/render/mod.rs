//! Scene rendering: SVG vectorization, resvg rasterization and PNG encoding.

pub(crate) mod backend;
pub(crate) mod pipeline;
pub(crate) mod raster;
pub(crate) mod vectorize;

pub use backend::RenderBackend;
pub use pipeline::{RenderPipeline, RenderThreading, render_thumbnail};
