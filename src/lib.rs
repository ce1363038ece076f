//! thumbforge renders themed 1200x630 social-media thumbnails and generates them in batches.
//!
//! The pipeline for one image:
//!
//! - Resolve a [`Theme`] from a preset and raw overrides ([`resolve`])
//! - Compose a renderer-agnostic [`Scene`] ([`LayoutComposer`])
//! - Render it to PNG with a [`RenderBackend`] ([`RenderPipeline`] is the resvg backend)
//!
//! Batches decode rows from CSV, XLSX or JSON ([`read_rows_from_path`]), run them through the same
//! pipeline ([`run_batch`]) and package the images ([`write_zip`], [`write_dir`]).
#![forbid(unsafe_code)]

mod foundation;

/// Startup assets: font, icons, optional overlay.
pub mod assets;
/// Batch decoding, orchestration and packaging.
pub mod batch;
/// Hex colors and icon recoloring.
pub mod color;
/// Scene rendering backends.
pub mod render;
/// Single-thumbnail requests.
pub mod request;
/// Thumbnail scene model and layout.
pub mod scene;
/// Themes, presets and override resolution.
pub mod theme;

pub use crate::foundation::core::{Canvas, Edges, Point, Rect, Size};
pub use crate::foundation::error::{ThumbError, ThumbResult};

pub use crate::assets::{AssetPaths, AssetStore};
pub use crate::batch::{
    BatchContext, BatchOpts, BatchProgress, BatchReport, BatchResult, CancelToken, RowOutcome,
    RowRecord, read_rows_from_path, run_batch, write_dir, write_zip, write_zip_file, zip_bytes,
};
pub use crate::color::{BORDER_ALPHA, Rgb8, hex_to_rgba_with_alpha, recolor_svg_fills};
pub use crate::render::{RenderBackend, RenderPipeline, RenderThreading, render_thumbnail};
pub use crate::request::{DEFAULT_TITLE, RenderRequest};
pub use crate::scene::{ComposerOpts, Decorations, IconRowTail, LayoutComposer, Scene};
pub use crate::theme::{PartialTheme, Theme, resolve};
