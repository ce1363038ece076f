//! Startup assets (font, icons, optional overlay) and the text layout engine.

pub(crate) mod store;
pub(crate) mod text;

pub use store::{AssetPaths, AssetStore, FontFace, IconAsset, OverlayAsset, OverlayFormat};
