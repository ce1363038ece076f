use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::count_fill_attrs;
use crate::foundation::error::{ThumbError, ThumbResult};

/// A bundled single-color SVG icon, validated at startup.
#[derive(Clone, Debug)]
pub struct IconAsset {
    markup: Arc<str>,
    width: f32,
    height: f32,
}

impl IconAsset {
    /// Parse and validate icon markup. The icon must be valid SVG with at least one fill
    /// attribute, since recoloring rewrites fills.
    pub fn from_markup(name: &str, markup: impl Into<String>) -> ThumbResult<Self> {
        let markup = markup.into();
        if count_fill_attrs(&markup) == 0 {
            return Err(ThumbError::missing_asset(format!(
                "icon '{name}' has no fill attribute to recolor"
            )));
        }
        let tree = usvg::Tree::from_str(&markup, &usvg::Options::default())
            .map_err(|e| {
                ThumbError::missing_asset(format!("icon '{name}' is not valid svg: {e}"))
            })?;
        let size = tree.size();
        Ok(Self {
            markup: Arc::from(markup),
            width: size.width(),
            height: size.height(),
        })
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Intrinsic width over height.
    pub fn aspect(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Image format of a corner overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayFormat {
    Png,
    Svg,
}

impl OverlayFormat {
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml",
        }
    }
}

/// Optional decorative image placed in the bottom-right corner.
#[derive(Clone, Debug)]
pub struct OverlayAsset {
    format: OverlayFormat,
    bytes: Arc<Vec<u8>>,
}

impl OverlayAsset {
    /// Sniff and validate overlay bytes (PNG or SVG).
    pub fn from_bytes(bytes: Vec<u8>) -> ThumbResult<Self> {
        const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
        if bytes.starts_with(PNG_MAGIC) {
            image::load_from_memory_with_format(&bytes, image::ImageFormat::Png)
                .map_err(|e| ThumbError::missing_asset(format!("overlay png: {e}")))?;
            return Ok(Self {
                format: OverlayFormat::Png,
                bytes: Arc::new(bytes),
            });
        }

        usvg::Tree::from_data(&bytes, &usvg::Options::default()).map_err(|e| {
            ThumbError::missing_asset(format!("overlay is neither png nor svg: {e}"))
        })?;
        Ok(Self {
            format: OverlayFormat::Svg,
            bytes: Arc::new(bytes),
        })
    }

    pub fn format(&self) -> OverlayFormat {
        self.format
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn shared_bytes(&self) -> Arc<Vec<u8>> {
        Arc::clone(&self.bytes)
    }
}

/// Font face facts needed to address the embedded font from SVG markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontFace {
    pub family: String,
    pub weight: u16,
}

/// Process-wide, read-only store of the render assets.
///
/// Built once at startup and shared (usually as `Arc<AssetStore>`) by every render. Any
/// failure while building it is a [`ThumbError::MissingAsset`] and is fatal for the caller.
pub struct AssetStore {
    font_bytes: Arc<Vec<u8>>,
    face: FontFace,
    fontdb: Arc<usvg::fontdb::Database>,
    badge: IconAsset,
    brand: IconAsset,
    overlay: Option<OverlayAsset>,
}

impl std::fmt::Debug for AssetStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetStore")
            .field("font_len", &self.font_bytes.len())
            .field("face", &self.face)
            .field("badge", &self.badge)
            .field("brand", &self.brand)
            .field("overlay", &self.overlay.as_ref().map(|o| o.format))
            .finish()
    }
}

impl AssetStore {
    /// Build a store from in-memory assets.
    pub fn from_parts(font_bytes: Vec<u8>, badge_svg: &str, brand_svg: &str) -> ThumbResult<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_font_data(font_bytes.clone());
        let face = db
            .faces()
            .next()
            .ok_or_else(|| ThumbError::missing_asset("font data contains no usable face"))?;
        let family = face
            .families
            .first()
            .map(|(name, _)| name.clone())
            .ok_or_else(|| ThumbError::missing_asset("font face has no family name"))?;
        let face = FontFace {
            family,
            weight: face.weight.0,
        };

        Ok(Self {
            font_bytes: Arc::new(font_bytes),
            face,
            fontdb: Arc::new(db),
            badge: IconAsset::from_markup("badge", badge_svg)?,
            brand: IconAsset::from_markup("brand", brand_svg)?,
            overlay: None,
        })
    }

    /// Load every asset named by `paths` from disk.
    #[tracing::instrument(skip_all, fields(font = %paths.font.display()))]
    pub fn load(paths: &AssetPaths) -> ThumbResult<Self> {
        let font = read_asset(&paths.font)?;
        let badge = read_asset_string(&paths.badge_icon)?;
        let brand = read_asset_string(&paths.brand_icon)?;
        let mut store = Self::from_parts(font, &badge, &brand)?;
        if let Some(overlay) = &paths.overlay {
            store = store.with_overlay(OverlayAsset::from_bytes(read_asset(overlay)?)?);
        }
        tracing::debug!(family = %store.face.family, weight = store.face.weight, "assets loaded");
        Ok(store)
    }

    /// Load the conventional directory layout, see [`AssetPaths::from_dir`].
    pub fn load_dir(dir: impl AsRef<Path>) -> ThumbResult<Self> {
        Self::load(&AssetPaths::from_dir(dir)?)
    }

    pub fn with_overlay(mut self, overlay: OverlayAsset) -> Self {
        self.overlay = Some(overlay);
        self
    }

    pub fn without_overlay(mut self) -> Self {
        self.overlay = None;
        self
    }

    pub fn font_bytes(&self) -> &[u8] {
        &self.font_bytes
    }

    pub fn font_face(&self) -> &FontFace {
        &self.face
    }

    /// Font database holding only the embedded font. Renders never consult system fonts.
    pub fn fontdb(&self) -> Arc<usvg::fontdb::Database> {
        Arc::clone(&self.fontdb)
    }

    pub fn badge_icon(&self) -> &IconAsset {
        &self.badge
    }

    pub fn brand_icon(&self) -> &IconAsset {
        &self.brand
    }

    pub fn overlay(&self) -> Option<&OverlayAsset> {
        self.overlay.as_ref()
    }
}

/// Locations of the startup assets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetPaths {
    pub font: PathBuf,
    pub badge_icon: PathBuf,
    pub brand_icon: PathBuf,
    pub overlay: Option<PathBuf>,
}

impl AssetPaths {
    /// Resolve the conventional layout under `dir`:
    ///
    /// - `fonts/`: first `.ttf`/`.otf` file in name order
    /// - `icons/badge.svg` and `icons/brand.svg`
    /// - `overlay.png` or `overlay.svg`, optional
    pub fn from_dir(dir: impl AsRef<Path>) -> ThumbResult<Self> {
        let dir = dir.as_ref();
        let fonts_dir = dir.join("fonts");
        let entries = std::fs::read_dir(&fonts_dir).map_err(|e| {
            ThumbError::missing_asset(format!("read font dir '{}': {e}", fonts_dir.display()))
        })?;

        let mut fonts: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("ttf") || e.eq_ignore_ascii_case("otf"))
            })
            .collect();
        fonts.sort();
        let font = fonts.into_iter().next().ok_or_else(|| {
            ThumbError::missing_asset(format!("no .ttf/.otf font in '{}'", fonts_dir.display()))
        })?;

        let overlay = ["overlay.png", "overlay.svg"]
            .iter()
            .map(|name| dir.join(name))
            .find(|p| p.is_file());

        Ok(Self {
            font,
            badge_icon: dir.join("icons").join("badge.svg"),
            brand_icon: dir.join("icons").join("brand.svg"),
            overlay,
        })
    }
}

fn read_asset(path: &Path) -> ThumbResult<Vec<u8>> {
    std::fs::read(path)
        .map_err(|e| ThumbError::missing_asset(format!("read '{}': {e}", path.display())))
}

fn read_asset_string(path: &Path) -> ThumbResult<String> {
    String::from_utf8(read_asset(path)?)
        .map_err(|_| ThumbError::missing_asset(format!("'{}' is not utf-8", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
