pub use kurbo::{Point, Rect, Size};

/// Output raster size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// The only canvas thumbnails are rendered on.
    pub const THUMBNAIL: Canvas = Canvas {
        width: 1200,
        height: 630,
    };

    /// Canvas bounds as a rectangle anchored at the origin.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// Width over height.
    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::THUMBNAIL
    }
}

/// Uniform padding around a box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    pub const fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Shrink `r` by these edges, never producing a negative size.
    pub fn inset(self, r: Rect) -> Rect {
        let x0 = r.x0 + self.left;
        let y0 = r.y0 + self.top;
        let x1 = (r.x1 - self.right).max(x0);
        let y1 = (r.y1 - self.bottom).max(y0);
        Rect::new(x0, y0, x1, y1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
