use std::sync::Arc;

use crate::assets::OverlayFormat;
use crate::color::Rgb8;
use crate::foundation::core::{Canvas, Rect};
use crate::theme::GradientDirection;

/// Fill of the background layer.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Rgb8),
    LinearGradient {
        from: Rgb8,
        to: Rgb8,
        direction: GradientDirection,
    },
}

/// Vertical placement of text lines inside their box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
}

/// A paragraph whose line breaking is left to the render step.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    pub text: String,
    /// Lines are broken to `rect.width()`; lines that do not fit `rect.height()` are dropped.
    pub rect: Rect,
    pub font_size: f64,
    /// Multiple of `font_size`.
    pub line_height: f64,
    pub letter_spacing: f64,
    pub color: Rgb8,
    pub v_align: VAlign,
}

impl TextBlock {
    pub fn line_px(&self) -> f64 {
        self.font_size * self.line_height
    }

    /// Number of whole lines that fit in the block.
    pub fn max_lines(&self) -> usize {
        let n = (self.rect.height() / self.line_px()).floor();
        if n.is_finite() && n > 0.0 { n as usize } else { 0 }
    }
}

/// One node of the thumbnail scene, in paint order.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneNode {
    /// Full-canvas background.
    Background { rect: Rect, paint: Paint },
    /// Bottom-right decoration, painted above the background and below the text.
    Overlay {
        rect: Rect,
        format: OverlayFormat,
        bytes: Arc<Vec<u8>>,
    },
    /// Badge, divider and label (or brand icon), laid out left to right.
    IconRow { rect: Rect, children: Vec<SceneNode> },
    /// Recolored SVG icon markup, drawn into `rect`.
    Icon { rect: Rect, markup: Arc<str> },
    /// Solid bar; `fill` is a CSS color string.
    Bar { rect: Rect, fill: String },
    Text(TextBlock),
    /// Rounded border; `stroke` is a CSS color string.
    Frame {
        rect: Rect,
        corner_radius: f64,
        stroke_width: f64,
        stroke: String,
    },
}

/// The composed, renderer-agnostic picture of one thumbnail.
///
/// Built fresh per render and never modified afterwards; all content is clipped to the
/// rounded frame outline.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    canvas: Canvas,
    corner_radius: f64,
    nodes: Vec<SceneNode>,
}

impl Scene {
    pub(crate) fn new(canvas: Canvas, corner_radius: f64, nodes: Vec<SceneNode>) -> Self {
        Self {
            canvas,
            corner_radius,
            nodes,
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Radius of the rounded outline everything is clipped to.
    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    /// Depth-first walk over every node, including icon-row children.
    pub fn walk(&self) -> impl Iterator<Item = &SceneNode> {
        fn push<'a>(out: &mut Vec<&'a SceneNode>, node: &'a SceneNode) {
            out.push(node);
            if let SceneNode::IconRow { children, .. } = node {
                for c in children {
                    push(out, c);
                }
            }
        }

        let mut out = Vec::new();
        for n in &self.nodes {
            push(&mut out, n);
        }
        out.into_iter()
    }

    /// Text blocks in paint order.
    pub fn text_blocks(&self) -> impl Iterator<Item = &TextBlock> {
        self.walk().filter_map(|n| match n {
            SceneNode::Text(t) => Some(t),
            _ => None,
        })
    }
}
