use std::sync::Arc;

use crate::assets::{AssetStore, IconAsset, OverlayAsset};
use crate::color::{BORDER_ALPHA, hex_to_rgba_with_alpha, recolor_svg_fills};
use crate::foundation::core::{Canvas, Edges, Rect};
use crate::foundation::error::ThumbResult;
use crate::scene::model::{Paint, Scene, SceneNode, TextBlock, VAlign};
use crate::theme::{BackgroundMode, Theme};

const BORDER_WIDTH: f64 = 4.0;
const CORNER_RADIUS: f64 = 40.0;
const PADDING: Edges = Edges::symmetric(45.0, 65.0);
/// Share of the content width the text column may use; the rest is kept clear for the overlay.
const COLUMN_MAX_WIDTH: f64 = 0.8;
const COLUMN_GAP: f64 = 30.0;

const ICON_SIZE: f64 = 96.0;
const ROW_GAP: f64 = 36.0;
const DIVIDER_WIDTH: f64 = 4.0;
const LABEL_FONT_SIZE: f64 = 48.0;
const LABEL_PADDING_LEFT: f64 = 10.0;

const TITLE_FONT_SIZE: f64 = 64.0;
const LINE_HEIGHT: f64 = 1.4;
const LETTER_SPACING: f64 = -0.5;

const OVERLAY_SIZE: f64 = 360.0;

/// Label shown after the divider when the brand icon is not used.
pub const DEFAULT_LABEL: &str = "Assessment";

/// What follows the divider in the icon row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IconRowTail {
    /// A text label rendered in the badge color.
    Label(String),
    /// The brand icon recolored to the brand color.
    BrandIcon,
}

impl Default for IconRowTail {
    fn default() -> Self {
        Self::Label(DEFAULT_LABEL.to_string())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComposerOpts {
    pub icon_row: IconRowTail,
}

/// Images the composer places in the scene.
#[derive(Clone, Copy, Debug)]
pub struct Decorations<'a> {
    pub badge: &'a IconAsset,
    pub brand: &'a IconAsset,
    pub corner_overlay: Option<&'a OverlayAsset>,
}

impl<'a> Decorations<'a> {
    pub fn from_store(store: &'a AssetStore) -> Self {
        Self {
            badge: store.badge_icon(),
            brand: store.brand_icon(),
            corner_overlay: store.overlay(),
        }
    }
}

/// Builds the thumbnail [`Scene`] for a title and a resolved theme.
#[derive(Clone, Debug, Default)]
pub struct LayoutComposer {
    opts: ComposerOpts,
}

impl LayoutComposer {
    pub fn new(opts: ComposerOpts) -> Self {
        Self { opts }
    }

    pub fn opts(&self) -> &ComposerOpts {
        &self.opts
    }

    /// Compose the scene. Deterministic: equal inputs give equal scenes.
    pub fn compose(
        &self,
        title: &str,
        theme: &Theme,
        decorations: &Decorations<'_>,
    ) -> ThumbResult<Scene> {
        let canvas = Canvas::THUMBNAIL;
        let bounds = canvas.rect();
        let translucent_border =
            hex_to_rgba_with_alpha(&theme.border_color().to_hex(), BORDER_ALPHA)?;

        let paint = match theme.background_mode() {
            BackgroundMode::Solid => Paint::Solid(theme.primary_color()),
            BackgroundMode::Gradient => Paint::LinearGradient {
                from: theme.primary_color(),
                to: theme.secondary_color(),
                direction: theme.gradient_direction(),
            },
        };

        let mut nodes = vec![SceneNode::Background {
            rect: bounds,
            paint,
        }];

        if let Some(overlay) = decorations.corner_overlay {
            nodes.push(SceneNode::Overlay {
                rect: Rect::new(
                    bounds.x1 - OVERLAY_SIZE,
                    bounds.y1 - OVERLAY_SIZE,
                    bounds.x1,
                    bounds.y1,
                ),
                format: overlay.format(),
                bytes: overlay.shared_bytes(),
            });
        }

        let content = PADDING.inset(Edges::symmetric(BORDER_WIDTH, BORDER_WIDTH).inset(bounds));
        let column_width = content.width() * COLUMN_MAX_WIDTH;

        let row = Rect::new(
            content.x0,
            content.y0,
            content.x0 + column_width,
            content.y0 + ICON_SIZE,
        );
        nodes.push(self.icon_row(row, theme, decorations, &translucent_border));

        let title_top = row.y1 + COLUMN_GAP;
        nodes.push(SceneNode::Text(TextBlock {
            text: sanitize_text(title),
            rect: Rect::new(content.x0, title_top, content.x0 + column_width, content.y1),
            font_size: TITLE_FONT_SIZE,
            line_height: LINE_HEIGHT,
            letter_spacing: LETTER_SPACING,
            color: theme.title_color(),
            v_align: VAlign::Top,
        }));

        let half = BORDER_WIDTH / 2.0;
        nodes.push(SceneNode::Frame {
            rect: bounds.inset(-half),
            corner_radius: CORNER_RADIUS - half,
            stroke_width: BORDER_WIDTH,
            stroke: translucent_border,
        });

        Ok(Scene::new(canvas, CORNER_RADIUS, nodes))
    }

    fn icon_row(
        &self,
        row: Rect,
        theme: &Theme,
        decorations: &Decorations<'_>,
        translucent_border: &str,
    ) -> SceneNode {
        let badge = Rect::new(row.x0, row.y0, row.x0 + ICON_SIZE, row.y1);
        let divider_x = badge.x1 + ROW_GAP;
        let divider = Rect::new(divider_x, row.y0, divider_x + DIVIDER_WIDTH, row.y1);
        let tail_x = divider.x1 + ROW_GAP;

        let mut children = vec![
            SceneNode::Icon {
                rect: badge,
                markup: Arc::from(recolor_svg_fills(
                    decorations.badge.markup(),
                    theme.badge_color(),
                )),
            },
            SceneNode::Bar {
                rect: divider,
                fill: translucent_border.to_string(),
            },
        ];

        children.push(match &self.opts.icon_row {
            IconRowTail::BrandIcon => {
                let width =
                    (ICON_SIZE * decorations.brand.aspect()).min((row.x1 - tail_x).max(0.0));
                SceneNode::Icon {
                    rect: Rect::new(tail_x, row.y0, tail_x + width, row.y1),
                    markup: Arc::from(recolor_svg_fills(
                        decorations.brand.markup(),
                        theme.brand_color(),
                    )),
                }
            }
            IconRowTail::Label(label) => SceneNode::Text(TextBlock {
                text: sanitize_text(label),
                rect: Rect::new(
                    tail_x + LABEL_PADDING_LEFT,
                    row.y0,
                    row.x1.max(tail_x + LABEL_PADDING_LEFT),
                    row.y1,
                ),
                font_size: LABEL_FONT_SIZE,
                line_height: LINE_HEIGHT,
                letter_spacing: LETTER_SPACING,
                color: theme.badge_color(),
                v_align: VAlign::Center,
            }),
        });

        SceneNode::IconRow { rect: row, children }
    }
}

/// Collapse control characters (newlines, tabs) to spaces so text stays one paragraph.
fn sanitize_text(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
#[path = "../../tests/unit/scene/compose.rs"]
mod tests;
