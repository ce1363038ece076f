use crate::foundation::error::{ThumbError, ThumbResult};

/// One broken line of a text block, in layout units (pixels).
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct LineBox {
    /// Line text with trailing whitespace removed.
    pub(crate) text: String,
    /// Width of the line without its trailing whitespace.
    pub(crate) advance: f32,
    pub(crate) ascent: f32,
    pub(crate) descent: f32,
}

/// Stateful helper for breaking text into lines with Parley, using only the embedded font.
///
/// The font is registered once; every layout call reuses the same contexts, so one engine
/// should be owned per render worker.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family_name: String,
}

impl TextLayoutEngine {
    /// Construct a layout engine and register `font_bytes` as its only font.
    pub(crate) fn new(font_bytes: &[u8]) -> ThumbResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| {
                ThumbError::missing_asset("no font families registered from font bytes")
            })?;

        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ThumbError::missing_asset("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    pub(crate) fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Shape `text` at `size_px` with extra `letter_spacing` between clusters and break it
    /// into lines no wider than `max_width_px`. A single word wider than the limit is broken
    /// between clusters.
    ///
    /// Fails when the embedded font has no glyph for some character of `text`.
    pub(crate) fn break_lines(
        &mut self,
        text: &str,
        size_px: f32,
        letter_spacing: f32,
        max_width_px: Option<f32>,
    ) -> ThumbResult<Vec<LineBox>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ThumbError::render("text size_px must be finite and > 0"));
        }
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        if letter_spacing != 0.0 {
            builder.push_default(parley::style::StyleProperty::LetterSpacing(letter_spacing));
        }
        // Words wider than the line are split rather than left overflowing.
        builder.push_default(parley::style::StyleProperty::OverflowWrap(
            parley::style::OverflowWrap::Anywhere,
        ));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(max_width_px);

        let mut out = Vec::new();
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                if run.glyphs().any(|g| g.id == 0) {
                    let range = run.run().text_range();
                    let missing = text.get(range).unwrap_or_default();
                    return Err(ThumbError::render(format!(
                        "font '{}' has no glyph for \"{}\"",
                        self.family_name,
                        missing.trim()
                    )));
                }
            }

            let m = line.metrics();
            let line_text = text.get(line.text_range()).unwrap_or_default().trim_end();
            if line_text.is_empty() {
                continue;
            }
            out.push(LineBox {
                text: line_text.to_string(),
                advance: m.advance - m.trailing_whitespace,
                ascent: m.ascent,
                descent: m.descent,
            });
        }

        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
