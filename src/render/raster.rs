use std::sync::Arc;

use crate::foundation::core::Canvas;
use crate::foundation::error::{ThumbError, ThumbResult};
use crate::render::vectorize::SvgDocument;

/// Parse options that resolve fonts from `fontdb` only.
pub(crate) fn svg_options(
    fontdb: Arc<usvg::fontdb::Database>,
    family: &str,
) -> usvg::Options<'static> {
    let mut opt = usvg::Options::default();
    opt.font_family = family.to_string();
    opt.fontdb = fontdb;
    opt
}

pub(crate) fn count_text_nodes(group: &usvg::Group) -> usize {
    let mut n = 0usize;
    for child in group.children() {
        match child {
            usvg::Node::Group(g) => n += count_text_nodes(g.as_ref()),
            usvg::Node::Text(_) => n += 1,
            usvg::Node::Path(_) | usvg::Node::Image(_) => {}
        }
    }
    n
}

/// Parse `doc`, draw it onto a `canvas`-sized pixmap and encode the result as PNG.
///
/// A `<text>` element that usvg could not shape (font not resolved) disappears from the parsed
/// tree; that is reported as an error rather than producing an image without its title.
pub(crate) fn rasterize_png(
    doc: &SvgDocument,
    canvas: Canvas,
    opt: &usvg::Options<'_>,
) -> ThumbResult<Vec<u8>> {
    let tree = usvg::Tree::from_str(&doc.markup, opt)
        .map_err(|e| ThumbError::render(format!("svg parse failed: {e}")))?;

    let parsed = count_text_nodes(tree.root());
    if parsed != doc.text_nodes {
        return Err(ThumbError::render(format!(
            "expected {} text nodes after parsing, found {parsed}",
            doc.text_nodes
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
        .ok_or_else(|| ThumbError::render("failed to allocate pixmap"))?;

    // Fit to width; the document is authored at canvas size so this is normally identity.
    let scale = (canvas.width as f32) / tree.size().width();
    let xform = resvg::tiny_skia::Transform::from_scale(scale, scale);
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    encode_png(canvas, &pixmap)
}

fn encode_png(canvas: Canvas, pixmap: &resvg::tiny_skia::Pixmap) -> ThumbResult<Vec<u8>> {
    let mut straight = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        straight.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    let img = image::RgbaImage::from_raw(canvas.width, canvas.height, straight)
        .ok_or_else(|| ThumbError::render("pixel buffer does not match canvas size"))?;
    let mut png = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|e| ThumbError::render(format!("png encode failed: {e}")))?;
    Ok(png)
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
