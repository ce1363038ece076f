use std::fmt::Write as _;

use base64::Engine as _;

use crate::assets::FontFace;
use crate::assets::text::TextLayoutEngine;
use crate::foundation::core::Rect;
use crate::foundation::error::ThumbResult;
use crate::scene::{Paint, Scene, SceneNode, TextBlock, VAlign};

/// SVG markup for one scene, plus how many `<text>` elements it carries.
#[derive(Clone, Debug)]
pub(crate) struct SvgDocument {
    pub(crate) markup: String,
    pub(crate) text_nodes: usize,
}

const BACKGROUND_GRADIENT_ID: &str = "bg";
const FRAME_CLIP_ID: &str = "frame";

/// Serialize `scene` to SVG. Text blocks are broken into lines here, using `engine`.
pub(crate) fn scene_to_svg(
    scene: &Scene,
    engine: &mut TextLayoutEngine,
    face: &FontFace,
) -> ThumbResult<SvgDocument> {
    let canvas = scene.canvas();
    let bounds = canvas.rect();
    let mut out = String::with_capacity(8 * 1024);
    let mut text_nodes = 0usize;

    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = canvas.width,
        h = canvas.height,
    );

    out.push_str("<defs>");
    for node in scene.nodes() {
        if let SceneNode::Background {
            paint: Paint::LinearGradient { from, to, direction },
            ..
        } = node
        {
            let (x1, y1, x2, y2) = direction.unit_vector();
            let _ = write!(
                out,
                r#"<linearGradient id="{BACKGROUND_GRADIENT_ID}" x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}"><stop offset="0" stop-color="{from}"/><stop offset="1" stop-color="{to}"/></linearGradient>"#,
            );
        }
    }
    let _ = write!(out, r#"<clipPath id="{FRAME_CLIP_ID}">"#);
    push_rect(&mut out, bounds, scene.corner_radius(), "");
    out.push_str("</clipPath></defs>");

    let _ = write!(out, r#"<g clip-path="url(#{FRAME_CLIP_ID})">"#);
    for node in scene.nodes() {
        text_nodes += push_node(&mut out, node, engine, face)?;
    }
    out.push_str("</g></svg>");

    Ok(SvgDocument {
        markup: out,
        text_nodes,
    })
}

fn push_node(
    out: &mut String,
    node: &SceneNode,
    engine: &mut TextLayoutEngine,
    face: &FontFace,
) -> ThumbResult<usize> {
    match node {
        SceneNode::Background { rect, paint } => {
            let fill = match paint {
                Paint::Solid(c) => c.to_hex(),
                Paint::LinearGradient { .. } => format!("url(#{BACKGROUND_GRADIENT_ID})"),
            };
            push_rect(out, *rect, 0.0, &format!(r#" fill="{fill}""#));
        }
        SceneNode::Overlay {
            rect,
            format,
            bytes,
        } => push_image(out, *rect, format.mime(), bytes),
        SceneNode::IconRow { children, .. } => {
            let mut n = 0;
            for child in children {
                n += push_node(out, child, engine, face)?;
            }
            return Ok(n);
        }
        SceneNode::Icon { rect, markup } => {
            push_image(out, *rect, "image/svg+xml", markup.as_bytes());
        }
        SceneNode::Bar { rect, fill } => {
            push_rect(out, *rect, 0.0, &format!(r#" fill="{}""#, escape_xml(fill)));
        }
        SceneNode::Text(block) => return push_text(out, block, engine, face),
        SceneNode::Frame {
            rect,
            corner_radius,
            stroke_width,
            stroke,
        } => {
            push_rect(
                out,
                *rect,
                *corner_radius,
                &format!(
                    r#" fill="none" stroke="{}" stroke-width="{stroke_width}""#,
                    escape_xml(stroke)
                ),
            );
        }
    }
    Ok(0)
}

fn push_rect(out: &mut String, r: Rect, radius: f64, attrs: &str) {
    let _ = write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
        r.x0,
        r.y0,
        r.width(),
        r.height()
    );
    if radius > 0.0 {
        let _ = write!(out, r#" rx="{radius}" ry="{radius}""#);
    }
    out.push_str(attrs);
    out.push_str("/>");
}

fn push_image(out: &mut String, r: Rect, mime: &str, bytes: &[u8]) {
    let data = base64::engine::general_purpose::STANDARD.encode(bytes);
    let _ = write!(
        out,
        r#"<image x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="xMidYMid meet" xlink:href="data:{mime};base64,{data}"/>"#,
        r.x0,
        r.y0,
        r.width(),
        r.height()
    );
}

/// Break `block` into lines and emit one `<text>` per line. Returns the number emitted.
fn push_text(
    out: &mut String,
    block: &TextBlock,
    engine: &mut TextLayoutEngine,
    face: &FontFace,
) -> ThumbResult<usize> {
    let mut lines = engine.break_lines(
        &block.text,
        block.font_size as f32,
        block.letter_spacing as f32,
        Some(block.rect.width() as f32),
    )?;

    let max_lines = block.max_lines();
    if lines.len() > max_lines {
        tracing::warn!(
            lines = lines.len(),
            max_lines,
            "text does not fit its box, dropping trailing lines"
        );
        lines.truncate(max_lines);
    }
    if lines.is_empty() {
        return Ok(0);
    }

    let line_px = block.line_px();
    let used = line_px * lines.len() as f64;
    let top = match block.v_align {
        VAlign::Top => block.rect.y0,
        VAlign::Center => block.rect.y0 + (block.rect.height() - used) / 2.0,
    };
    let family = escape_xml(&face.family);

    for (i, line) in lines.iter().enumerate() {
        let glyph_h = f64::from(line.ascent + line.descent);
        let half_leading = (line_px - glyph_h) / 2.0;
        let baseline = top + line_px * i as f64 + half_leading + f64::from(line.ascent);
        let _ = write!(
            out,
            r#"<text x="{x}" y="{baseline:.3}" font-family="{family}" font-weight="{weight}" font-size="{size}" letter-spacing="{spacing}" fill="{fill}" xml:space="preserve">{text}</text>"#,
            x = block.rect.x0,
            weight = face.weight,
            size = block.font_size,
            spacing = block.letter_spacing,
            fill = block.color,
            text = escape_xml(&line.text),
        );
    }

    Ok(lines.len())
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/vectorize.rs"]
mod tests;
