use std::sync::LazyLock;

use regex::Regex;

use crate::color::hex::Rgb8;

// `fill="..."` or `fill='...'` as a whole attribute name: `fill-rule`, `fill-opacity` and
// `data-fill` do not match. Group 1 is the whitespace in front of the name.
static FILL_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\s)fill\s*=\s*(?:"[^"]*"|'[^']*')"#).expect("fill attribute regex is valid")
});

/// Number of fill attributes [`recolor_svg_fills`] would rewrite.
pub fn count_fill_attrs(markup: &str) -> usize {
    FILL_ATTR.find_iter(markup).count()
}

/// Rewrite every fill attribute of a bundled icon to `color`.
///
/// This is a plain text substitution over trusted, statically shipped SVG files; it does not
/// understand `style=""` declarations or CSS classes.
pub fn recolor_svg_fills(markup: &str, color: Rgb8) -> String {
    let replacement = format!("fill=\"{}\"", color.to_hex());
    FILL_ATTR
        .replace_all(markup, |caps: &regex::Captures<'_>| {
            format!("{}{replacement}", &caps[1])
        })
        .into_owned()
}

#[cfg(test)]
#[path = "../../tests/unit/color/recolor.rs"]
mod tests;
