use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{ThumbError, ThumbResult};
use crate::theme::{PartialTheme, Theme, resolve};

/// Title used when a request does not carry one.
pub const DEFAULT_TITLE: &str = "Adding and Subtracting Decimals: Perfect Quiz for 7th Grade";

/// A single-thumbnail request: title, optional preset and raw theme overrides.
///
/// Theme fields sit at the top level of the JSON object (`{"title": "...", "titleColor":
/// "#112233"}`), with the same names and aliases as [`PartialTheme`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderRequest {
    pub title: Option<String>,
    pub preset: Option<String>,
    #[serde(flatten)]
    pub theme: PartialTheme,
}

impl RenderRequest {
    pub fn from_reader<R: Read>(reader: R) -> ThumbResult<Self> {
        serde_json::from_reader(reader)
            .map_err(|e| ThumbError::decode(format!("render request: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> ThumbResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// The title to render; blank titles fall back to [`DEFAULT_TITLE`].
    pub fn title(&self) -> &str {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TITLE)
    }

    pub fn resolve_theme(&self) -> ThumbResult<Theme> {
        resolve(&self.theme, self.preset.as_deref())
    }

    /// Default download file name, `thumbnail-<slug>.png`.
    pub fn file_name(&self) -> String {
        format!("thumbnail-{}.png", slug(self.title()))
    }
}

/// Lowercase `title`, replacing every character outside `[a-z0-9]` with `-`.
pub fn slug(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../tests/unit/request.rs"]
mod tests;
