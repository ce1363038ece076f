/// Convenience result alias used across the crate.
pub type ThumbResult<T> = Result<T, ThumbError>;

/// Error type for theme resolution, composition, rendering and batch packaging.
#[derive(thiserror::Error, Debug)]
pub enum ThumbError {
    /// A color string was not `#RRGGBB`.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A theme field carried a value that could not be parsed.
    #[error("invalid theme field '{field}': {reason}")]
    InvalidThemeField {
        /// Field name as it appears in requests and row headers.
        field: &'static str,
        /// Human-readable reason.
        reason: String,
    },

    /// A preset name is not in the built-in table.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// The vectorize or rasterize step failed.
    #[error("render error: {0}")]
    Render(String),

    /// A startup asset (font, icon, overlay) could not be loaded.
    #[error("missing asset: {0}")]
    MissingAsset(String),

    /// A batch row is structurally unusable (missing or unsafe id, duplicate id).
    #[error("invalid row: {0}")]
    InvalidRow(String),

    /// Tabular or JSON input could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Output could not be written.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ThumbError {
    pub fn invalid_color(msg: impl Into<String>) -> Self {
        Self::InvalidColor(msg.into())
    }

    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidThemeField {
            field,
            reason: reason.into(),
        }
    }

    pub fn unknown_preset(name: impl Into<String>) -> Self {
        Self::UnknownPreset(name.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn missing_asset(msg: impl Into<String>) -> Self {
        Self::MissingAsset(msg.into())
    }

    pub fn invalid_row(msg: impl Into<String>) -> Self {
        Self::InvalidRow(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
