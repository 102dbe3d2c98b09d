pub type QuoteResult<T> = Result<T, QuoteError>;

/// Every failure the engine, the font cache and the bot transport can report.
///
/// The `Display` output is meant to be shown to end users as-is.
#[derive(thiserror::Error, Debug)]
pub enum QuoteError {
    #[error("invalid hex color: {0}")]
    InvalidHexColor(String),

    #[error("palette '{0}' not found")]
    UnknownPalette(String),

    #[error("unknown font '{0}'")]
    UnknownFont(String),

    #[error("font unavailable: {0}")]
    FontUnavailable(String),

    #[error("failed to write image: {0}")]
    RenderIo(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl QuoteError {
    pub fn invalid_hex(msg: impl Into<String>) -> Self {
        Self::InvalidHexColor(msg.into())
    }

    pub fn unknown_palette(name: impl Into<String>) -> Self {
        Self::UnknownPalette(name.into())
    }

    pub fn unknown_font(name: impl Into<String>) -> Self {
        Self::UnknownFont(name.into())
    }

    pub fn font_unavailable(msg: impl Into<String>) -> Self {
        Self::FontUnavailable(msg.into())
    }

    pub fn render_io(msg: impl Into<String>) -> Self {
        Self::RenderIo(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
