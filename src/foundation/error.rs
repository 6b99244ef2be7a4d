/// Crate-wide result alias.
pub type BubbleResult<T> = Result<T, BubbleError>;

/// Errors surfaced by bubblekit operations.
///
/// Geometry and raster-spec computation never fail; errors come from surfaces, capture,
/// encoding and background image ingestion.
#[derive(thiserror::Error, Debug)]
pub enum BubbleError {
    /// Caller-provided input was rejected.
    #[error("validation error: {0}")]
    Validation(String),

    /// A raster surface could not be created, resized or drawn to.
    #[error("render error: {0}")]
    Render(String),

    /// Frame capture could not run (for example, no raster surface is attached).
    #[error("capture error: {0}")]
    Capture(String),

    /// A frame sink failed to encode the captured frames.
    #[error("encode error: {0}")]
    Encode(String),

    /// A background image was not a JPEG, PNG or WebP file.
    #[error("unsupported image: {0}")]
    UnsupportedImage(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BubbleError {
    /// Build a [`BubbleError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BubbleError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`BubbleError::Capture`].
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    /// Build a [`BubbleError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`BubbleError::UnsupportedImage`].
    pub fn unsupported_image(msg: impl Into<String>) -> Self {
        Self::UnsupportedImage(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
