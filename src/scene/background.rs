use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::error::{BubbleError, BubbleResult};

const REJECTED_MESSAGE: &str = "Please drop a JPG, PNG, or WEBP image file.";

/// Accepted background encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackgroundFormat {
    /// JPEG.
    Jpeg,
    /// PNG.
    Png,
    /// WebP.
    WebP,
}

impl BackgroundFormat {
    /// Map a MIME type (`image/png`, ...) to an accepted format.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// Map a file extension to an accepted format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }

    fn image_format(self) -> image::ImageFormat {
        match self {
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Png => image::ImageFormat::Png,
            Self::WebP => image::ImageFormat::WebP,
        }
    }
}

/// Opaque background layer drawn beneath the bubble overlays.
///
/// Only the declared format is checked on ingestion; the bytes are decoded lazily when an overlay
/// is rasterized.
#[derive(Clone, Debug)]
pub struct BackgroundImage {
    format: BackgroundFormat,
    bytes: Arc<Vec<u8>>,
}

/// Decoded background as premultiplied RGBA8.
#[derive(Clone, Debug)]
pub(crate) struct DecodedBackground {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) rgba8_premul: Vec<u8>,
}

impl BackgroundImage {
    /// Accept dropped bytes declared with `mime`.
    pub fn from_bytes(bytes: Vec<u8>, mime: &str) -> BubbleResult<Self> {
        let Some(format) = BackgroundFormat::from_mime(mime) else {
            tracing::warn!(mime, "rejected background image");
            return Err(BubbleError::unsupported_image(REJECTED_MESSAGE));
        };
        Ok(Self {
            format,
            bytes: Arc::new(bytes),
        })
    }

    /// Read a background from disk, classifying it by extension.
    pub fn from_path(path: impl AsRef<Path>) -> BubbleResult<Self> {
        let path = path.as_ref();
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(BackgroundFormat::from_extension);
        let Some(format) = format else {
            tracing::warn!(path = %path.display(), "rejected background image");
            return Err(BubbleError::unsupported_image(REJECTED_MESSAGE));
        };
        let bytes = std::fs::read(path)
            .with_context(|| format!("read background image '{}'", path.display()))?;
        Ok(Self {
            format,
            bytes: Arc::new(bytes),
        })
    }

    /// Declared format.
    pub fn format(&self) -> BackgroundFormat {
        self.format
    }

    /// Raw encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Pixel size read from the image header, without decoding pixels.
    pub fn dimensions(&self) -> BubbleResult<(u32, u32)> {
        let reader = image::ImageReader::with_format(
            Cursor::new(self.bytes.as_slice()),
            self.format.image_format(),
        );
        let dims = reader
            .into_dimensions()
            .context("read background image header")?;
        Ok(dims)
    }

    pub(crate) fn decode(&self) -> BubbleResult<DecodedBackground> {
        let img = image::load_from_memory_with_format(&self.bytes, self.format.image_format())
            .context("decode background image")?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let mut rgba8_premul = rgba.into_raw();
        crate::foundation::math::premultiply_rgba8_in_place(&mut rgba8_premul);
        Ok(DecodedBackground {
            width,
            height,
            rgba8_premul,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/background.rs"]
mod tests;
