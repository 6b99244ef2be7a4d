use std::io::Cursor;

use crate::foundation::error::{BubbleError, BubbleResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::render::backend::FrameRGBA;

/// Encode `frame` as a straight-alpha RGBA PNG.
pub fn encode_png(frame: &FrameRGBA) -> BubbleResult<Vec<u8>> {
    let mut data = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8_in_place(&mut data);
    }
    let img = image::RgbaImage::from_raw(frame.width, frame.height, data)
        .ok_or_else(|| BubbleError::encode("frame byte length does not match its dimensions"))?;
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| BubbleError::encode(format!("png: {e}")))?;
    Ok(bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
