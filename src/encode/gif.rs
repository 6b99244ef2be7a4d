use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};

use crate::capture::pipeline::CapturedFrame;
use crate::encode::sink::{EncodedBlob, FrameSink, SinkConfig};
use crate::foundation::error::{BubbleError, BubbleResult};
use crate::foundation::math::mul_div255_u8;

/// Options for [`GifSink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GifSinkOpts {
    /// Loop forever instead of playing once.
    pub repeat_forever: bool,
    /// Quantization speed, `1` (best) to `30` (fastest).
    pub speed: i32,
    /// Opaque color behind transparent pixels and around smaller frames.
    pub background: [u8; 3],
}

impl Default for GifSinkOpts {
    fn default() -> Self {
        Self {
            repeat_forever: true,
            speed: 10,
            background: [255, 255, 255],
        }
    }
}

/// Animated GIF sink.
///
/// Every frame is flattened onto the background and padded to the configured size, anchored at
/// the top-left corner, then encoded with its own delay.
#[derive(Default)]
pub struct GifSink {
    opts: GifSinkOpts,
    cfg: Option<SinkConfig>,
    frames: Vec<Frame>,
}

impl GifSink {
    /// Create a sink with `opts`.
    pub fn new(opts: GifSinkOpts) -> Self {
        Self {
            opts,
            cfg: None,
            frames: Vec::new(),
        }
    }

    fn flatten(&self, cfg: &SinkConfig, frame: &CapturedFrame) -> BubbleResult<RgbaImage> {
        let src = &frame.frame;
        if src.width > cfg.width || src.height > cfg.height {
            return Err(BubbleError::encode(format!(
                "frame {}x{} exceeds gif canvas {}x{}",
                src.width, src.height, cfg.width, cfg.height
            )));
        }
        let [br, bg, bb] = self.opts.background;
        let mut out = RgbaImage::from_pixel(cfg.width, cfg.height, image::Rgba([br, bg, bb, 255]));
        for (i, px) in src.data.chunks_exact(4).enumerate() {
            let x = (i % src.width as usize) as u32;
            let y = (i / src.width as usize) as u32;
            let inv = 255 - u16::from(px[3]);
            let (r, g, b) = if src.premultiplied {
                (px[0], px[1], px[2])
            } else {
                let a = u16::from(px[3]);
                (
                    mul_div255_u8(u16::from(px[0]), a),
                    mul_div255_u8(u16::from(px[1]), a),
                    mul_div255_u8(u16::from(px[2]), a),
                )
            };
            out.put_pixel(
                x,
                y,
                image::Rgba([
                    r.saturating_add(mul_div255_u8(u16::from(br), inv)),
                    g.saturating_add(mul_div255_u8(u16::from(bg), inv)),
                    b.saturating_add(mul_div255_u8(u16::from(bb), inv)),
                    255,
                ]),
            );
        }
        Ok(out)
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> BubbleResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(BubbleError::encode("gif canvas must be non-empty"));
        }
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(BubbleError::encode("gif canvas exceeds u16"));
        }
        self.frames = Vec::with_capacity(cfg.frame_count);
        self.cfg = Some(cfg);
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: &CapturedFrame) -> BubbleResult<()> {
        let cfg = self
            .cfg
            .clone()
            .ok_or_else(|| BubbleError::encode("push_frame called before begin"))?;
        if idx != self.frames.len() {
            return Err(BubbleError::encode(format!(
                "frames must arrive in order: expected {}, got {idx}",
                self.frames.len()
            )));
        }
        let image = self.flatten(&cfg, frame)?;
        let delay = Delay::from_numer_denom_ms(frame.delay_ms, 1);
        self.frames.push(Frame::from_parts(image, 0, 0, delay));
        Ok(())
    }

    fn end(&mut self) -> BubbleResult<EncodedBlob> {
        if self.cfg.take().is_none() {
            return Err(BubbleError::encode("end called before begin"));
        }
        let frames = std::mem::take(&mut self.frames);
        let mut bytes = Vec::new();
        {
            let mut encoder = GifEncoder::new_with_speed(&mut bytes, self.opts.speed.clamp(1, 30));
            if self.opts.repeat_forever {
                encoder
                    .set_repeat(Repeat::Infinite)
                    .map_err(|e| BubbleError::encode(format!("gif repeat: {e}")))?;
            }
            encoder
                .encode_frames(frames)
                .map_err(|e| BubbleError::encode(format!("gif frame: {e}")))?;
        }
        tracing::debug!(bytes = bytes.len(), "gif encoded");
        Ok(EncodedBlob {
            mime: "image/gif",
            bytes,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
