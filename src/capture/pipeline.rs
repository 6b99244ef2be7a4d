use crate::capture::stage::PixelStage;
use crate::encode::sink::{EncodedBlob, FrameSink, SinkConfig};
use crate::foundation::error::{BubbleError, BubbleResult};
use crate::render::backend::FrameRGBA;

/// Blink animation options.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptureOpts {
    /// Visible/hidden alternations.
    pub cycles: u32,
    /// Display time of every frame.
    pub delay_ms: u32,
    /// Text shown in hidden frames.
    pub blank_text: String,
}

impl Default for CaptureOpts {
    fn default() -> Self {
        Self {
            cycles: 3,
            delay_ms: 300,
            blank_text: " ".to_owned(),
        }
    }
}

/// One snapshot with its display delay.
#[derive(Clone, Debug, PartialEq)]
pub struct CapturedFrame {
    /// Independent copy of the surface.
    pub frame: FrameRGBA,
    /// Display time.
    pub delay_ms: u32,
    /// Whether the real text was shown.
    pub text_visible: bool,
}

/// Drives a [`PixelStage`] through the blink script and collects snapshots.
#[derive(Clone, Debug, Default)]
pub struct FrameCapturePipeline {
    opts: CaptureOpts,
}

impl FrameCapturePipeline {
    /// Pipeline with `opts`.
    pub fn new(opts: CaptureOpts) -> Self {
        Self { opts }
    }

    /// Options in use.
    pub fn opts(&self) -> &CaptureOpts {
        &self.opts
    }

    /// Capture `2 * cycles` frames, alternating visible and blank text.
    ///
    /// Fails before touching the stage when no surface is attached. The animation override is
    /// cleared afterwards, whether or not capture succeeded.
    #[tracing::instrument(level = "debug", skip(self, stage), fields(cycles = self.opts.cycles))]
    pub fn capture(&self, stage: &mut PixelStage) -> BubbleResult<Vec<CapturedFrame>> {
        if !stage.has_surface() {
            return Err(BubbleError::capture("raster surface unavailable"));
        }

        let result = self.capture_frames(stage);
        stage.set_animation_text(None);
        let restored = stage.render().map(drop);
        let frames = result?;
        restored?;

        tracing::debug!(frames = frames.len(), "capture complete");
        Ok(frames)
    }

    /// Capture, then hand every frame to `sink` in order and return the encoded blob.
    ///
    /// The sink is not invoked when capture fails.
    pub fn capture_into(
        &self,
        stage: &mut PixelStage,
        sink: &mut dyn FrameSink,
    ) -> BubbleResult<EncodedBlob> {
        let frames = self.capture(stage)?;
        submit(&frames, sink)
    }

    fn capture_frames(&self, stage: &mut PixelStage) -> BubbleResult<Vec<CapturedFrame>> {
        let text = stage.settings().text.clone();
        let mut frames = Vec::with_capacity(self.opts.cycles as usize * 2);
        for _ in 0..self.opts.cycles {
            for text_visible in [true, false] {
                let shown = if text_visible {
                    text.clone()
                } else {
                    self.opts.blank_text.clone()
                };
                stage.set_animation_text(Some(shown));
                let receipt = stage.render()?;
                let frame = stage.snapshot(receipt)?;
                frames.push(CapturedFrame {
                    frame,
                    delay_ms: self.opts.delay_ms,
                    text_visible,
                });
            }
        }
        Ok(frames)
    }
}

/// Feed `frames` to `sink`: `begin` with the largest frame size, every frame in order, `end`.
pub fn submit(frames: &[CapturedFrame], sink: &mut dyn FrameSink) -> BubbleResult<EncodedBlob> {
    let width = frames.iter().map(|f| f.frame.width).max().unwrap_or(0);
    let height = frames.iter().map(|f| f.frame.height).max().unwrap_or(0);
    sink.begin(SinkConfig {
        width,
        height,
        frame_count: frames.len(),
    })?;
    for (idx, frame) in frames.iter().enumerate() {
        sink.push_frame(idx, frame)?;
    }
    sink.end()
}

#[cfg(test)]
#[path = "../../tests/unit/capture/pipeline.rs"]
mod tests;
