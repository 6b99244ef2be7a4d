use crate::capture::pipeline::CapturedFrame;
use crate::foundation::error::BubbleResult;

/// Configuration provided to a [`FrameSink`] before any frame is pushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels (largest frame width).
    pub width: u32,
    /// Output height in pixels (largest frame height).
    pub height: u32,
    /// Number of frames that follow.
    pub frame_count: usize,
}

/// Encoded output of a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBlob {
    /// MIME type of `bytes`.
    pub mime: &'static str,
    /// Encoded bytes.
    pub bytes: Vec<u8>,
}

/// Sink contract for consuming captured frames.
///
/// Ordering contract: `push_frame` is called with indices `0, 1, 2, ...` in strictly increasing
/// order, between one `begin` and one `end`.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> BubbleResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: usize, frame: &CapturedFrame) -> BubbleResult<()>;
    /// Called once after the last frame; returns the encoded result.
    fn end(&mut self) -> BubbleResult<EncodedBlob>;
}

/// In-memory sink for tests and debugging. Its blob is the raw frame bytes concatenated.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(usize, CapturedFrame)>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg.clone()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(usize, CapturedFrame)] {
        &self.frames
    }

    /// Whether `end` was called.
    pub fn ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> BubbleResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: &CapturedFrame) -> BubbleResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> BubbleResult<EncodedBlob> {
        self.ended = true;
        let bytes = self
            .frames
            .iter()
            .flat_map(|(_, f)| f.frame.data.iter().copied())
            .collect();
        Ok(EncodedBlob {
            mime: "application/octet-stream",
            bytes,
        })
    }
}
