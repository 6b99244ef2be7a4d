use crate::foundation::error::BubbleResult;
use crate::render::backend::{DrawOp, FrameRGBA, RasterSurface};

/// [`RasterSurface`] that keeps the ops drawn since the last resize instead of pixels.
///
/// Snapshots are transparent frames of the current size.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    ops: Vec<DrawOp>,
    resizes: usize,
}

impl RecordingSurface {
    /// Empty `0x0` surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ops drawn since the last resize.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Number of resize calls so far.
    pub fn resize_count(&self) -> usize {
        self.resizes
    }
}

impl RasterSurface for RecordingSurface {
    fn resize(&mut self, width: u32, height: u32) -> BubbleResult<()> {
        self.width = width;
        self.height = height;
        self.ops.clear();
        self.resizes += 1;
        Ok(())
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn draw(&mut self, op: &DrawOp) {
        self.ops.push(op.clone());
    }

    fn snapshot(&mut self) -> FrameRGBA {
        FrameRGBA::transparent(self.width, self.height)
    }
}
