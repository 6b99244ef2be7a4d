//! Scripted multi-frame capture of the pixel bubble.

/// The capture loop.
pub mod pipeline;
/// Live pixel render state with explicit render receipts.
pub mod stage;

pub use pipeline::{CaptureOpts, CapturedFrame, FrameCapturePipeline, submit};
pub use stage::{PixelStage, RenderReceipt};
