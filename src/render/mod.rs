//! Raster surfaces and the CPU rendering of vector and pixel bubbles.

/// Surface contract, draw ops and frame buffers.
pub mod backend;
/// Gaussian blur and the sticker drop-shadow layer.
pub mod blur;
/// Source-over compositing of premultiplied frames.
pub mod composite;
/// `vello_cpu` implementation of [`backend::RasterSurface`].
pub mod cpu;
/// Surface that records draw ops instead of pixels.
pub mod recording;
/// Vector bubble rasterization and overlay composition.
pub mod vector;

pub use backend::{DrawOp, FrameRGBA, RasterSurface, RenderSettings};
pub use cpu::CpuSurface;
pub use recording::RecordingSurface;
pub use vector::{compose_overlay, rasterize_bubble};
