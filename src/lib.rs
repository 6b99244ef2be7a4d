//! bubblekit computes, rasterizes and exports comic speech bubbles.
//!
//! Two kinds of bubble share one [`session::Studio`]:
//!
//! - Vector bubbles: style tags parse into a [`BubbleStyle`], [`compute_geometry`] turns a size
//!   and style into paths and paint, and [`compose_overlay`] places them over a background.
//! - The pixel bubble: [`pixel::compute_raster_spec`] lays out a chunky grid bubble that a
//!   [`FrameCapturePipeline`] captures as a blinking-text animation for a [`FrameSink`].
//!
//! Pointer gestures (drag, resize, in-place text editing) run through one
//! [`ManipulationController`] per bubble.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Scripted multi-frame capture of the pixel bubble.
pub mod capture;
/// Frame sinks and still/animated encoders.
pub mod encode;
/// Vector bubble geometry.
pub mod geometry;
/// Pointer-driven manipulation of placed bubbles.
pub mod interact;
/// Pixel-art bubble layout and draw program.
pub mod pixel;
/// Raster surfaces and compositing.
pub mod render;
/// Placed bubbles, styles and the background image.
pub mod scene;
/// Session-level API.
pub mod session;

pub use crate::foundation::core::{BezPath, Point, Rect, Rgba8, Size, Vec2};
pub use crate::foundation::error::{BubbleError, BubbleResult};

pub use crate::capture::{CaptureOpts, FrameCapturePipeline, PixelStage, RenderReceipt};
pub use crate::encode::{EncodedBlob, FrameSink, GifSink, GifSinkOpts, InMemorySink, SinkConfig};
pub use crate::geometry::{GeometryDescriptor, compute_geometry};
pub use crate::interact::{ManipulationController, PointerInput};
pub use crate::pixel::{PixelBubbleSettings, SpikeDirection};
pub use crate::render::{CpuSurface, FrameRGBA, compose_overlay, rasterize_bubble};
pub use crate::scene::background::BackgroundImage;
pub use crate::scene::bubble::{BubbleId, BubbleInstance, BubblePatch};
pub use crate::scene::store::BubbleStore;
pub use crate::scene::style::BubbleStyle;
pub use crate::session::{Download, Studio, StudioOpts};
