//! Vector geometry for the image-overlay bubbles.
//!
//! Everything here is a pure function of `(width, height, style)`; descriptors are recomputed on
//! demand and never stored.

/// Body/tail path synthesis and the [`GeometryDescriptor`].
pub mod descriptor;
/// Fill/stroke palettes and effects.
pub mod palette;
/// Standalone SVG serialization of a descriptor.
pub mod svg;

pub use descriptor::{GeometryDescriptor, compute_geometry};
pub use palette::{DashPattern, DropShadow, Palette};

/// Stroke width of body and tail outlines; also the inset of the body path.
pub const BORDER_WIDTH: f64 = 2.0;
/// Base width of the tail triangle.
pub const TAIL_WIDTH: f64 = 20.0;
/// Distance the tail apex extends beyond the body edge.
pub const TAIL_HEIGHT: f64 = 20.0;
/// Inset of the text area inside the body.
pub const PADDING: f64 = 10.0;
/// Side length of the square resize handle at the body's bottom-right corner.
pub const RESIZE_HANDLE_SIZE: f64 = 10.0;
/// Nominal font size of bubble text.
pub const TEXT_FONT_SIZE: f64 = 14.0;
/// Approximate per-character advance of bubble text.
pub const TEXT_ADVANCE: f64 = 8.0;
/// Distance between the tops of consecutive text lines.
pub const TEXT_LINE_HEIGHT: f64 = 18.0;
