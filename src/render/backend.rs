use serde::Serialize;

use crate::foundation::core::{BezPath, Point, Rect, Rgba8};
use crate::foundation::error::BubbleResult;

/// A rendered frame as RGBA8 pixels.
///
/// Surfaces produce **premultiplied alpha** frames. The `premultiplied` flag makes this explicit at
/// API boundaries; encoders convert to straight alpha before writing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Fully transparent frame.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
            premultiplied: true,
        }
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data.get(i..i + 4).map(|px| [px[0], px[1], px[2], px[3]])
    }
}

/// Surface settings.
#[derive(Clone, Debug, Default)]
pub struct RenderSettings {
    /// If set, surfaces clear to this straight-alpha RGBA8 color on every resize.
    pub clear_rgba: Option<[u8; 4]>,
}

/// One primitive draw operation.
///
/// Every op carries the paint state in effect, so a program is replayable on any surface.
/// Strokes are centered on the geometry, as in an HTML canvas.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Stroked rectangle outline.
    StrokeRect {
        /// Rectangle.
        rect: Rect,
        /// Stroke color.
        stroke: Rgba8,
        /// Stroke width.
        line_width: f64,
    },
    /// Filled then stroked circle.
    FillStrokeCircle {
        /// Center.
        center: Point,
        /// Radius.
        radius: f64,
        /// Fill color.
        fill: Rgba8,
        /// Stroke color.
        stroke: Rgba8,
        /// Stroke width.
        line_width: f64,
    },
    /// Path filled (implicitly closed) then stroked. May hold many subpaths.
    FillStrokePath {
        /// Path.
        path: BezPath,
        /// Fill color.
        fill: Rgba8,
        /// Stroke color.
        stroke: Rgba8,
        /// Stroke width.
        line_width: f64,
    },
    /// One line of text, left-aligned with its top edge at `origin`.
    Text {
        /// Top-left corner of the run.
        origin: Point,
        /// Text content.
        text: String,
        /// Text color.
        color: Rgba8,
        /// Nominal font size.
        font_size: f64,
        /// Horizontal advance per character.
        advance: f64,
    },
}

/// A resizable raster target that accepts [`DrawOp`]s.
pub trait RasterSurface {
    /// Resize the surface. Always clears prior contents, even when the size is unchanged.
    fn resize(&mut self, width: u32, height: u32) -> BubbleResult<()>;

    /// Current `(width, height)`.
    fn dimensions(&self) -> (u32, u32);

    /// Draw one operation.
    fn draw(&mut self, op: &DrawOp);

    /// Copy out the current contents.
    ///
    /// The returned frame is independent of the surface; later draws never alter it.
    fn snapshot(&mut self) -> FrameRGBA;
}
