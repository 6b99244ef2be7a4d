use serde::Serialize;

use crate::foundation::core::{Point, Rect};
use crate::pixel::{
    CHAR_ADVANCE, LINE_HEIGHT, PADDING, PIXEL_SCALE, SPIKE_HEIGHT, SPIKE_WIDTH, SpikeDirection,
    THOUGHT_R1, THOUGHT_R2,
};

/// Height reserved above the body for thought circles.
const THOUGHT_BAND: f64 = 2.0 * THOUGHT_R2 + PIXEL_SCALE;

/// Circle of a thought bubble.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ThoughtCircle {
    /// Center.
    pub center: Point,
    /// Radius.
    pub radius: f64,
}

/// Decoration attached to the body.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Ornament {
    /// Speech spike: an open two-segment polyline, filled as a triangle.
    Spike {
        /// Left end of the base.
        base_left: Point,
        /// Tip.
        tip: Point,
        /// Right end of the base.
        base_right: Point,
    },
    /// Thought circles.
    Thought {
        /// Radius `THOUGHT_R1`.
        small: ThoughtCircle,
        /// Radius `THOUGHT_R2`.
        large: ThoughtCircle,
    },
}

/// Raster plan of one pixel bubble. All values are in screen pixels.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PixelRenderSpec {
    /// Surface width.
    pub canvas_width: u32,
    /// Surface height.
    pub canvas_height: u32,
    /// Text width plus padding.
    pub bubble_width: f64,
    /// Text height plus padding.
    pub bubble_height: f64,
    /// Vertical offset of the body (non-zero in thought mode).
    pub y_offset: f64,
    /// Rectangle rasterized as the pixel grid.
    pub body: Rect,
    /// Spike or thought circles.
    pub ornament: Ornament,
    /// Text split on `\n`.
    pub text_lines: Vec<String>,
}

impl PixelRenderSpec {
    /// Top-left corner of text line `index`.
    pub fn line_origin(&self, index: usize) -> Point {
        Point::new(
            PADDING,
            self.y_offset + PADDING + index as f64 * (LINE_HEIGHT + PIXEL_SCALE),
        )
    }
}

/// Size and lay out a pixel bubble.
///
/// Text width is estimated at [`CHAR_ADVANCE`] per character, never measured.
#[tracing::instrument(level = "trace", skip(text), fields(chars = text.chars().count()))]
pub fn compute_raster_spec(
    text: &str,
    spike: SpikeDirection,
    thought: bool,
) -> PixelRenderSpec {
    let text_lines: Vec<String> = text.split('\n').map(str::to_owned).collect();
    let max_len = text_lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);
    let n = text_lines.len() as f64;

    let text_width = max_len as f64 * CHAR_ADVANCE;
    let text_height = n * LINE_HEIGHT + (n - 1.0) * PIXEL_SCALE;
    let bubble_width = text_width + 2.0 * PADDING;
    let bubble_height = text_height + 2.0 * PADDING;

    let band = if thought { THOUGHT_BAND } else { SPIKE_HEIGHT };
    let canvas_width = bubble_width;
    let canvas_height = bubble_height + band;
    let y_offset = if thought { THOUGHT_BAND } else { 0.0 };

    // Body height excludes the reserved band.
    let body = Rect::new(0.0, y_offset, bubble_width, y_offset + bubble_height - band);

    let ornament = if thought {
        Ornament::Thought {
            small: ThoughtCircle {
                center: Point::new(
                    bubble_width / 2.0 - THOUGHT_R2 - THOUGHT_R1 - PIXEL_SCALE,
                    THOUGHT_R1,
                ),
                radius: THOUGHT_R1,
            },
            large: ThoughtCircle {
                center: Point::new(bubble_width / 2.0, THOUGHT_R2),
                radius: THOUGHT_R2,
            },
        }
    } else {
        let base_x = match spike {
            SpikeDirection::Left => PADDING + PIXEL_SCALE,
            SpikeDirection::Right => bubble_width - PADDING - PIXEL_SCALE,
        }
        .min(bubble_width - PIXEL_SCALE)
        .max(PIXEL_SCALE);
        let tip_x = match spike {
            SpikeDirection::Left => base_x - SPIKE_WIDTH / 2.0,
            SpikeDirection::Right => base_x + SPIKE_WIDTH / 2.0,
        };
        let base_y = bubble_height - SPIKE_HEIGHT + y_offset - PIXEL_SCALE;
        Ornament::Spike {
            base_left: Point::new(base_x - SPIKE_WIDTH / 2.0, base_y),
            tip: Point::new(tip_x, canvas_height - PIXEL_SCALE),
            base_right: Point::new(base_x + SPIKE_WIDTH / 2.0, base_y),
        }
    };

    PixelRenderSpec {
        canvas_width: canvas_width as u32,
        canvas_height: canvas_height as u32,
        bubble_width,
        bubble_height,
        y_offset,
        body,
        ornament,
        text_lines,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pixel/layout.rs"]
mod tests;
