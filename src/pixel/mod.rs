//! Pixel-art bubble mode: sizing rules and the raster draw program.

/// Raster spec computation.
pub mod layout;
/// Draw program emission.
pub mod program;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::BubbleError;

pub use layout::{Ornament, PixelRenderSpec, ThoughtCircle, compute_raster_spec};
pub use program::{draw_program, render};

/// Screen pixels per art pixel.
pub const PIXEL_SCALE: f64 = 5.0;
/// Padding between body edge and text.
pub const PADDING: f64 = 2.0 * PIXEL_SCALE;
/// Height reserved below the body for the speech spike.
pub const SPIKE_HEIGHT: f64 = 3.0 * PIXEL_SCALE;
/// Base width of the speech spike.
pub const SPIKE_WIDTH: f64 = 4.0 * PIXEL_SCALE;
/// Radius of the small thought circle.
pub const THOUGHT_R1: f64 = PIXEL_SCALE;
/// Radius of the large thought circle.
pub const THOUGHT_R2: f64 = 2.0 * PIXEL_SCALE;
/// Height of one text line.
pub const LINE_HEIGHT: f64 = 3.0 * PIXEL_SCALE;
/// Estimated advance per character.
pub const CHAR_ADVANCE: f64 = 2.0 * PIXEL_SCALE;
/// Font size used for text runs.
pub const FONT_SIZE: f64 = 2.5 * PIXEL_SCALE;

/// Side the speech spike leans towards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpikeDirection {
    /// Spike near the left edge, tip leaning left.
    #[default]
    Left,
    /// Spike near the right edge, tip leaning right.
    Right,
}

impl fmt::Display for SpikeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

impl FromStr for SpikeDirection {
    type Err = BubbleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(BubbleError::validation(format!(
                "spike direction must be \"left\" or \"right\", got \"{other}\""
            ))),
        }
    }
}

/// User-facing settings of the pixel bubble.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PixelBubbleSettings {
    /// Bubble text; `\n` separates lines.
    pub text: String,
    /// Spike direction (speech mode only).
    pub spike: SpikeDirection,
    /// Draw thought circles instead of a spike.
    pub thought: bool,
}

impl Default for PixelBubbleSettings {
    fn default() -> Self {
        Self {
            text: "Pixel Art!".to_owned(),
            spike: SpikeDirection::Left,
            thought: false,
        }
    }
}

impl PixelBubbleSettings {
    /// Raster spec for these settings, with `text` overriding the configured text.
    pub fn spec_with_text(&self, text: &str) -> PixelRenderSpec {
        compute_raster_spec(text, self.spike, self.thought)
    }

    /// Raster spec for these settings.
    pub fn spec(&self) -> PixelRenderSpec {
        self.spec_with_text(&self.text)
    }
}
