use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::scene::style::{BodyShape, Border, BubbleStyle};

/// Fill and stroke pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Interior color.
    pub fill: Rgba8,
    /// Outline color.
    pub stroke: Rgba8,
}

impl Palette {
    /// Plain rectangle.
    pub const DEFAULT: Self = Self::new(Rgba8::rgb(0x00, 0x7b, 0xff), Rgba8::rgb(0x00, 0x56, 0xb3));
    /// Cloud body.
    pub const CLOUD: Self = Self::new(Rgba8::rgb(0x4a, 0x90, 0xe2), Rgba8::rgb(0x35, 0x7a, 0xbd));
    /// Any bubble with a tail.
    pub const TAIL: Self = Self::new(Rgba8::rgb(0xf5, 0xa6, 0x23), Rgba8::rgb(0xd0, 0x8c, 0x1d));
    /// Sticker variant.
    pub const STICKER: Self =
        Self::new(Rgba8::rgb(0xff, 0xef, 0x99), Rgba8::rgb(0xe6, 0xd7, 0x80));
    /// Dashed plain rectangle.
    pub const MUTED: Self = Self::new(Rgba8::rgb(0x6c, 0x75, 0x7d), Rgba8::rgb(0x5a, 0x62, 0x68));

    const fn new(fill: Rgba8, stroke: Rgba8) -> Self {
        Self { fill, stroke }
    }

    /// Pick the palette for `style`.
    ///
    /// Precedence: sticker, then tail, then cloud, then dashed rectangle, then default.
    pub fn for_style(style: &BubbleStyle) -> Self {
        if style.sticker {
            Self::STICKER
        } else if style.has_tail() {
            Self::TAIL
        } else if style.shape == BodyShape::Cloud {
            Self::CLOUD
        } else if style.border == Border::Dashed {
            Self::MUTED
        } else {
            Self::DEFAULT
        }
    }
}

/// Stroke dash pattern (dash length, gap length).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashPattern {
    /// Painted length.
    pub dash: f64,
    /// Unpainted length.
    pub gap: f64,
}

impl DashPattern {
    /// The `8,4` pattern used by dashed bubbles.
    pub const STANDARD: Self = Self {
        dash: 8.0,
        gap: 4.0,
    };

    /// SVG `stroke-dasharray` value.
    pub fn to_dasharray(self) -> String {
        format!("{},{}", self.dash, self.gap)
    }
}

/// Drop shadow drawn beneath sticker bubbles.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DropShadow {
    /// Horizontal offset.
    pub dx: f64,
    /// Vertical offset.
    pub dy: f64,
    /// Gaussian standard deviation of the blur.
    pub std_dev: f64,
}

impl DropShadow {
    /// Shadow used by sticker bubbles.
    pub const STICKER: Self = Self {
        dx: 2.0,
        dy: 2.0,
        std_dev: 3.0,
    };
}
