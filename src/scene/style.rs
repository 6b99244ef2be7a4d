//! Style tags and the structured [`BubbleStyle`] they parse into.
//!
//! A style tag is a dash-separated list of tokens such as `cloud-tail-down-dashed` or
//! `sticker-rect`. Parsing never fails: unknown tokens are skipped and missing fields keep their
//! defaults (`rect`, solid border, no tail, not a sticker).

use std::fmt;
use std::str::FromStr;

/// Outline of the bubble body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BodyShape {
    /// Axis-aligned rectangle.
    #[default]
    Rect,
    /// Ellipse-like outline built from four quadratic arcs.
    Cloud,
}

/// Stroke style of the bubble outline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Border {
    /// Continuous stroke.
    #[default]
    Solid,
    /// `8,4` dash pattern.
    Dashed,
}

/// Side of the body the tail points out of.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tail {
    /// No tail.
    #[default]
    None,
    /// Tail above the body.
    Up,
    /// Tail below the body.
    Down,
    /// Tail left of the body.
    Left,
    /// Tail right of the body.
    Right,
}

impl Tail {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    fn token(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Up => Some("up"),
            Self::Down => Some("down"),
            Self::Left => Some("left"),
            Self::Right => Some("right"),
        }
    }
}

/// Structured bubble style.
///
/// `shape`, `border`, `tail` and `sticker` are orthogonal; every combination is valid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BubbleStyle {
    /// Body outline.
    pub shape: BodyShape,
    /// Outline stroke style.
    pub border: Border,
    /// Tail direction.
    pub tail: Tail,
    /// Sticker variant (light palette plus drop shadow).
    pub sticker: bool,
}

impl BubbleStyle {
    /// Parse a style tag. Never fails.
    pub fn parse(tag: &str) -> Self {
        let mut style = Self::default();
        let mut shape = None;
        let mut tokens = tag
            .split('-')
            .map(|t| t.trim().to_ascii_lowercase())
            .peekable();

        while let Some(token) = tokens.next() {
            match token.as_str() {
                "rect" => {
                    shape.get_or_insert(BodyShape::Rect);
                }
                "cloud" => {
                    shape.get_or_insert(BodyShape::Cloud);
                }
                "sticker" => style.sticker = true,
                "dashed" => style.border = Border::Dashed,
                "tail" => {
                    let dir = tokens.peek().and_then(|t| Tail::from_token(t));
                    if let Some(dir) = dir {
                        tokens.next();
                        if style.tail == Tail::None {
                            style.tail = dir;
                        }
                    }
                }
                _ => {}
            }
        }

        style.shape = shape.unwrap_or_default();
        style
    }

    /// Canonical tag: `[sticker-]<shape>[-tail-<dir>][-dashed]`.
    pub fn tag(&self) -> String {
        self.to_string()
    }

    /// Whether the style carries a tail.
    pub fn has_tail(&self) -> bool {
        self.tail != Tail::None
    }
}

impl FromStr for BubbleStyle {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for BubbleStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sticker {
            f.write_str("sticker-")?;
        }
        f.write_str(match self.shape {
            BodyShape::Rect => "rect",
            BodyShape::Cloud => "cloud",
        })?;
        if let Some(dir) = self.tail.token() {
            write!(f, "-tail-{dir}")?;
        }
        if self.border == Border::Dashed {
            f.write_str("-dashed")?;
        }
        Ok(())
    }
}

impl serde::Serialize for BubbleStyle {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for BubbleStyle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::parse(&tag))
    }
}

/// Presets offered by the bubble library, as `(tag, display name)`.
pub const LIBRARY_PRESETS: &[(&str, &str)] = &[
    ("rect", "Rectangle"),
    ("rect-dashed", "Rect Dashed"),
    ("rect-tail-down", "Rect Tail Down"),
    ("rect-tail-up", "Rect Tail Up"),
    ("rect-tail-left", "Rect Tail Left"),
    ("rect-tail-right", "Rect Tail Right"),
    ("cloud", "Cloud"),
    ("cloud-dashed", "Cloud Dashed"),
    ("cloud-tail-down", "Cloud Tail Down"),
    ("sticker-rect", "Sticker (Rect)"),
];

#[cfg(test)]
#[path = "../../tests/unit/scene/style.rs"]
mod tests;
