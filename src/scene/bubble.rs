use std::fmt;

use serde::{Deserialize, Serialize};

use crate::scene::style::BubbleStyle;

/// Text placed into a freshly added bubble.
pub const DEFAULT_TEXT: &str = "Edit me!";
/// Default bubble width.
pub const DEFAULT_WIDTH: f64 = 150.0;
/// Default bubble height.
pub const DEFAULT_HEIGHT: f64 = 80.0;
/// Default top-left position of a freshly added bubble.
pub const DEFAULT_POSITION: (f64, f64) = (50.0, 50.0);

/// Identifier of a placed bubble. Derived from the creation time and never changed afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BubbleId(String);

impl BubbleId {
    pub(crate) fn new(raw: String) -> Self {
        Self(raw)
    }

    /// Borrow the id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BubbleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One placed bubble in the image-overlay scene.
///
/// `(x, y)` is the top-left corner of the body in scene coordinates. Tails extend outside this
/// box; see [`crate::geometry::GeometryDescriptor::origin_offset`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BubbleInstance {
    /// Stable identifier.
    pub id: BubbleId,
    /// Committed text.
    pub text: String,
    /// Left edge of the body.
    pub x: f64,
    /// Top edge of the body.
    pub y: f64,
    /// Body width.
    pub width: f64,
    /// Body height.
    pub height: f64,
    /// Parsed style.
    pub style: BubbleStyle,
}

impl BubbleInstance {
    /// A bubble with default text, size and position.
    pub fn with_defaults(id: BubbleId, style: BubbleStyle) -> Self {
        Self {
            id,
            text: DEFAULT_TEXT.to_owned(),
            x: DEFAULT_POSITION.0,
            y: DEFAULT_POSITION.1,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            style,
        }
    }

    /// Structurally merge `patch` into this bubble. The id is never touched.
    pub fn apply(&mut self, patch: &BubblePatch) {
        if let Some(text) = &patch.text {
            self.text.clone_from(text);
        }
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
        if let Some(style) = patch.style {
            self.style = style;
        }
    }
}

/// Partial update addressed to one bubble. Unset fields are left untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BubblePatch {
    /// Target bubble.
    pub id: BubbleId,
    /// New text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// New left edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// New top edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// New width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// New height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// New style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<BubbleStyle>,
}

impl BubblePatch {
    /// Empty patch for `id`.
    pub fn new(id: BubbleId) -> Self {
        Self {
            id,
            text: None,
            x: None,
            y: None,
            width: None,
            height: None,
            style: None,
        }
    }

    /// Set the position.
    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Set the size.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set the text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the style.
    pub fn style(mut self, style: BubbleStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.x.is_none()
            && self.y.is_none()
            && self.width.is_none()
            && self.height.is_none()
            && self.style.is_none()
    }
}
