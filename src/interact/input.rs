use serde::{Deserialize, Serialize};

use crate::foundation::core::Point;

/// Part of a bubble an event landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitTarget {
    /// Body, tail or text (not editing).
    Body,
    /// Bottom-right resize handle.
    ResizeHandle,
    /// Active text editor.
    TextEditor,
}

/// Keys the text editor reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    /// Commits unless shift is held.
    Enter,
    /// Cancels the edit.
    Escape,
    /// Any other key.
    Other,
}

/// One input event routed to a bubble's controller. Points are in scene coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PointerInput {
    /// Button pressed over `target`.
    PointerDown {
        /// Hit part.
        target: HitTarget,
        /// Pointer position.
        at: Point,
    },
    /// Pointer moved anywhere in the window.
    PointerMove {
        /// Pointer position.
        at: Point,
    },
    /// Button released anywhere in the window.
    PointerUp,
    /// Double click over `target`.
    DoubleClick {
        /// Hit part.
        target: HitTarget,
    },
    /// The editor's content changed to `text`.
    TextInput {
        /// Full editor content.
        text: String,
    },
    /// Key pressed in the editor.
    Key {
        /// Key.
        key: Key,
        /// Whether shift was held.
        shift: bool,
    },
    /// The editor lost focus.
    Blur,
}
