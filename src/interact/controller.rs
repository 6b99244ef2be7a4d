use serde::{Deserialize, Serialize};

use crate::foundation::core::{Point, Size, Vec2};
use crate::geometry::{PADDING, compute_geometry};
use crate::interact::input::{HitTarget, Key, PointerInput};
use crate::scene::bubble::{BubbleId, BubbleInstance, BubblePatch};
use crate::scene::store::BubbleStore;

/// Minimum size a resize may produce.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResizeBounds {
    /// Minimum width.
    pub min_width: f64,
    /// Minimum height.
    pub min_height: f64,
}

impl ResizeBounds {
    /// Vector overlay bubbles: room for the text area plus padding.
    pub const VECTOR: Self = Self {
        min_width: 50.0 + 2.0 * PADDING,
        min_height: 30.0 + 2.0 * PADDING,
    };
    /// Plain bubbles without a padded text area.
    pub const PLAIN: Self = Self {
        min_width: 50.0,
        min_height: 30.0,
    };

    fn clamp(self, size: Size) -> Size {
        Size::new(size.width.max(self.min_width), size.height.max(self.min_height))
    }
}

impl Default for ResizeBounds {
    fn default() -> Self {
        Self::VECTOR
    }
}

/// Transient state of one interaction. Origins live only inside their variant.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ManipulationSession {
    /// No interaction.
    #[default]
    Idle,
    /// Moving the bubble.
    Dragging {
        /// Pointer position at press.
        pointer_start: Point,
        /// Bubble position at press.
        origin_pos: Point,
    },
    /// Resizing from the bottom-right handle.
    Resizing {
        /// Pointer position at press.
        pointer_start: Point,
        /// Bubble size at press.
        origin_size: Size,
    },
    /// Editing text in place.
    Editing {
        /// Uncommitted editor content.
        draft: String,
    },
}

impl ManipulationSession {
    fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging { .. } => "dragging",
            Self::Resizing { .. } => "resizing",
            Self::Editing { .. } => "editing",
        }
    }
}

/// Drag/resize/edit controller for one bubble.
///
/// Inputs are applied against the bubble's current committed state; each call yields at most one
/// patch, which the caller merges into the store.
#[derive(Clone, Debug)]
pub struct ManipulationController {
    id: BubbleId,
    bounds: ResizeBounds,
    session: ManipulationSession,
}

impl ManipulationController {
    /// Idle controller for bubble `id`.
    pub fn new(id: BubbleId, bounds: ResizeBounds) -> Self {
        Self {
            id,
            bounds,
            session: ManipulationSession::Idle,
        }
    }

    /// Bubble this controller drives.
    pub fn id(&self) -> &BubbleId {
        &self.id
    }

    /// Current session.
    pub fn session(&self) -> &ManipulationSession {
        &self.session
    }

    /// Whether no interaction is active.
    pub fn is_idle(&self) -> bool {
        self.session == ManipulationSession::Idle
    }

    /// Whether the text editor is open.
    pub fn is_editing(&self) -> bool {
        matches!(self.session, ManipulationSession::Editing { .. })
    }

    /// Advance the state machine with `input`, given the bubble's committed state.
    ///
    /// Returns the patch to commit, if any. Inputs that do not apply to the current state are
    /// ignored.
    pub fn handle(&mut self, input: &PointerInput, bubble: &BubbleInstance) -> Option<BubblePatch> {
        let before = self.session.name();
        let patch = self.step(input, bubble);
        let after = self.session.name();
        if before != after {
            tracing::debug!(id = %self.id, from = before, to = after, "manipulation transition");
        }
        patch
    }

    /// Look the bubble up in `store`, advance, and merge any resulting patch.
    ///
    /// Returns whether the store changed. A bubble missing from the store resets the controller.
    pub fn dispatch(&mut self, input: &PointerInput, store: &mut BubbleStore) -> bool {
        let Some(bubble) = store.get(&self.id) else {
            self.session = ManipulationSession::Idle;
            return false;
        };
        match self.handle(input, bubble) {
            Some(patch) => store.update(&patch),
            None => false,
        }
    }

    fn step(&mut self, input: &PointerInput, bubble: &BubbleInstance) -> Option<BubblePatch> {
        use ManipulationSession as S;

        match (&self.session, input) {
            (S::Idle, PointerInput::PointerDown { target, at }) => {
                self.session = match target {
                    HitTarget::ResizeHandle => S::Resizing {
                        pointer_start: *at,
                        origin_size: Size::new(bubble.width, bubble.height),
                    },
                    HitTarget::Body => S::Dragging {
                        pointer_start: *at,
                        origin_pos: Point::new(bubble.x, bubble.y),
                    },
                    HitTarget::TextEditor => S::Idle,
                };
                None
            }
            (
                S::Dragging {
                    pointer_start,
                    origin_pos,
                },
                PointerInput::PointerMove { at },
            ) => {
                let pos = *origin_pos + (*at - *pointer_start);
                Some(BubblePatch::new(self.id.clone()).position(pos.x, pos.y))
            }
            (
                S::Resizing {
                    pointer_start,
                    origin_size,
                },
                PointerInput::PointerMove { at },
            ) => {
                let d: Vec2 = *at - *pointer_start;
                let size = self
                    .bounds
                    .clamp(Size::new(origin_size.width + d.x, origin_size.height + d.y));
                Some(BubblePatch::new(self.id.clone()).size(size.width, size.height))
            }
            (S::Dragging { .. } | S::Resizing { .. }, PointerInput::PointerUp) => {
                self.session = S::Idle;
                None
            }
            (S::Idle, PointerInput::DoubleClick { target: HitTarget::Body }) => {
                self.session = S::Editing {
                    draft: bubble.text.clone(),
                };
                None
            }
            (S::Editing { .. }, PointerInput::TextInput { text }) => {
                self.session = S::Editing {
                    draft: text.clone(),
                };
                None
            }
            (
                S::Editing { .. },
                PointerInput::Key {
                    key: Key::Enter,
                    shift: false,
                }
                | PointerInput::Blur,
            ) => {
                let S::Editing { draft } = std::mem::take(&mut self.session) else {
                    return None;
                };
                (draft != bubble.text).then(|| BubblePatch::new(self.id.clone()).text(draft))
            }
            (
                S::Editing { .. },
                PointerInput::Key {
                    key: Key::Escape, ..
                },
            ) => {
                self.session = S::Idle;
                None
            }
            _ => None,
        }
    }
}

/// Classify a scene point against `bubble`: resize handle first, then text editor (only while
/// `editing`), then the viewport.
pub fn hit_test(bubble: &BubbleInstance, p: Point, editing: bool) -> Option<HitTarget> {
    let g = compute_geometry(bubble.width, bubble.height, &bubble.style);
    let origin = g.placement(bubble.x, bubble.y);
    let local = Point::new(p.x - origin.x, p.y - origin.y);

    if editing {
        if g.text_area.contains(local) {
            return Some(HitTarget::TextEditor);
        }
    } else if g.hits_resize_handle(local) {
        return Some(HitTarget::ResizeHandle);
    }
    let inside = local.x >= 0.0
        && local.y >= 0.0
        && local.x < g.viewport.width
        && local.y < g.viewport.height;
    inside.then_some(HitTarget::Body)
}

#[cfg(test)]
#[path = "../../tests/unit/interact/controller.rs"]
mod tests;
