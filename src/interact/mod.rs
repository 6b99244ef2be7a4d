//! Pointer-driven drag/resize/edit state machine for one bubble.

/// The per-bubble controller and its session state.
pub mod controller;
/// Pointer and keyboard inputs.
pub mod input;

pub use controller::{ManipulationController, ManipulationSession, ResizeBounds, hit_test};
pub use input::{HitTarget, Key, PointerInput};
