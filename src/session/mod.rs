//! Session-level API tying the store, controllers, pixel stage and exporters together.

/// The [`Studio`] facade.
pub mod studio;

pub use studio::{
    ANIMATED_FILENAME, Download, OVERLAY_FILENAME, STILL_FILENAME, Studio, StudioOpts,
};
