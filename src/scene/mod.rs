//! Image-overlay scene: bubble instances, their styles, the store that owns them, and the
//! background layer beneath them.

/// Background image ingestion.
pub mod background;
/// Bubble instances and partial updates.
pub mod bubble;
/// Authoritative bubble collection.
pub mod store;
/// Style tag parsing.
pub mod style;
