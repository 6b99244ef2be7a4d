//! Encoding sinks and still-image encoders.
//!
//! Sinks consume captured frames in order and produce one encoded blob.

/// Animated GIF sink.
pub mod gif;
/// PNG encoding of single frames.
pub mod png;
/// Generic frame sink trait and built-in sinks.
pub mod sink;

pub use gif::{GifSink, GifSinkOpts};
pub use png::encode_png;
pub use sink::{EncodedBlob, FrameSink, InMemorySink, SinkConfig};
