//! Encoding sinks.
//!
//! Sinks consume rendered frames in source order and are driven by `OverlayPipeline::run`.

/// Audio reattachment after the video pass.
pub mod audio;
/// `ffmpeg`-based sinks (MP4 output via system `ffmpeg`).
pub mod ffmpeg;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
