//! Frame sources.

/// `ffmpeg`/`ffprobe`-backed decoding.
pub mod ffmpeg;
/// Generic frame source trait and built-in sources.
pub mod source;
