//! Optional live preview side channel.
//!
//! A preview sees every written frame but never influences what the primary sink receives. When a
//! preview fails it is detached and rendering continues.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::FrameIndex;
use crate::foundation::error::AuraResult;
use crate::frame::Frame;

/// What the pipeline should do after a preview has shown a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewAction {
    /// Keep previewing.
    Continue,
    /// Detach the preview; rendering continues.
    Close,
    /// Detach the preview and stop the pipeline at the next frame boundary.
    Stop,
}

/// Consumer of rendered frames for live display.
pub trait PreviewSink: Send {
    /// Present one frame that has already been written to the primary sink.
    fn show(&mut self, idx: FrameIndex, frame: &Frame) -> AuraResult<PreviewAction>;
    /// Release display resources. Called once when the preview is detached or the run ends.
    fn close(&mut self) {}
}

/// Preview that keeps a PNG snapshot of the most recent frame on disk.
///
/// The file is replaced atomically so external viewers never read a partial image. With a stop
/// file configured, creating that file asks the pipeline to stop at the next frame boundary.
#[derive(Debug)]
pub struct PngPreview {
    path: PathBuf,
    every: u64,
    stop_file: Option<PathBuf>,
}

impl PngPreview {
    /// Refresh `path` every `every` frames (at least every frame).
    pub fn new(path: impl Into<PathBuf>, every: u64) -> Self {
        Self {
            path: path.into(),
            every: every.max(1),
            stop_file: None,
        }
    }

    /// Return [`PreviewAction::Stop`] once `stop_file` exists. Checked on every frame.
    pub fn with_stop_file(mut self, stop_file: impl Into<PathBuf>) -> Self {
        self.stop_file = Some(stop_file.into());
        self
    }
}

impl PreviewSink for PngPreview {
    fn show(&mut self, idx: FrameIndex, frame: &Frame) -> AuraResult<PreviewAction> {
        if let Some(stop) = &self.stop_file
            && stop.exists()
        {
            tracing::info!(stop_file = %stop.display(), "stop file found");
            return Ok(PreviewAction::Stop);
        }
        if !idx.0.is_multiple_of(self.every) {
            return Ok(PreviewAction::Continue);
        }
        let tmp = self.path.with_extension("png.partial");
        write_png(frame, &tmp)?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("replace preview '{}'", self.path.display()))?;
        Ok(PreviewAction::Continue)
    }
}

/// Write a frame as an RGB PNG.
pub fn write_png(frame: &Frame, path: &Path) -> AuraResult<()> {
    crate::encode::ffmpeg::ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/preview.rs"]
mod tests;
