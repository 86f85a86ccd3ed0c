use std::collections::VecDeque;

use crate::foundation::core::Fps;
use crate::foundation::error::{AuraError, AuraResult};
use crate::frame::Frame;

/// Geometry and rate of a frame source, fixed for its lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceInfo {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Native frame rate.
    pub fps: Fps,
}

/// Sequential pull of decoded frames.
pub trait FrameSource: Send {
    /// Geometry and rate of every frame this source yields.
    fn info(&self) -> SourceInfo;
    /// Next frame, or `None` at end of stream.
    fn next_frame(&mut self) -> AuraResult<Option<Frame>>;
    /// Release decoder handles. Called exactly once by the pipeline, on every exit path.
    fn close(&mut self) -> AuraResult<()>;
}

/// Source backed by frames already in memory.
#[derive(Debug)]
pub struct InMemorySource {
    info: SourceInfo,
    frames: VecDeque<Frame>,
    pulled: usize,
    closed: bool,
}

impl InMemorySource {
    /// Create a source; every frame must match `width`x`height`.
    pub fn new(width: u32, height: u32, fps: Fps, frames: Vec<Frame>) -> AuraResult<Self> {
        if let Some(bad) = frames
            .iter()
            .find(|f| f.width != width || f.height != height)
        {
            return Err(AuraError::validation(format!(
                "in-memory source frame is {}x{}, expected {width}x{height}",
                bad.width, bad.height
            )));
        }
        Ok(Self {
            info: SourceInfo { width, height, fps },
            frames: frames.into(),
            pulled: 0,
            closed: false,
        })
    }

    /// Number of frames handed out so far.
    pub fn pulled(&self) -> usize {
        self.pulled
    }

    /// Whether `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl FrameSource for InMemorySource {
    fn info(&self) -> SourceInfo {
        self.info
    }

    fn next_frame(&mut self) -> AuraResult<Option<Frame>> {
        if self.closed {
            return Err(AuraError::source_read("in-memory source is closed"));
        }
        let frame = self.frames.pop_front();
        if frame.is_some() {
            self.pulled += 1;
        }
        Ok(frame)
    }

    fn close(&mut self) -> AuraResult<()> {
        self.closed = true;
        self.frames.clear();
        Ok(())
    }
}
