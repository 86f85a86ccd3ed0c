//! gaze-aura overlays a gaze-centred aura on video frames.
//!
//! Each output frame keeps a sharp disk around the viewer's gaze point, paints a ring around it in a
//! heatmap color derived from a scalar signal, and blurs everything else. The public API is
//! pipeline-oriented:
//!
//! - Build an [`OverlayPipeline`] from validated [`OverlayOpts`]
//! - Pair a [`FrameSource`] with per-frame [`OverlayInputs`]
//! - Stream into a [`FrameSink`] such as [`FfmpegSink`]
//!
//! [`OverlayRenderer`] renders single frames for callers that drive their own loop.
#![forbid(unsafe_code)]

mod foundation;

/// Frame sources.
pub mod decode;
/// Encoding sinks.
pub mod encode;
pub mod frame;
/// Per-frame gaze and signal inputs.
pub mod inputs;
/// Overlay stages.
pub mod overlay;
pub mod preview;
/// Options and the streaming pipeline.
pub mod session;

pub use crate::foundation::core::{Fps, FrameIndex, GazePoint};
pub use crate::foundation::error::{AuraError, AuraResult};

pub use crate::decode::ffmpeg::{FfmpegSource, VideoSourceInfo, probe_video};
pub use crate::decode::source::{FrameSource, InMemorySource, SourceInfo};
pub use crate::encode::audio::{TempFileGuard, remux_audio};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path, is_ffprobe_on_path};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::frame::Frame;
pub use crate::inputs::{GazeTrack, OverlayInputs, SignalTrack};
pub use crate::overlay::blur::BoxBlur;
pub use crate::overlay::color::{HeatmapMapper, OverlayColor, SignalPolicy, map_to_color};
pub use crate::overlay::composite::{compose, compose_channel};
pub use crate::overlay::field::{DistanceField, build_field};
pub use crate::overlay::masks::{RegionMasks, build_masks};
pub use crate::overlay::renderer::{GazePolicy, OverlayRenderer};
pub use crate::preview::{PngPreview, PreviewAction, PreviewSink, write_png};
pub use crate::session::opts::OverlayOpts;
pub use crate::session::pipeline::{
    OverlayPipeline, PipelineState, RenderStats, StopReason, StopToken,
};
