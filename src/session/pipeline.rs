use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};

use rayon::prelude::*;

use crate::decode::source::FrameSource;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{AuraError, AuraResult};
use crate::frame::Frame;
use crate::inputs::OverlayInputs;
use crate::overlay::renderer::OverlayRenderer;
use crate::preview::{PreviewAction, PreviewSink};
use crate::session::opts::OverlayOpts;

/// Lifecycle of an [`OverlayPipeline`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineState {
    /// Created; source and sink untouched.
    Idle,
    /// Reading, rendering and writing frames.
    Streaming,
    /// Input ended, a stop was requested, or an error occurred; handles are being released.
    Draining,
    /// Terminal. The pipeline cannot be run again.
    Closed,
}

/// Why streaming ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The frame source reported end of stream.
    SourceExhausted,
    /// No gaze sample exists for the next frame.
    GazeExhausted,
    /// No signal sample exists for the next frame.
    SignalExhausted,
    /// The stop token fired (external request or preview).
    Cancelled,
}

/// Outcome of a completed run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames pushed to the sink.
    pub frames_written: u64,
    /// Why streaming ended.
    pub stop_reason: StopReason,
}

/// Cloneable external stop request, checked at every frame boundary.
#[derive(Clone, Debug, Default)]
pub struct StopToken(Arc<AtomicBool>);

impl StopToken {
    /// A token that has not fired.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop.
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether a stop has been requested.
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Streams a frame source through the overlay renderer into a sink.
///
/// Each frame index `i` pairs frame `i` with gaze sample `i` and signal sample `i`. Streaming
/// stops at the shortest of the three. With `parallel` enabled, frames are read in chunks and
/// rendered on a worker pool; a reorder buffer on the sink thread keeps writes in frame order.
pub struct OverlayPipeline {
    opts: OverlayOpts,
    renderer: OverlayRenderer,
    stop: StopToken,
    preview: Option<Box<dyn PreviewSink>>,
    state: PipelineState,
}

impl OverlayPipeline {
    /// Validate `opts` and build an idle pipeline.
    pub fn new(opts: OverlayOpts) -> AuraResult<Self> {
        let renderer = OverlayRenderer::new(&opts)?;
        Ok(Self {
            opts,
            renderer,
            stop: StopToken::new(),
            preview: None,
            state: PipelineState::Idle,
        })
    }

    /// Attach a live preview. Ignored when `headless` is set.
    pub fn with_preview(mut self, preview: Box<dyn PreviewSink>) -> Self {
        self.preview = Some(preview);
        self
    }

    /// Use an externally owned stop token.
    pub fn with_stop_token(mut self, stop: StopToken) -> Self {
        self.stop = stop;
        self
    }

    /// Token that stops this pipeline at the next frame boundary.
    pub fn stop_token(&self) -> StopToken {
        self.stop.clone()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Options this pipeline was built with.
    pub fn opts(&self) -> &OverlayOpts {
        &self.opts
    }

    /// Run the pipeline to completion.
    ///
    /// `source.close()` and `sink.end()` are called on every exit path once streaming has begun.
    #[tracing::instrument(skip_all, fields(parallel = self.opts.parallel))]
    pub fn run(
        &mut self,
        source: &mut dyn FrameSource,
        inputs: &OverlayInputs,
        sink: &mut dyn FrameSink,
    ) -> AuraResult<RenderStats> {
        if self.state != PipelineState::Idle {
            return Err(AuraError::validation(format!(
                "pipeline can only run once (state: {:?})",
                self.state
            )));
        }

        self.transition(PipelineState::Streaming);
        let preview = if self.opts.headless {
            if let Some(mut p) = self.preview.take() {
                p.close();
            }
            None
        } else {
            self.preview.take()
        };
        let streamed = self.stream(source, inputs, sink, preview);

        self.transition(PipelineState::Draining);
        let closed = source.close();
        self.transition(PipelineState::Closed);

        let stats = streamed?;
        closed?;
        tracing::info!(
            frames = stats.frames_written,
            reason = ?stats.stop_reason,
            "overlay render finished"
        );
        Ok(stats)
    }

    fn transition(&mut self, next: PipelineState) {
        tracing::debug!(from = ?self.state, to = ?next, "pipeline state");
        self.state = next;
    }

    fn stream(
        &self,
        source: &mut dyn FrameSource,
        inputs: &OverlayInputs,
        sink: &mut dyn FrameSink,
        preview: Option<Box<dyn PreviewSink>>,
    ) -> AuraResult<RenderStats> {
        let info = source.info();
        let cfg = SinkConfig {
            width: info.width,
            height: info.height,
            fps: self.opts.fps.unwrap_or(info.fps),
        };

        let pool = if self.opts.parallel {
            Some(build_thread_pool(self.opts.threads)?)
        } else {
            None
        };
        let ctx = ProduceCtx {
            renderer: &self.renderer,
            inputs,
            stop: &self.stop,
            pool: pool.as_ref(),
            chunk_size: if pool.is_some() {
                self.opts.chunk_size.max(1)
            } else {
                1
            },
            width: info.width,
            height: info.height,
        };
        let cap = self.opts.channel_capacity.max(1);

        std::thread::scope(|scope| -> AuraResult<RenderStats> {
            let (tx, rx) = mpsc::sync_channel::<FrameMsg>(cap);
            let stop = self.stop.clone();
            let sink_ref: &mut dyn FrameSink = sink;
            let writer = scope.spawn(move || write_in_order(sink_ref, cfg, rx, preview, &stop));

            let produced = produce(&ctx, source, &tx);
            drop(tx);
            let written = writer
                .join()
                .map_err(|_| AuraError::sink_write("sink thread panicked"))?;

            // A sink failure also breaks the channel, so it is the root cause when both fail.
            let frames_written = written?;
            let stop_reason = produced?;
            Ok(RenderStats {
                frames_written,
                stop_reason,
            })
        })
    }
}

#[derive(Debug)]
struct FrameMsg {
    idx: FrameIndex,
    frame: Frame,
}

struct ProduceCtx<'a> {
    renderer: &'a OverlayRenderer,
    inputs: &'a OverlayInputs,
    stop: &'a StopToken,
    pool: Option<&'a rayon::ThreadPool>,
    chunk_size: usize,
    width: u32,
    height: u32,
}

impl ProduceCtx<'_> {
    fn boundary(&self, idx: usize) -> Option<StopReason> {
        if self.stop.is_stopped() {
            Some(StopReason::Cancelled)
        } else if idx >= self.inputs.gaze.len() {
            Some(StopReason::GazeExhausted)
        } else if idx >= self.inputs.signal.len() {
            Some(StopReason::SignalExhausted)
        } else {
            None
        }
    }

    fn render_one(&self, idx: usize, frame: &Frame) -> AuraResult<Frame> {
        let (gaze, signal) = self.inputs.sample(idx).ok_or_else(|| {
            AuraError::validation(format!("no gaze/signal sample for frame {idx}"))
        })?;
        self.renderer.render(frame, gaze, signal)
    }
}

fn produce(
    ctx: &ProduceCtx<'_>,
    source: &mut dyn FrameSource,
    tx: &mpsc::SyncSender<FrameMsg>,
) -> AuraResult<StopReason> {
    let mut next = 0usize;
    loop {
        let mut batch = Vec::with_capacity(ctx.chunk_size);
        let mut reason = None;
        while batch.len() < ctx.chunk_size {
            if let Some(r) = ctx.boundary(next) {
                reason = Some(r);
                break;
            }
            let Some(frame) = source.next_frame()? else {
                reason = Some(StopReason::SourceExhausted);
                break;
            };
            if frame.width != ctx.width || frame.height != ctx.height {
                return Err(AuraError::source_read(format!(
                    "frame {next} is {}x{}, source declared {}x{}",
                    frame.width, frame.height, ctx.width, ctx.height
                )));
            }
            batch.push((next, frame));
            next += 1;
        }

        if !batch.is_empty() {
            tracing::trace!(frames = batch.len(), "rendering chunk");
            render_batch(ctx, batch, tx)?;
        }
        if let Some(reason) = reason {
            return Ok(reason);
        }
    }
}

fn render_batch(
    ctx: &ProduceCtx<'_>,
    batch: Vec<(usize, Frame)>,
    tx: &mpsc::SyncSender<FrameMsg>,
) -> AuraResult<()> {
    match ctx.pool {
        Some(pool) => {
            let tx = tx.clone();
            pool.install(move || {
                batch.into_par_iter().try_for_each_with(tx, |tx, (idx, frame)| {
                    let out = ctx.render_one(idx, &frame)?;
                    send_frame(tx, idx, out)
                })
            })
        }
        None => {
            for (idx, frame) in batch {
                let out = ctx.render_one(idx, &frame)?;
                send_frame(tx, idx, out)?;
            }
            Ok(())
        }
    }
}

fn send_frame(tx: &mpsc::SyncSender<FrameMsg>, idx: usize, frame: Frame) -> AuraResult<()> {
    tx.send(FrameMsg {
        idx: FrameIndex(idx as u64),
        frame,
    })
    .map_err(|_| AuraError::sink_write("sink thread is not accepting frames"))
}

fn write_in_order(
    sink: &mut dyn FrameSink,
    cfg: SinkConfig,
    rx: mpsc::Receiver<FrameMsg>,
    mut preview: Option<Box<dyn PreviewSink>>,
    stop: &StopToken,
) -> AuraResult<u64> {
    let begun = sink.begin(cfg);
    let written = begun.and_then(|()| {
        let res = drain_in_order(sink, rx, &mut preview, stop);
        let ended = sink.end();
        let n = res?;
        ended.map(|()| n)
    });
    detach_preview(&mut preview);
    written
}

fn drain_in_order(
    sink: &mut dyn FrameSink,
    rx: mpsc::Receiver<FrameMsg>,
    preview: &mut Option<Box<dyn PreviewSink>>,
    stop: &StopToken,
) -> AuraResult<u64> {
    let mut next = 0u64;
    let mut pending = HashMap::<u64, Frame>::new();
    while let Ok(msg) = rx.recv() {
        pending.insert(msg.idx.0, msg.frame);
        while let Some(frame) = pending.remove(&next) {
            sink.push_frame(FrameIndex(next), &frame)?;
            show_preview(preview, FrameIndex(next), &frame, stop);
            next += 1;
        }
    }
    if !pending.is_empty() {
        // Only reachable when a worker failed mid-chunk; the producer reports that error.
        tracing::debug!(dropped = pending.len(), "discarding frames after a render gap");
    }
    Ok(next)
}

fn show_preview(
    preview: &mut Option<Box<dyn PreviewSink>>,
    idx: FrameIndex,
    frame: &Frame,
    stop: &StopToken,
) {
    let Some(p) = preview.as_mut() else {
        return;
    };
    match p.show(idx, frame) {
        Ok(PreviewAction::Continue) => {}
        Ok(PreviewAction::Close) => detach_preview(preview),
        Ok(PreviewAction::Stop) => {
            tracing::info!(frame = idx.0, "preview requested stop");
            stop.stop();
            detach_preview(preview);
        }
        Err(e) => {
            tracing::warn!(error = %e, "preview failed; detaching");
            detach_preview(preview);
        }
    }
}

fn detach_preview(preview: &mut Option<Box<dyn PreviewSink>>) {
    if let Some(mut p) = preview.take() {
        p.close();
    }
}

fn build_thread_pool(threads: Option<usize>) -> AuraResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(AuraError::validation("'threads' must be >= 1 when set"));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| AuraError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/session/pipeline.rs"]
mod tests;
