use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use gaze_aura::FrameSource as _;

#[derive(Parser, Debug)]
#[command(name = "gaze-aura", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the overlay over a whole video (requires `ffmpeg` and `ffprobe` on PATH).
    Render(RenderArgs),
    /// Render the overlay for a single frame as a PNG.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Source video.
    #[arg(long)]
    video: PathBuf,

    /// Gaze samples: JSON array of `[x, y]` pairs, one per frame.
    #[arg(long)]
    gaze: PathBuf,

    /// Signal samples: JSON array of numbers, one per frame.
    #[arg(long)]
    signal: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Take the audio track from this file instead of the source video.
    #[arg(long, conflicts_with = "no_audio")]
    audio: Option<PathBuf>,

    /// Write video only.
    #[arg(long)]
    no_audio: bool,

    /// Overlay options JSON. CLI flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Focus disk radius in pixels.
    #[arg(long)]
    focus_radius: Option<f32>,

    /// Aura ring outer radius in pixels.
    #[arg(long)]
    aura_radius: Option<f32>,

    /// Output frame rate, e.g. `30` or `30000/1001`.
    #[arg(long)]
    fps: Option<String>,

    /// Suppress the preview. Without `--preview` there is no preview to suppress.
    #[arg(long)]
    headless: bool,

    /// Keep a PNG snapshot of the latest frame at this path.
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Stop rendering once this file exists (checked by the preview on every frame).
    /// Defaults to `<preview>.stop`.
    #[arg(long, requires = "preview")]
    stop_file: Option<PathBuf>,

    /// Refresh the preview snapshot every N frames.
    #[arg(long, default_value_t = 15)]
    preview_every: u64,

    /// Render frames on a worker pool.
    #[arg(long)]
    parallel: bool,

    /// Worker thread count for `--parallel`.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Frame index (0-based).
    #[arg(long)]
    index: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Overlay options JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn load_opts(config: Option<&Path>) -> anyhow::Result<gaze_aura::OverlayOpts> {
    Ok(match config {
        Some(path) => gaze_aura::OverlayOpts::from_json_path(path)?,
        None => gaze_aura::OverlayOpts::default(),
    })
}

fn render_opts(args: &RenderArgs) -> anyhow::Result<gaze_aura::OverlayOpts> {
    let mut opts = load_opts(args.config.as_deref())?;
    if let Some(r) = args.focus_radius {
        opts.focus_radius = r;
    }
    if let Some(r) = args.aura_radius {
        opts.aura_radius = r;
    }
    if let Some(fps) = &args.fps {
        opts.fps = Some(gaze_aura::Fps::parse(fps)?);
    }
    if let Some(n) = args.threads {
        opts.threads = Some(n);
    }
    opts.headless |= args.headless;
    opts.parallel |= args.parallel;
    opts.validate()?;
    Ok(opts)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let opts = render_opts(&args)?;
    let inputs = gaze_aura::OverlayInputs::from_json_paths(&args.input.gaze, &args.input.signal)?;
    let mut source = gaze_aura::FfmpegSource::open(&args.input.video)?;

    let audio_source = if args.no_audio {
        None
    } else if let Some(a) = &args.audio {
        Some(a.clone())
    } else if source.video().has_audio {
        Some(args.input.video.clone())
    } else {
        None
    };

    // Video-only pass goes to a sibling temp file when audio is reattached afterwards.
    let (video_out, _guard) = match &audio_source {
        Some(_) => {
            let tmp = sibling_temp_path(&args.out);
            (tmp.clone(), gaze_aura::TempFileGuard::new(tmp))
        }
        None => (args.out.clone(), gaze_aura::TempFileGuard(None)),
    };

    let mut pipeline = gaze_aura::OverlayPipeline::new(opts)?;
    if let Some(path) = &args.preview {
        let stop_file = args
            .stop_file
            .clone()
            .unwrap_or_else(|| path.with_extension("stop"));
        let preview = gaze_aura::PngPreview::new(path, args.preview_every).with_stop_file(stop_file);
        pipeline = pipeline.with_preview(Box::new(preview));
    }

    let stop = pipeline.stop_token();
    ctrlc::set_handler(move || stop.stop()).context("install Ctrl-C handler")?;

    let mut sink = gaze_aura::FfmpegSink::new(gaze_aura::FfmpegSinkOpts::new(&video_out));
    let stats = pipeline.run(&mut source, &inputs, &mut sink)?;

    if let Some(audio) = &audio_source {
        gaze_aura::remux_audio(&video_out, audio, &args.out)?;
    }

    eprintln!(
        "wrote {} ({} frames, {:?})",
        args.out.display(),
        stats.frames_written,
        stats.stop_reason
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let opts = load_opts(args.config.as_deref())?;
    let renderer = gaze_aura::OverlayRenderer::new(&opts)?;
    let inputs = gaze_aura::OverlayInputs::from_json_paths(&args.input.gaze, &args.input.signal)?;

    let i = usize::try_from(args.index).context("frame index does not fit in usize")?;
    let (gaze, signal) = inputs
        .sample(i)
        .with_context(|| format!("no gaze/signal sample for frame {}", args.index))?;

    let mut source = gaze_aura::FfmpegSource::open(&args.input.video)?;
    let frame = seek_frame(&mut source, args.index);
    let closed = source.close();
    let frame = frame?;
    closed?;

    let out = renderer.render(&frame, gaze, signal)?;
    gaze_aura::write_png(&out, &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn seek_frame(
    source: &mut gaze_aura::FfmpegSource,
    index: u64,
) -> anyhow::Result<gaze_aura::Frame> {
    let mut at = 0u64;
    while let Some(frame) = source.next_frame()? {
        if at == index {
            return Ok(frame);
        }
        at += 1;
    }
    anyhow::bail!("video has only {at} frames, cannot render frame {index}")
}

fn sibling_temp_path(out: &Path) -> PathBuf {
    let stem = out
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    out.with_file_name(format!(".{stem}.video-{}.mp4", std::process::id()))
}
