use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};

use crate::decode::source::{FrameSource, SourceInfo};
use crate::encode::ffmpeg::{is_ffmpeg_on_path, is_ffprobe_on_path};
use crate::foundation::core::Fps;
use crate::foundation::error::{AuraError, AuraResult};
use crate::frame::{Frame, byte_len};

/// Basic metadata about a source video file.
#[derive(Clone, Debug)]
pub struct VideoSourceInfo {
    /// Source path used for probing/decoding.
    pub source_path: PathBuf,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Frame rate of the first video stream.
    pub fps: Fps,
    /// Whether ffprobe detected at least one audio stream.
    pub has_audio: bool,
    /// Codec name of the first audio stream, if any.
    pub audio_codec: Option<String>,
}

/// Probe source video metadata through `ffprobe`.
pub fn probe_video(source_path: &Path) -> AuraResult<VideoSourceInfo> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        codec_name: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
        r_frame_rate: Option<String>,
        avg_frame_rate: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        streams: Vec<ProbeStream>,
    }

    if !is_ffprobe_on_path() {
        return Err(AuraError::source_read(
            "ffprobe is required to read video sources, but was not found on PATH",
        ));
    }

    let out = Command::new("ffprobe")
        .args(["-v", "error", "-print_format", "json", "-show_streams"])
        .arg(source_path)
        .output()
        .map_err(|e| AuraError::source_read(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(AuraError::source_read(format!(
            "ffprobe failed for '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
        .map_err(|e| AuraError::serde(format!("ffprobe json parse failed: {e}")))?;
    let video_stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| AuraError::source_read("no video stream found"))?;
    let width = video_stream
        .width
        .ok_or_else(|| AuraError::source_read("missing video width from ffprobe"))?;
    let height = video_stream
        .height
        .ok_or_else(|| AuraError::source_read("missing video height from ffprobe"))?;
    let fps = [&video_stream.r_frame_rate, &video_stream.avg_frame_rate]
        .into_iter()
        .flatten()
        .find_map(|r| Fps::parse(r).ok())
        .ok_or_else(|| AuraError::source_read("ffprobe reported no usable frame rate"))?;
    let audio = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("audio"));

    Ok(VideoSourceInfo {
        source_path: source_path.to_path_buf(),
        width,
        height,
        fps,
        has_audio: audio.is_some(),
        audio_codec: audio.and_then(|a| a.codec_name.clone()),
    })
}

/// Streams decoded `rgb24` frames from a video file through a system `ffmpeg` pipe.
pub struct FfmpegSource {
    video: VideoSourceInfo,
    child: Option<Child>,
    stdout: Option<BufReader<ChildStdout>>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,
    frame_len: usize,
}

impl FfmpegSource {
    /// Probe `path` and start decoding it.
    pub fn open(path: &Path) -> AuraResult<Self> {
        let video = probe_video(path)?;
        Self::from_probe(video)
    }

    /// Start decoding an already probed video.
    pub fn from_probe(video: VideoSourceInfo) -> AuraResult<Self> {
        let frame_len = byte_len(video.width, video.height)?;
        if !is_ffmpeg_on_path() {
            return Err(AuraError::source_read(
                "ffmpeg is required to decode video sources, but was not found on PATH",
            ));
        }

        let mut child = Command::new("ffmpeg")
            .args(["-v", "error", "-i"])
            .arg(&video.source_path)
            .args(["-map", "0:v:0", "-f", "rawvideo", "-pix_fmt", "rgb24", "pipe:1"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| AuraError::source_read(format!("failed to spawn ffmpeg decoder: {e}")))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| AuraError::source_read("failed to open ffmpeg stdout (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| AuraError::source_read("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        tracing::debug!(src = %video.source_path.display(), w = video.width, h = video.height, "ffmpeg source started");
        Ok(Self {
            video,
            child: Some(child),
            stdout: Some(BufReader::new(stdout)),
            stderr_drain: Some(stderr_drain),
            frame_len,
        })
    }

    /// Probe results for the source file.
    pub fn video(&self) -> &VideoSourceInfo {
        &self.video
    }
}

impl FrameSource for FfmpegSource {
    fn info(&self) -> SourceInfo {
        SourceInfo {
            width: self.video.width,
            height: self.video.height,
            fps: self.video.fps,
        }
    }

    fn next_frame(&mut self) -> AuraResult<Option<Frame>> {
        let Some(stdout) = self.stdout.as_mut() else {
            return Ok(None);
        };
        let mut buf = vec![0u8; self.frame_len];
        let n = read_full(stdout, &mut buf)
            .map_err(|e| AuraError::source_read(format!("failed to read decoded frame: {e}")))?;
        if n == 0 {
            self.stdout = None;
            return Ok(None);
        }
        if n != self.frame_len {
            return Err(AuraError::source_read(format!(
                "truncated frame from ffmpeg: got {n} bytes, expected {}",
                self.frame_len
            )));
        }
        Frame::from_rgb8(self.video.width, self.video.height, buf).map(Some)
    }

    fn close(&mut self) -> AuraResult<()> {
        let drained = self.stdout.is_none();
        drop(self.stdout.take());
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        // Stopping early leaves ffmpeg blocked on a full pipe; it has nothing more to give us.
        if !drained {
            let _ = child.kill();
        }
        let status = child.wait().map_err(|e| {
            AuraError::source_read(format!("failed to wait for ffmpeg decoder: {e}"))
        })?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| AuraError::source_read("ffmpeg stderr drain thread panicked"))?
                .unwrap_or_default(),
            None => Vec::new(),
        };
        if drained && !status.success() {
            return Err(AuraError::source_read(format!(
                "ffmpeg decoder exited with status {}: {}",
                status,
                String::from_utf8_lossy(&stderr_bytes).trim()
            )));
        }
        Ok(())
    }
}

impl Drop for FfmpegSource {
    fn drop(&mut self) {
        drop(self.stdout.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

fn read_full(r: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
#[path = "../../tests/unit/decode/ffmpeg.rs"]
mod tests;
