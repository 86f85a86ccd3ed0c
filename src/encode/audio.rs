use std::path::{Path, PathBuf};
use std::process::Command;

use crate::encode::ffmpeg::{ensure_parent_dir, is_ffmpeg_on_path};
use crate::foundation::error::{AuraError, AuraResult};

/// Reattach an audio track to a rendered video without touching either stream.
///
/// The first video stream of `video` and the first audio stream of `audio_source` are copied
/// as-is and the output is cut to the shorter of the two. When the output container cannot hold
/// the source audio codec, the audio is encoded to AAC instead and a warning is logged. `video`
/// and `out` must differ.
#[tracing::instrument]
pub fn remux_audio(video: &Path, audio_source: &Path, out: &Path) -> AuraResult<()> {
    if video == out {
        return Err(AuraError::validation(
            "remux output must differ from the input video",
        ));
    }
    if !is_ffmpeg_on_path() {
        return Err(AuraError::sink_write(
            "ffmpeg is required for audio remux, but was not found on PATH",
        ));
    }
    ensure_parent_dir(out)?;

    let copied = run_mux(video, audio_source, out, "copy")?;
    if copied.status.success() {
        tracing::info!(out = %out.display(), "audio reattached");
        return Ok(());
    }

    tracing::warn!(
        out = %out.display(),
        stderr = %String::from_utf8_lossy(&copied.stderr).trim(),
        "audio stream copy failed; encoding audio to aac"
    );
    let encoded = run_mux(video, audio_source, out, "aac")?;
    if !encoded.status.success() {
        return Err(AuraError::sink_write(format!(
            "ffmpeg remux failed for '{}': {}",
            out.display(),
            String::from_utf8_lossy(&encoded.stderr).trim()
        )));
    }
    tracing::info!(out = %out.display(), "audio reattached (aac)");
    Ok(())
}

fn run_mux(
    video: &Path,
    audio_source: &Path,
    out: &Path,
    audio_codec: &str,
) -> AuraResult<std::process::Output> {
    Command::new("ffmpeg")
        .args(["-v", "error", "-y", "-i"])
        .arg(video)
        .arg("-i")
        .arg(audio_source)
        .args([
            "-map",
            "0:v:0",
            "-map",
            "1:a:0",
            "-c:v",
            "copy",
            "-c:a",
            audio_codec,
            "-shortest",
            "-movflags",
            "+faststart",
        ])
        .arg(out)
        .output()
        .map_err(|e| AuraError::sink_write(format!("failed to run ffmpeg for remux: {e}")))
}

/// Deletes the wrapped path on drop. Used for intermediate render outputs.
#[derive(Debug, Default)]
pub struct TempFileGuard(pub Option<PathBuf>);

impl TempFileGuard {
    /// Guard `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(Some(path.into()))
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}
