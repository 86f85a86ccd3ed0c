use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::Fps;
use crate::foundation::error::{AuraError, AuraResult};
use crate::overlay::color::SignalPolicy;
use crate::overlay::renderer::GazePolicy;

/// Options controlling overlay rendering and the streaming pipeline.
///
/// Missing fields in serialized form take their defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayOpts {
    /// Radius of the sharp focus disk, in pixels.
    pub focus_radius: f32,
    /// Outer radius of the aura ring, in pixels. Must be >= `focus_radius`.
    pub aura_radius: f32,
    /// Side length of the square background blur kernel, in pixels.
    pub blur_kernel: u32,
    /// Lower bound of the signal heatmap range.
    pub signal_min: f64,
    /// Upper bound of the signal heatmap range.
    pub signal_max: f64,
    /// Handling of signal samples outside `[signal_min, signal_max]`.
    pub signal_policy: SignalPolicy,
    /// Handling of gaze points outside the frame.
    pub gaze_policy: GazePolicy,
    /// Output frame rate. `None` keeps the source rate.
    pub fps: Option<Fps>,
    /// Suppress the live preview side channel.
    pub headless: bool,
    /// Render frames on a worker pool (output order is unchanged).
    pub parallel: bool,
    /// Frames read from the source per scheduling chunk.
    pub chunk_size: usize,
    /// Override the number of worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
    /// Bounded channel capacity between render workers and the sink thread.
    pub channel_capacity: usize,
}

impl Default for OverlayOpts {
    fn default() -> Self {
        Self {
            focus_radius: 40.0,
            aura_radius: 50.0,
            blur_kernel: 20,
            signal_min: -1.0,
            signal_max: 1.0,
            signal_policy: SignalPolicy::Reject,
            gaze_policy: GazePolicy::Clamp,
            fps: None,
            headless: false,
            parallel: false,
            chunk_size: 16,
            threads: None,
            channel_capacity: 4,
        }
    }
}

impl OverlayOpts {
    /// Load options from a JSON file.
    pub fn from_json_path(path: &Path) -> AuraResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read options '{}'", path.display()))?;
        let opts: Self = serde_json::from_str(&text).map_err(|e| {
            AuraError::serde(format!("parse options '{}': {e}", path.display()))
        })?;
        opts.validate()?;
        Ok(opts)
    }

    /// Check ranges and cross-field constraints.
    pub fn validate(&self) -> AuraResult<()> {
        if !self.focus_radius.is_finite() || self.focus_radius < 0.0 {
            return Err(AuraError::validation("focus_radius must be finite and >= 0"));
        }
        if !self.aura_radius.is_finite() || self.aura_radius < 0.0 {
            return Err(AuraError::validation("aura_radius must be finite and >= 0"));
        }
        if self.focus_radius > self.aura_radius {
            return Err(AuraError::validation(format!(
                "focus_radius ({}) must be <= aura_radius ({})",
                self.focus_radius, self.aura_radius
            )));
        }
        if self.blur_kernel == 0 {
            return Err(AuraError::validation("blur_kernel must be >= 1"));
        }
        if !self.signal_min.is_finite() || !self.signal_max.is_finite() {
            return Err(AuraError::validation("signal range bounds must be finite"));
        }
        if self.signal_min == self.signal_max {
            return Err(AuraError::DegenerateRange(self.signal_min));
        }
        if self.signal_min > self.signal_max {
            return Err(AuraError::validation("signal_min must be < signal_max"));
        }
        if let Some(fps) = self.fps {
            Fps::new(fps.num, fps.den)?;
        }
        if self.chunk_size == 0 {
            return Err(AuraError::validation("chunk_size must be >= 1"));
        }
        if let Some(n) = self.threads
            && n == 0
        {
            return Err(AuraError::validation("threads must be >= 1 when set"));
        }
        if self.channel_capacity == 0 {
            return Err(AuraError::validation("channel_capacity must be >= 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/opts.rs"]
mod tests;
