//! Per-frame gaze and signal sequences.
//!
//! Both sequences are indexed by frame index and may have different lengths; the pipeline stops at
//! the shortest of the video and the two sequences.

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::GazePoint;
use crate::foundation::error::{AuraError, AuraResult};

/// Gaze coordinates, one per frame.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct GazeTrack(pub Vec<GazePoint>);

/// Signal samples, one per frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SignalTrack(pub Vec<f64>);

impl GazeTrack {
    /// Load a JSON array of `[x, y]` pairs.
    pub fn from_json_path(path: &Path) -> AuraResult<Self> {
        from_json_path(path, "gaze")
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the track holds no samples.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sample for frame `i`.
    pub fn get(&self, i: usize) -> Option<GazePoint> {
        self.0.get(i).copied()
    }
}

impl SignalTrack {
    /// Load a JSON array of numbers.
    pub fn from_json_path(path: &Path) -> AuraResult<Self> {
        from_json_path(path, "signal")
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the track holds no samples.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sample for frame `i`.
    pub fn get(&self, i: usize) -> Option<f64> {
        self.0.get(i).copied()
    }
}

/// Both per-frame sequences consumed by the pipeline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverlayInputs {
    /// Gaze coordinates.
    pub gaze: GazeTrack,
    /// Signal samples.
    pub signal: SignalTrack,
}

impl OverlayInputs {
    /// Pair two sequences.
    pub fn new(gaze: impl Into<Vec<GazePoint>>, signal: impl Into<Vec<f64>>) -> Self {
        Self {
            gaze: GazeTrack(gaze.into()),
            signal: SignalTrack(signal.into()),
        }
    }

    /// Load both sequences from JSON files.
    pub fn from_json_paths(gaze: &Path, signal: &Path) -> AuraResult<Self> {
        Ok(Self {
            gaze: GazeTrack::from_json_path(gaze)?,
            signal: SignalTrack::from_json_path(signal)?,
        })
    }

    /// Samples available for frame `i`, or `None` when either sequence has ended.
    pub fn sample(&self, i: usize) -> Option<(GazePoint, f64)> {
        Some((self.gaze.get(i)?, self.signal.get(i)?))
    }
}

fn from_json_path<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> AuraResult<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read {what} samples '{}'", path.display()))?;
    serde_json::from_str(&text)
        .map_err(|e| AuraError::serde(format!("parse {what} samples '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../tests/unit/inputs.rs"]
mod tests;
