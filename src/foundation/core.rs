use crate::foundation::error::{AuraError, AuraResult};

/// Absolute 0-based frame index in source video order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator.
    pub num: u32,
    /// Denominator.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> AuraResult<Self> {
        if den == 0 {
            return Err(AuraError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(AuraError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Parse an ffmpeg-style ratio such as `30000/1001` or a plain integer such as `25`.
    pub fn parse(s: &str) -> AuraResult<Self> {
        let s = s.trim();
        let (num, den) = match s.split_once('/') {
            Some((n, d)) => (n.trim(), d.trim()),
            None => (s, "1"),
        };
        let num = num
            .parse::<u32>()
            .map_err(|_| AuraError::validation(format!("invalid fps numerator in '{s}'")))?;
        let den = den
            .parse::<u32>()
            .map_err(|_| AuraError::validation(format!("invalid fps denominator in '{s}'")))?;
        Self::new(num, den)
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }
}

/// Integer gaze coordinate in frame pixel space.
///
/// Coordinates may lie outside the frame; callers resolve them with a [`GazePolicy`](crate::GazePolicy).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct GazePoint {
    /// Horizontal pixel position, 0 at the left edge.
    pub x: i32,
    /// Vertical pixel position, 0 at the top edge.
    pub y: i32,
}

impl GazePoint {
    /// Create a gaze point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return `true` when the point addresses a pixel of a `width`x`height` frame.
    pub fn is_within(self, width: u32, height: u32) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as i64) < width as i64 && (self.y as i64) < height as i64
    }

    /// Clamp the point onto the nearest pixel of a non-empty `width`x`height` frame.
    pub fn clamped(self, width: u32, height: u32) -> Self {
        let max_x = width.saturating_sub(1).min(i32::MAX as u32) as i32;
        let max_y = height.saturating_sub(1).min(i32::MAX as u32) as i32;
        Self {
            x: self.x.clamp(0, max_x),
            y: self.y.clamp(0, max_y),
        }
    }
}

impl From<[i32; 2]> for GazePoint {
    fn from([x, y]: [i32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<GazePoint> for [i32; 2] {
    fn from(p: GazePoint) -> Self {
        [p.x, p.y]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
