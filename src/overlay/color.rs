//! Signal-to-color heatmap.
//!
//! The lower half of the range fades blue into a muted green, the upper half fades that green into
//! red. Green is attenuated to one fifth in both segments. Components are returned as raw integers;
//! they are only saturated into `u8` at the final compositing cast.

use crate::foundation::error::{AuraError, AuraResult};

/// Aura color for one frame, one integer per output channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OverlayColor {
    /// Red component.
    pub r: i32,
    /// Green component.
    pub g: i32,
    /// Blue component.
    pub b: i32,
}

impl OverlayColor {
    /// Component for channel index `channel` (0 = red, 1 = green, 2 = blue).
    ///
    /// Panics when `channel >= 3`.
    pub fn channel(self, channel: usize) -> i32 {
        match channel {
            0 => self.r,
            1 => self.g,
            2 => self.b,
            _ => unreachable!("rgb channel index {channel} out of range"),
        }
    }

    /// Components in channel order.
    pub fn components(self) -> [i32; 3] {
        [self.r, self.g, self.b]
    }
}

/// What to do with samples outside `[min, max]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalPolicy {
    /// Fail with [`AuraError::SignalOutOfRange`].
    #[default]
    Reject,
    /// Clamp into `[min, max]` before mapping.
    Clamp,
    /// Continue the nearer segment's line past the bound.
    Extrapolate,
}

/// Two-segment linear heatmap over a fixed `[min, max]` range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeatmapMapper {
    min: f64,
    max: f64,
    policy: SignalPolicy,
}

impl HeatmapMapper {
    /// Create a mapper, rejecting collapsed, inverted or non-finite ranges.
    pub fn new(min: f64, max: f64, policy: SignalPolicy) -> AuraResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(AuraError::validation("heatmap range bounds must be finite"));
        }
        if min == max {
            return Err(AuraError::DegenerateRange(min));
        }
        if min > max {
            return Err(AuraError::validation(format!(
                "heatmap range min ({min}) must be < max ({max})"
            )));
        }
        Ok(Self { min, max, policy })
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Out-of-range policy.
    pub fn policy(&self) -> SignalPolicy {
        self.policy
    }

    /// Map one sample to its aura color.
    pub fn map(&self, value: f64) -> AuraResult<OverlayColor> {
        let out_of_range = AuraError::SignalOutOfRange {
            value,
            min: self.min,
            max: self.max,
        };
        if !value.is_finite() {
            return Err(out_of_range);
        }
        let in_range = (self.min..=self.max).contains(&value);
        let value = match self.policy {
            _ if in_range => value,
            SignalPolicy::Reject => return Err(out_of_range),
            SignalPolicy::Clamp => value.clamp(self.min, self.max),
            SignalPolicy::Extrapolate => value,
        };
        Ok(heatmap(self.min, self.max, value))
    }
}

/// Map `value` in `[min, max]` to a heatmap color.
///
/// Values outside the range are rejected; use [`HeatmapMapper`] for other policies.
pub fn map_to_color(min: f64, max: f64, value: f64) -> AuraResult<OverlayColor> {
    HeatmapMapper::new(min, max, SignalPolicy::Reject)?.map(value)
}

// Both segments split at `mid`, which belongs to the lower one.
fn heatmap(min: f64, max: f64, value: f64) -> OverlayColor {
    let mid = (min + max) / 2.0;
    if value <= mid {
        let t = value - min;
        OverlayColor {
            r: 0,
            g: (255.0 / (mid - min) * t) as i32 / 5,
            b: (255.0 + -255.0 / (mid - min) * t) as i32,
        }
    } else {
        let t = value - mid;
        OverlayColor {
            r: (255.0 / (max - mid) * t) as i32,
            g: (255.0 + -255.0 / (max - mid) * t) as i32 / 5,
            b: 0,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/color.rs"]
mod tests;
