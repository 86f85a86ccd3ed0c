use crate::foundation::error::{AuraError, AuraResult};
use crate::overlay::field::DistanceField;

/// Binary region masks derived from one distance field. Every entry is 0 or 1.
///
/// Note the polarity of `outside_aura`: it is 1 in the background (beyond the aura radius) and is
/// used to select the original pixels there; the aura color fills where it is 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionMasks {
    /// Mask width in pixels.
    pub width: u32,
    /// Mask height in pixels.
    pub height: u32,
    /// 1 where distance > aura radius.
    pub outside_aura: Vec<u8>,
    /// 1 where distance <= focus radius.
    pub in_focus: Vec<u8>,
    /// `1 - in_focus`.
    pub outside_focus: Vec<u8>,
}

/// Threshold `field` into focus/aura masks.
///
/// Both comparisons are inclusive on the inner side: a pixel exactly on a radius belongs to the
/// disk it bounds.
pub fn build_masks(
    field: &DistanceField,
    focus_radius: f32,
    aura_radius: f32,
) -> AuraResult<RegionMasks> {
    if !focus_radius.is_finite() || !aura_radius.is_finite() {
        return Err(AuraError::validation("mask radii must be finite"));
    }

    let n = field.data.len();
    let mut outside_aura = Vec::with_capacity(n);
    let mut in_focus = Vec::with_capacity(n);
    let mut outside_focus = Vec::with_capacity(n);
    for &d in &field.data {
        let focus = u8::from(d <= focus_radius);
        outside_aura.push(u8::from(d > aura_radius));
        in_focus.push(focus);
        outside_focus.push(1 - focus);
    }

    Ok(RegionMasks {
        width: field.width,
        height: field.height,
        outside_aura,
        in_focus,
        outside_focus,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/masks.rs"]
mod tests;
