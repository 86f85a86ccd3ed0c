use crate::foundation::error::{AuraError, AuraResult};
use crate::frame::{CHANNELS, Frame};
use crate::overlay::blur::BoxBlur;
use crate::overlay::color::OverlayColor;
use crate::overlay::masks::RegionMasks;

/// Composite focus disk, aura ring and blurred background into a new frame.
///
/// Per channel `c` (using color component `c`):
/// - `combined = outside_aura * channel + aura`, where `aura` is the color wherever
///   `outside_aura == 0`
/// - `fuzzy = blur(combined)`
/// - `final = in_focus * channel + fuzzy * outside_focus`
///
/// The final value is saturated to `0..=255` and truncated.
pub fn compose(
    frame: &Frame,
    masks: &RegionMasks,
    color: OverlayColor,
    blur: &BoxBlur,
) -> AuraResult<Frame> {
    check_dims(frame.width, frame.height, masks)?;
    let color = color.components();

    let mut combined = Vec::with_capacity(frame.data.len());
    for (px, &outside) in frame.data.chunks_exact(CHANNELS).zip(&masks.outside_aura) {
        for c in 0..CHANNELS {
            combined.push(combine(px[c], outside, color[c]));
        }
    }

    let fuzzy = blur.apply(&combined, frame.width, frame.height, CHANNELS)?;

    let mut data = Vec::with_capacity(frame.data.len());
    for (i, (px, fz)) in frame
        .data
        .chunks_exact(CHANNELS)
        .zip(fuzzy.chunks_exact(CHANNELS))
        .enumerate()
    {
        for c in 0..CHANNELS {
            data.push(restore_focus(
                px[c],
                fz[c],
                masks.in_focus[i],
                masks.outside_focus[i],
            ));
        }
    }

    Frame::from_rgb8(frame.width, frame.height, data)
}

/// Single-channel form of [`compose`] over a planar buffer.
pub fn compose_channel(
    plane: &[u8],
    width: u32,
    height: u32,
    masks: &RegionMasks,
    color_component: i32,
    blur: &BoxBlur,
) -> AuraResult<Vec<u8>> {
    check_dims(width, height, masks)?;
    if plane.len() != masks.in_focus.len() {
        return Err(AuraError::validation(
            "channel plane must hold width*height samples",
        ));
    }

    let combined: Vec<i32> = plane
        .iter()
        .zip(&masks.outside_aura)
        .map(|(&v, &outside)| combine(v, outside, color_component))
        .collect();
    let fuzzy = blur.apply(&combined, width, height, 1)?;

    Ok(plane
        .iter()
        .zip(&fuzzy)
        .enumerate()
        .map(|(i, (&v, &fz))| restore_focus(v, fz, masks.in_focus[i], masks.outside_focus[i]))
        .collect())
}

fn combine(value: u8, outside_aura: u8, color: i32) -> i32 {
    let background = i32::from(outside_aura) * i32::from(value);
    let aura = if outside_aura == 0 { color } else { 0 };
    background + aura
}

fn restore_focus(value: u8, fuzzy: f32, in_focus: u8, outside_focus: u8) -> u8 {
    let focus = f32::from(in_focus) * f32::from(value);
    saturate_u8(focus + fuzzy * f32::from(outside_focus))
}

fn saturate_u8(v: f32) -> u8 {
    v.clamp(0.0, 255.0) as u8
}

fn check_dims(width: u32, height: u32, masks: &RegionMasks) -> AuraResult<()> {
    let n = width as usize * height as usize;
    if masks.width != width
        || masks.height != height
        || masks.outside_aura.len() != n
        || masks.in_focus.len() != n
        || masks.outside_focus.len() != n
    {
        return Err(AuraError::validation(format!(
            "mask size mismatch: got {}x{}, expected {width}x{height}",
            masks.width, masks.height
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/composite.rs"]
mod tests;
