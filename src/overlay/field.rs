use crate::foundation::core::GazePoint;
use crate::foundation::error::AuraResult;
use crate::frame::pixel_count;

/// Per-pixel Euclidean distance to a gaze point, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceField {
    /// Field width in pixels.
    pub width: u32,
    /// Field height in pixels.
    pub height: u32,
    /// Distances, `width * height` entries.
    pub data: Vec<f32>,
}

impl DistanceField {
    /// Distance stored for pixel `(x, y)`.
    pub fn at(&self, x: u32, y: u32) -> f32 {
        self.data[y as usize * self.width as usize + x as usize]
    }
}

/// Build the distance field from every pixel of a `width`x`height` frame to `point`.
///
/// Squared offsets are computed once per column and once per row; each cell is one add and one
/// square root. Sums are taken in `u64` so large frames stay exact before the root.
pub fn build_field(width: u32, height: u32, point: GazePoint) -> AuraResult<DistanceField> {
    let len = pixel_count(width, height)?;
    let dx2 = squared_offsets(width, point.x);
    let dy2 = squared_offsets(height, point.y);

    let mut data = Vec::with_capacity(len);
    for &row in &dy2 {
        data.extend(dx2.iter().map(|&col| ((col + row) as f64).sqrt() as f32));
    }

    Ok(DistanceField {
        width,
        height,
        data,
    })
}

fn squared_offsets(extent: u32, center: i32) -> Vec<u64> {
    (0..extent)
        .map(|i| {
            let d = (i64::from(center) - i64::from(i)).unsigned_abs();
            d * d
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/field.rs"]
mod tests;
