use crate::foundation::error::{AuraError, AuraResult};

/// Number of interleaved channels per pixel.
pub const CHANNELS: usize = 3;

/// A video frame as 8-bit RGB pixels.
///
/// Bytes are tightly packed, row-major, interleaved `r, g, b` (ffmpeg `rgb24`). Channel index 0 is
/// red, 1 is green, 2 is blue throughout the crate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGB8 bytes.
    pub data: Vec<u8>,
}

impl Frame {
    /// Wrap an `rgb24` buffer, checking that its length matches the geometry.
    pub fn from_rgb8(width: u32, height: u32, data: Vec<u8>) -> AuraResult<Self> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(AuraError::validation(format!(
                "frame buffer has {} bytes, expected {expected} for {width}x{height} rgb24",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A frame filled with one color.
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> AuraResult<Self> {
        let pixels = pixel_count(width, height)?;
        Self::from_rgb8(width, height, rgb.repeat(pixels))
    }

    /// Number of pixels in the frame.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// RGB triple at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let px = self.data.get(i..i + CHANNELS)?;
        Some([px[0], px[1], px[2]])
    }

    /// Copy one channel out into a planar buffer.
    pub fn channel_plane(&self, channel: usize) -> Vec<u8> {
        debug_assert!(channel < CHANNELS);
        self.data
            .chunks_exact(CHANNELS)
            .map(|px| px[channel])
            .collect()
    }

    /// Reassemble a frame from three planar channels in `r, g, b` order.
    pub fn from_planes(width: u32, height: u32, planes: [&[u8]; 3]) -> AuraResult<Self> {
        let pixels = pixel_count(width, height)?;
        if planes.iter().any(|p| p.len() != pixels) {
            return Err(AuraError::validation(
                "channel planes must each hold width*height samples",
            ));
        }
        let mut data = Vec::with_capacity(pixels * CHANNELS);
        for i in 0..pixels {
            data.extend_from_slice(&[planes[0][i], planes[1][i], planes[2][i]]);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }
}

pub(crate) fn pixel_count(width: u32, height: u32) -> AuraResult<usize> {
    if width == 0 || height == 0 {
        return Err(AuraError::validation("frame width/height must be non-zero"));
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| AuraError::validation("frame size overflow"))
}

pub(crate) fn byte_len(width: u32, height: u32) -> AuraResult<usize> {
    pixel_count(width, height)?
        .checked_mul(CHANNELS)
        .ok_or_else(|| AuraError::validation("frame size overflow"))
}

#[cfg(test)]
#[path = "../tests/unit/frame.rs"]
mod tests;
