use crate::foundation::error::{AuraError, AuraResult};

/// Uniform `kernel`x`kernel` averaging filter.
///
/// The anchor sits at `kernel / 2`, so even kernels reach one pixel further up/left than
/// down/right. Borders are reflected without repeating the edge pixel (`dcb|abcd|cba`), which keeps
/// every window full and leaves uniform regions unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoxBlur {
    kernel: u32,
}

impl BoxBlur {
    /// Create a box blur with the given side length in pixels.
    pub fn new(kernel: u32) -> AuraResult<Self> {
        if kernel == 0 {
            return Err(AuraError::validation("blur kernel must be >= 1"));
        }
        Ok(Self { kernel })
    }

    /// Kernel side length in pixels.
    pub fn kernel(&self) -> u32 {
        self.kernel
    }

    /// Blur an interleaved integer image with `channels` samples per pixel.
    ///
    /// Window sums are accumulated exactly in `i64` and divided once at the end.
    pub fn apply(
        &self,
        src: &[i32],
        width: u32,
        height: u32,
        channels: usize,
    ) -> AuraResult<Vec<f32>> {
        let expected_len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(channels))
            .ok_or_else(|| AuraError::validation("blur buffer size overflow"))?;
        if channels == 0 || src.len() != expected_len {
            return Err(AuraError::validation(
                "box blur expects src matching width*height*channels",
            ));
        }

        let dims = Dims {
            width: width as usize,
            height: height as usize,
            channels,
        };
        let kernel = self.kernel as usize;
        let mut tmp = vec![0i64; expected_len];
        let mut sums = vec![0i64; expected_len];

        horizontal_pass(src, &mut tmp, dims, kernel);
        vertical_pass(&tmp, &mut sums, dims, kernel);

        let area = (kernel * kernel) as f64;
        Ok(sums.into_iter().map(|s| (s as f64 / area) as f32).collect())
    }
}

#[derive(Clone, Copy)]
struct Dims {
    width: usize,
    height: usize,
    channels: usize,
}

fn horizontal_pass(src: &[i32], dst: &mut [i64], d: Dims, kernel: usize) {
    let anchor = (kernel / 2) as isize;
    let mut prefix = vec![0i64; d.width + kernel];
    for y in 0..d.height {
        let row = y * d.width * d.channels;
        for c in 0..d.channels {
            for j in 0..d.width + kernel - 1 {
                let sx = reflect101(j as isize - anchor, d.width);
                prefix[j + 1] = prefix[j] + i64::from(src[row + sx * d.channels + c]);
            }
            for x in 0..d.width {
                dst[row + x * d.channels + c] = prefix[x + kernel] - prefix[x];
            }
        }
    }
}

fn vertical_pass(src: &[i64], dst: &mut [i64], d: Dims, kernel: usize) {
    let anchor = (kernel / 2) as isize;
    let stride = d.width * d.channels;
    let mut prefix = vec![0i64; d.height + kernel];
    for x in 0..d.width {
        for c in 0..d.channels {
            let col = x * d.channels + c;
            for j in 0..d.height + kernel - 1 {
                let sy = reflect101(j as isize - anchor, d.height);
                prefix[j + 1] = prefix[j] + src[sy * stride + col];
            }
            for y in 0..d.height {
                dst[y * stride + col] = prefix[y + kernel] - prefix[y];
            }
        }
    }
}

fn reflect101(mut i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let last = (n - 1) as isize;
    loop {
        if i < 0 {
            i = -i;
        } else if i > last {
            i = 2 * last - i;
        } else {
            return i as usize;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/blur.rs"]
mod tests;
