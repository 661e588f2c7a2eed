//! Reduction of a view to the small grids the hashes compare.
//!
//! Separable triangle (bilinear) filter whose support widens with the
//! downscale factor, with 8.8 fixed-point weights. Rows are filtered first and
//! the intermediate is truncated to `u8`; columns are filtered second in the
//! same way. Sample indices clamp to the image border. This is the reduction
//! goimagehash performs (nfnt `resize.Bilinear`) before hashing, so
//! fingerprints recorded by that tool compare bit for bit on gray input.

use crate::image::ImageView;

/// Per-output-sample filter taps along one axis.
#[derive(Debug)]
struct Weights {
    coeffs: Vec<i16>,
    starts: Vec<i64>,
    taps: usize,
}

fn triangle(t: f64) -> f64 {
    let t = t.abs();
    if t <= 1.0 {
        1.0 - t
    } else {
        0.0
    }
}

impl Weights {
    fn new(out_len: usize, in_len: usize) -> Self {
        let scale = in_len as f64 / out_len as f64;
        let taps = 2 * (scale.ceil().max(1.0) as usize);
        let factor = (1.0 / scale).min(1.0);

        let mut coeffs = Vec::with_capacity(out_len * taps);
        let mut starts = Vec::with_capacity(out_len);
        for out in 0..out_len {
            let center = scale * (out as f64 + 0.5) - 0.5;
            // Truncates toward zero.
            let start = center as i64 - (taps / 2) as i64 + 1;
            let offset = center - start as f64;
            for tap in 0..taps {
                let t = (offset - tap as f64) * factor;
                coeffs.push((triangle(t) * 256.0) as i16);
            }
            starts.push(start);
        }
        Self {
            coeffs,
            starts,
            taps,
        }
    }

    /// Filters output sample `out` from `len` source samples read through `src`.
    fn sample(&self, out: usize, len: usize, src: impl Fn(usize) -> u8) -> u8 {
        let max = len as i64 - 1;
        let start = self.starts[out];
        let mut acc = 0i32;
        let mut sum = 0i32;
        let taps = &self.coeffs[out * self.taps..(out + 1) * self.taps];
        for (tap, &coeff) in taps.iter().enumerate() {
            if coeff == 0 {
                continue;
            }
            let idx = (start + tap as i64).clamp(0, max) as usize;
            acc += i32::from(coeff) * i32::from(src(idx));
            sum += i32::from(coeff);
        }
        if sum == 0 {
            return 0;
        }
        (acc / sum).clamp(0, 255) as u8
    }
}

/// Resamples `view` to `cols x rows` pixels in row-major order.
pub(crate) fn downscale(view: ImageView<'_, u8>, cols: usize, rows: usize) -> Vec<u8> {
    let width = view.width();
    let height = view.height();

    let horizontal = Weights::new(cols, width);
    let mut temp = vec![0u8; height * cols];
    for y in 0..height {
        let Some(row) = view.row(y) else { continue };
        for x in 0..cols {
            temp[y * cols + x] = horizontal.sample(x, width, |i| row[i]);
        }
    }

    let vertical = Weights::new(rows, height);
    let mut out = vec![0u8; rows * cols];
    for x in 0..cols {
        for y in 0..rows {
            out[y * cols + x] = vertical.sample(y, height, |i| temp[i * cols + x]);
        }
    }
    out
}
