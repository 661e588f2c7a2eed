//! Difference hash (dHash).
//!
//! The region is resampled to 9x8 pixels. For each of the 8 rows and each of
//! the first 8 columns, bit `row * 8 + col` is set when the pixel is strictly
//! darker than its right neighbour. Bit 0 is the most significant bit
//! of the result, so the top-left comparison lands in the leading hex digit of
//! a fingerprint.

use crate::hash::resample::downscale;
use crate::hash::{HashKind, ImageHash, RegionHasher};
use crate::image::ImageView;
use crate::util::ScreenMatchResult;

const COLS: usize = 9;
const ROWS: usize = 8;

/// Default hasher used by the matcher.
#[derive(Clone, Copy, Debug, Default)]
pub struct DifferenceHasher;

impl RegionHasher for DifferenceHasher {
    fn hash(&self, view: ImageView<'_, u8>) -> ScreenMatchResult<ImageHash> {
        let pixels = downscale(view, COLS, ROWS);
        let mut bits = 0u64;
        let mut idx = 0u32;
        for row in pixels.chunks_exact(COLS) {
            for pair in row.windows(2) {
                if pair[0] < pair[1] {
                    bits |= 1u64 << (63 - idx);
                }
                idx += 1;
            }
        }
        Ok(ImageHash::new(bits, HashKind::Difference))
    }
}
