//! Average hash (aHash) over an 8x8 grid.

use crate::hash::resample::downscale;
use crate::hash::{HashKind, ImageHash, RegionHasher};
use crate::image::ImageView;
use crate::util::ScreenMatchResult;

const SIDE: usize = 8;

/// Sets bit `i` (MSB first) when pixel `i` of the 8x8 resample is brighter
/// than the mean.
#[derive(Clone, Copy, Debug, Default)]
pub struct AverageHasher;

impl RegionHasher for AverageHasher {
    fn hash(&self, view: ImageView<'_, u8>) -> ScreenMatchResult<ImageHash> {
        let pixels = downscale(view, SIDE, SIDE);
        let total: u32 = pixels.iter().map(|&p| u32::from(p)).sum();
        let count = pixels.len() as u32;

        let mut bits = 0u64;
        for (idx, &pixel) in pixels.iter().enumerate() {
            if u32::from(pixel) * count > total {
                bits |= 1u64 << (63 - idx);
            }
        }
        Ok(ImageHash::new(bits, HashKind::Average))
    }
}
