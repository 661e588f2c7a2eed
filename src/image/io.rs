//! Screenshot adapters for the `image` crate.
//!
//! Color screenshots are reduced to gray with the BT.601 weights
//! (0.299, 0.587, 0.114) that goimagehash applies, rather than the Rec. 709
//! weights of `DynamicImage::to_luma8`. Alpha is ignored.

use crate::image::{ImageView, OwnedImage};
use crate::util::{ScreenMatchError, ScreenMatchResult};
use image::{DynamicImage, GrayImage};
use std::path::Path;

/// Borrows the pixels of a gray buffer without copying.
pub fn view_from_gray_image(img: &GrayImage) -> ScreenMatchResult<ImageView<'_, u8>> {
    ImageView::from_slice(img.as_raw(), img.width() as usize, img.height() as usize)
}

/// BT.601 luma of an RGB pixel, rounded to the nearest level.
pub fn luma_bt601([r, g, b]: [u8; 3]) -> u8 {
    let weighted = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
    ((weighted + 500) / 1000) as u8
}

/// Converts a decoded screenshot to the gray buffer the hashers consume.
///
/// Gray 8-bit images are copied as-is; every other color type goes through
/// 8-bit RGB and [`luma_bt601`].
pub fn owned_from_dynamic_image(img: &DynamicImage) -> ScreenMatchResult<OwnedImage> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = match img {
        DynamicImage::ImageLuma8(gray) => gray.as_raw().clone(),
        other => other.to_rgb8().pixels().map(|p| luma_bt601(p.0)).collect(),
    };
    OwnedImage::new(data, width, height)
}

/// Decodes a screenshot file into a BT.601 gray image.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> ScreenMatchResult<OwnedImage> {
    let img = image::open(path).map_err(|err| ScreenMatchError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}
