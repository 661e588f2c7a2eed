#![cfg(feature = "image-io")]

use screenmatch::io::{load_gray_image, luma_bt601, owned_from_dynamic_image, view_from_gray_image};
use screenmatch::{DifferenceHasher, RegionHasher, ScreenMatchError};

#[test]
fn gray_buffer_views_share_pixels() {
    let img = image::GrayImage::from_fn(18, 16, |x, _| image::Luma([(x * 10) as u8]));
    let view = view_from_gray_image(&img).unwrap();
    assert_eq!(view.width(), 18);
    assert_eq!(view.height(), 16);
    assert_eq!(view.row(0).unwrap()[17], 170);

    // Brightness rises left to right, so every comparison sets its bit.
    assert_eq!(DifferenceHasher.hash(view).unwrap().bits(), u64::MAX);
}

#[test]
fn color_images_use_bt601_weights() {
    assert_eq!(luma_bt601([255, 0, 0]), 76);
    assert_eq!(luma_bt601([0, 255, 0]), 150);
    assert_eq!(luma_bt601([0, 0, 255]), 29);
    assert_eq!(luma_bt601([200, 200, 200]), 200);

    let rgb = image::RgbImage::from_fn(9, 8, |x, _| {
        if x % 2 == 0 {
            image::Rgb([255, 0, 0])
        } else {
            image::Rgb([0, 0, 255])
        }
    });
    let owned = owned_from_dynamic_image(&image::DynamicImage::ImageRgb8(rgb)).unwrap();
    assert_eq!((owned.width(), owned.height()), (9, 8));
    assert_eq!(&owned.data()[..3], &[76, 29, 76]);

    // Red columns are brighter than blue ones, so bits alternate 0, 1.
    let hash = DifferenceHasher.hash(owned.view()).unwrap();
    assert_eq!(hash.bits(), 0x5555_5555_5555_5555);
}

#[test]
fn gray_images_are_copied_unchanged() {
    let gray = image::GrayImage::from_fn(4, 2, |x, y| image::Luma([(x + 4 * y) as u8]));
    let owned = owned_from_dynamic_image(&image::DynamicImage::ImageLuma8(gray)).unwrap();
    assert_eq!(owned.data(), &[0, 1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn load_gray_image_decodes_png() {
    let dir = std::env::temp_dir().join(format!("screenmatch-io-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("screen.png");
    image::RgbImage::from_pixel(12, 10, image::Rgb([0, 255, 0]))
        .save(&path)
        .unwrap();

    let owned = load_gray_image(&path).unwrap();
    assert_eq!((owned.width(), owned.height()), (12, 10));
    assert!(owned.data().iter().all(|&p| p == 150));

    let err = load_gray_image(dir.join("missing.png")).err().unwrap();
    assert!(matches!(err, ScreenMatchError::ImageIo { .. }));
    std::fs::remove_dir_all(&dir).unwrap();
}
