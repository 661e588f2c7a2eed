//! Fixtures shared by the integration tests.

#![allow(dead_code)]

/// Builds a 9x8 image whose difference hash is exactly `bits`.
///
/// Each row starts at 128 and steps by +10 where the bit is set (left pixel
/// darker than right) and by -10 otherwise.
pub fn image_with_dhash(bits: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(9 * 8);
    for row in 0..8 {
        let mut value = 128i32;
        data.push(value as u8);
        for col in 0..8 {
            let bit = (bits >> (63 - (row * 8 + col))) & 1;
            value += if bit == 1 { 10 } else { -10 };
            data.push(value as u8);
        }
    }
    data
}

/// Nearest-neighbour upscale of a contiguous image by an integer factor.
pub fn upscale(data: &[u8], width: usize, height: usize, factor: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(width * height * factor * factor);
    for y in 0..height * factor {
        for x in 0..width * factor {
            out.push(data[(y / factor) * width + x / factor]);
        }
    }
    out
}
