//! Perceptual hashes and the Hamming distance between them.
//!
//! A hash is a 64-bit value tagged with the algorithm that produced it.
//! Fingerprints in template documents are the hexadecimal rendering of the
//! `bits` field of a difference hash.

use crate::image::ImageView;
use crate::util::{ScreenMatchError, ScreenMatchResult};

mod average;
mod difference;
mod resample;

pub use average::AverageHasher;
pub use difference::DifferenceHasher;

/// Number of hexadecimal digits in a formatted fingerprint.
pub const FINGERPRINT_DIGITS: usize = 16;

/// Algorithm that produced an [`ImageHash`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HashKind {
    /// Horizontal brightness gradient over a 9x8 grid.
    Difference,
    /// Brightness relative to the mean over an 8x8 grid.
    Average,
}

/// A 64-bit perceptual hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageHash {
    bits: u64,
    kind: HashKind,
}

impl ImageHash {
    /// Creates a hash from raw bits and the algorithm that produced them.
    pub fn new(bits: u64, kind: HashKind) -> Self {
        Self { bits, kind }
    }

    /// Creates a difference hash from raw bits.
    pub fn difference(bits: u64) -> Self {
        Self::new(bits, HashKind::Difference)
    }

    /// Returns the raw hash bits.
    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// Returns the algorithm that produced this hash.
    pub fn kind(&self) -> HashKind {
        self.kind
    }

    /// Hamming distance to `other`: the number of differing bits.
    ///
    /// Hashes of different kinds are not comparable.
    pub fn distance(&self, other: &ImageHash) -> ScreenMatchResult<u32> {
        if self.kind != other.kind {
            return Err(ScreenMatchError::HashKindMismatch {
                left: self.kind,
                right: other.kind,
            });
        }
        Ok((self.bits ^ other.bits).count_ones())
    }
}

/// Computes a perceptual hash for a grayscale region.
///
/// The matcher hashes whole images and checkpoint crops through this trait,
/// so alternative implementations (including instrumented test doubles) can
/// be plugged in.
pub trait RegionHasher {
    /// Hashes the pixels visible through `view`.
    fn hash(&self, view: ImageView<'_, u8>) -> ScreenMatchResult<ImageHash>;
}

impl<H: RegionHasher + ?Sized> RegionHasher for &H {
    fn hash(&self, view: ImageView<'_, u8>) -> ScreenMatchResult<ImageHash> {
        (**self).hash(view)
    }
}

/// Parses a hexadecimal fingerprint.
///
/// Leading zeros are allowed in any number; at most 16 significant digits
/// remain. Signs, `0x` prefixes, whitespace and values wider than 64 bits are
/// rejected.
pub fn parse_fingerprint(fingerprint: &str) -> ScreenMatchResult<u64> {
    let invalid = || ScreenMatchError::InvalidFingerprint {
        fingerprint: fingerprint.to_owned(),
    };
    if fingerprint.is_empty() || !fingerprint.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let significant = fingerprint.trim_start_matches('0');
    if significant.len() > FINGERPRINT_DIGITS {
        return Err(invalid());
    }
    if significant.is_empty() {
        return Ok(0);
    }
    u64::from_str_radix(significant, 16).map_err(|_| invalid())
}

/// Parses a fingerprint, yielding zero for malformed input.
pub fn decode_fingerprint_lenient(fingerprint: &str) -> u64 {
    parse_fingerprint(fingerprint).unwrap_or(0)
}

/// Formats hash bits as a fixed-width lowercase fingerprint.
pub fn format_fingerprint(bits: u64) -> String {
    format!("{bits:016x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_short_and_full_width() {
        assert_eq!(parse_fingerprint("f").unwrap(), 0xf);
        assert_eq!(parse_fingerprint("FFFFFFFFFFFFFFFF").unwrap(), u64::MAX);
        assert_eq!(
            parse_fingerprint("00ff00ff00ff00ff").unwrap(),
            0x00ff_00ff_00ff_00ff
        );
    }

    #[test]
    fn parse_accepts_zero_padding_beyond_full_width() {
        assert_eq!(parse_fingerprint("00000000000000000001").unwrap(), 1);
        assert_eq!(parse_fingerprint("0000ffffffffffffffff").unwrap(), u64::MAX);
        assert_eq!(parse_fingerprint("000000000000000000000").unwrap(), 0);
        assert!(parse_fingerprint("0010000000000000000f").is_err());
    }

    #[test]
    fn parse_rejects_signs_prefixes_and_overflow() {
        for bad in ["", "+1", "-1", "0x10", " 1", "zz", "10000000000000000"] {
            assert!(parse_fingerprint(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn format_is_fixed_width() {
        assert_eq!(format_fingerprint(0), "0000000000000000");
        assert_eq!(format_fingerprint(0xabc), "0000000000000abc");
    }

    #[test]
    fn distance_counts_differing_bits() {
        let a = ImageHash::difference(0b1011);
        let b = ImageHash::difference(0b0001);
        assert_eq!(a.distance(&b).unwrap(), 2);
        assert_eq!(a.distance(&a).unwrap(), 0);
        let all = ImageHash::difference(u64::MAX);
        assert_eq!(all.distance(&ImageHash::difference(0)).unwrap(), 64);
    }
}
