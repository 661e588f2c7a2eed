//! Crop rectangles and their positional `[x, y, w, h]` encoding.

use crate::image::ImageView;
use crate::util::{ScreenMatchError, ScreenMatchResult};
use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Axis-aligned rectangle with origin `(x, y)` and extent `(w, h)`.
///
/// Encoded as a 4-element array. Decoding accepts integer or floating-point
/// numbers and truncates fractions toward zero; trailing elements are ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Crop {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Crop {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.w)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.h)
    }

    /// Returns true when the rectangle is non-empty and lies inside a
    /// `width x height` canvas.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.w > 0
            && self.h > 0
            && self.right() <= i64::from(width)
            && self.bottom() <= i64::from(height)
    }

    /// Returns `(x, y, width, height)` as unsigned ROI coordinates.
    pub fn to_roi(&self) -> Option<(usize, usize, usize, usize)> {
        Some((
            usize::try_from(self.x).ok()?,
            usize::try_from(self.y).ok()?,
            usize::try_from(self.w).ok()?,
            usize::try_from(self.h).ok()?,
        ))
    }

    /// Crops `view` to this rectangle without copying.
    ///
    /// Fails when any component is negative or the rectangle is not fully
    /// inside the view.
    pub fn apply<'a>(&self, view: ImageView<'a, u8>) -> ScreenMatchResult<ImageView<'a, u8>> {
        let (x, y, w, h) = self.to_roi().ok_or(ScreenMatchError::CropOutOfBounds {
            x: i64::from(self.x),
            y: i64::from(self.y),
            width: i64::from(self.w),
            height: i64::from(self.h),
            img_width: view.width(),
            img_height: view.height(),
        })?;
        view.roi(x, y, w, h)
    }
}

impl Serialize for Crop {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.x, self.y, self.w, self.h].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Crop {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(CropVisitor)
    }
}

struct CropVisitor;

impl<'de> Visitor<'de> for CropVisitor {
    type Value = Crop;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an array [x, y, w, h] of numbers")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Crop, A::Error> {
        let mut values = [0i32; 4];
        for (idx, slot) in values.iter_mut().enumerate() {
            let Coordinate(value) = seq
                .next_element::<Coordinate>()?
                .ok_or_else(|| de::Error::invalid_length(idx, &self))?;
            *slot = value;
        }
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        let [x, y, w, h] = values;
        Ok(Crop { x, y, w, h })
    }
}

/// A single rectangle component decoded from any JSON number.
struct Coordinate(i32);

impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CoordinateVisitor)
    }
}

struct CoordinateVisitor;

impl<'de> Visitor<'de> for CoordinateVisitor {
    type Value = Coordinate;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number within the 32-bit integer range")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Coordinate, E> {
        i32::try_from(v)
            .map(Coordinate)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Coordinate, E> {
        i32::try_from(v)
            .map(Coordinate)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Coordinate, E> {
        let truncated = v.trunc();
        if !truncated.is_finite()
            || truncated < f64::from(i32::MIN)
            || truncated > f64::from(i32::MAX)
        {
            return Err(E::invalid_value(de::Unexpected::Float(v), &self));
        }
        Ok(Coordinate(truncated as i32))
    }
}
