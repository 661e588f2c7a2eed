//! Error types for screenmatch.

use crate::hash::HashKind;
use thiserror::Error;

/// Result alias for screenmatch operations.
pub type ScreenMatchResult<T> = std::result::Result<T, ScreenMatchError>;

/// Errors that can occur while loading templates or evaluating matches.
///
/// Loading surfaces these to the caller. Matching never does: the matcher
/// folds every error into a non-match and records it in the report.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ScreenMatchError {
    /// Reading a template document failed.
    #[error("failed to read {path}: {reason}")]
    Io { path: String, reason: String },
    /// The template document is structurally malformed.
    #[error("malformed template document: {reason}")]
    Deserialize { reason: String },
    /// A fingerprint string is not a hexadecimal value of at most 64 bits.
    #[error("invalid fingerprint {fingerprint:?}")]
    InvalidFingerprint { fingerprint: String },
    /// Two hashes computed with different algorithms were compared.
    #[error("cannot compare {left:?} hash with {right:?} hash")]
    HashKindMismatch { left: HashKind, right: HashKind },
    /// A crop rectangle does not fit inside the image.
    #[error(
        "crop out of bounds: x={x}, y={y}, w={width}, h={height} for image {img_width}x{img_height}"
    )]
    CropOutOfBounds {
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        img_width: usize,
        img_height: usize,
    },
    /// A checkpoint or field declares no crop rectangle.
    #[error("{context} has no crop rectangle")]
    MissingCrop { context: String },
    /// The template has no field schema with this name.
    #[error("unknown field {name:?}")]
    UnknownField { name: String },
    /// Image dimensions are zero or overflow.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is smaller than the image width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// The pixel buffer is shorter than the view requires.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Decoding an image through the `image` crate failed.
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
}

impl From<serde_json::Error> for ScreenMatchError {
    fn from(err: serde_json::Error) -> Self {
        ScreenMatchError::Deserialize {
            reason: err.to_string(),
        }
    }
}
