//! Screenmatch identifies which known screen template a screenshot shows.
//!
//! Templates are JSON documents carrying a 64-bit difference-hash fingerprint,
//! optional checkpoint sub-regions with their own fingerprints, and OCR field
//! metadata (crop rectangles, languages, engine modes, table columns) for the
//! extraction stage that runs once a template is matched. Matching compares
//! perceptual hashes by Hamming distance instead of pixels, so it tolerates
//! compression and anti-aliasing noise.
//!
//! Matching is pure and never fails: any crop, hash or distance error is a
//! non-match. Enable the `rayon` feature to evaluate template sets in
//! parallel and `image-io` to load screenshots with the `image` crate.

pub mod hash;
pub mod image;
pub mod search;
pub mod template;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use crate::hash::{
    format_fingerprint, parse_fingerprint, AverageHasher, DifferenceHasher, HashKind, ImageHash,
    RegionHasher,
};
pub use crate::image::{ImageView, OwnedImage};
pub use crate::search::{
    Check, CheckOutcome, CheckRegion, MatchConfig, MatchReport, Matcher, CHECKPOINT_MAX_DISTANCE,
};
pub use crate::template::{
    load_template, load_template_with, load_templates_dir, AllowEntry, Callback, Checkpoint, Crop,
    FieldSchema, FingerprintPolicy, TableColumn, Template,
};
pub use crate::util::{ScreenMatchError, ScreenMatchResult};
