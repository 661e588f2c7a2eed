//! Template documents: fingerprints, checkpoints and field extraction metadata.
//!
//! A template is loaded once from JSON and treated as immutable afterwards.
//! Loading validates structure only; semantic checks such as crop rectangles
//! fitting the declared dimensions are left to the caller.

use crate::hash::{decode_fingerprint_lenient, parse_fingerprint, ImageHash};
use crate::image::ImageView;
use crate::search::Matcher;
use crate::trace::trace_warn;
use crate::util::{ScreenMatchError, ScreenMatchResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

mod crop;
mod field;
mod table;

pub use crop::Crop;
pub use field::{AllowEntry, Callback, FieldSchema, OEM_LSTM, PSM_SINGLE_LINE};
pub use table::TableColumn;

/// How malformed (non-hex) checkpoint fingerprints are treated.
///
/// The whole-image fingerprint of a template without checkpoints is not
/// subject to the policy: if it is absent or malformed the template never
/// matches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FingerprintPolicy {
    /// Decode malformed fingerprints as the zero hash and log a warning.
    #[default]
    Lenient,
    /// Reject malformed fingerprints: loading fails and matching reports
    /// the affected check as failed.
    Strict,
}

impl FingerprintPolicy {
    /// Decodes `fingerprint` as a difference hash under this policy.
    pub fn decode(&self, fingerprint: &str) -> ScreenMatchResult<ImageHash> {
        match self {
            FingerprintPolicy::Lenient => Ok(lenient_hash(fingerprint)),
            FingerprintPolicy::Strict => parse_fingerprint(fingerprint).map(ImageHash::difference),
        }
    }
}

fn lenient_hash(fingerprint: &str) -> ImageHash {
    if parse_fingerprint(fingerprint).is_err() {
        trace_warn!(
            "malformed fingerprint decoded as zero hash",
            fingerprint = fingerprint,
        );
    }
    ImageHash::difference(decode_fingerprint_lenient(fingerprint))
}

/// A visual anchor: a sub-region whose hash must match almost exactly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Checkpoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop: Option<Crop>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fingerprint: String,
}

impl Checkpoint {
    pub fn new(crop: Crop, fingerprint: impl Into<String>) -> Self {
        Self {
            crop: Some(crop),
            fingerprint: fingerprint.into(),
        }
    }

    /// Returns the checkpoint region of `image`.
    pub fn region<'a>(&self, image: ImageView<'a, u8>) -> ScreenMatchResult<ImageView<'a, u8>> {
        let crop = self.crop.as_ref().ok_or_else(|| ScreenMatchError::MissingCrop {
            context: "checkpoint".to_owned(),
        })?;
        crop.apply(image)
    }

    /// Decodes the declared fingerprint under `policy`.
    pub fn hash(&self, policy: FingerprintPolicy) -> ScreenMatchResult<ImageHash> {
        policy.decode(&self.fingerprint)
    }
}

/// Declarative description of a recognizable screen layout.
///
/// When `checkpoints` is non-empty the whole-image `fingerprint` and
/// `threshold` are ignored for matching.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Template {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub author: String,
    /// Expected image width; advisory only.
    #[serde(skip_serializing_if = "is_zero_u32")]
    pub width: u32,
    /// Expected image height; advisory only.
    #[serde(skip_serializing_if = "is_zero_u32")]
    pub height: u32,
    #[serde(rename = "ocr_schema", skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, FieldSchema>,
    /// Whole-image difference hash as hexadecimal.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fingerprint: String,
    /// Maximum Hamming distance for a whole-image match; 0 means exact.
    #[serde(skip_serializing_if = "is_zero_i32")]
    pub threshold: i32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub table: Vec<TableColumn>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checkpoints: Vec<Checkpoint>,
}

fn is_zero_u32(value: &u32) -> bool {
    *value == 0
}

fn is_zero_i32(value: &i32) -> bool {
    *value == 0
}

impl Template {
    /// Parses a template document.
    pub fn from_json_str(text: &str) -> ScreenMatchResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Encodes the template as compact JSON.
    pub fn to_json_string(&self) -> ScreenMatchResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Encodes the template as indented JSON.
    pub fn to_json_string_pretty(&self) -> ScreenMatchResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Whole-image hash decoded leniently: malformed hex yields zero.
    ///
    /// Matching does not use this value for a malformed fingerprint; see
    /// [`Matcher::match_hash`].
    pub fn hash(&self) -> ImageHash {
        lenient_hash(&self.fingerprint)
    }

    /// Checks that every fingerprint the matcher would consult is valid hex.
    ///
    /// The whole-image fingerprint is only checked when there are no
    /// checkpoints, since it is not used otherwise.
    pub fn validate_fingerprints(&self) -> ScreenMatchResult<()> {
        if self.checkpoints.is_empty() {
            parse_fingerprint(&self.fingerprint)?;
        }
        for checkpoint in &self.checkpoints {
            parse_fingerprint(&checkpoint.fingerprint)?;
        }
        Ok(())
    }

    /// Returns the extraction schema of a named field.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.get(name)
    }

    /// Returns the region of `image` holding the named field.
    pub fn field_view<'a>(
        &self,
        image: ImageView<'a, u8>,
        name: &str,
    ) -> ScreenMatchResult<ImageView<'a, u8>> {
        let field = self.field(name).ok_or_else(|| ScreenMatchError::UnknownField {
            name: name.to_owned(),
        })?;
        let crop = field.crop.as_ref().ok_or_else(|| ScreenMatchError::MissingCrop {
            context: format!("field {name:?}"),
        })?;
        crop.apply(image)
    }

    /// Decides whether `image` matches using the default matcher.
    pub fn matches(&self, image: ImageView<'_, u8>) -> bool {
        Matcher::new().matches(image, self)
    }

    /// Decides whether a precomputed whole-image hash is within `threshold`.
    pub fn match_hash(&self, hash: &ImageHash) -> bool {
        Matcher::new().match_hash(hash, self)
    }
}

/// Reads and parses a template document with lenient fingerprints.
pub fn load_template<P: AsRef<Path>>(path: P) -> ScreenMatchResult<Template> {
    load_template_with(path, FingerprintPolicy::Lenient)
}

/// Reads and parses a template document.
///
/// With [`FingerprintPolicy::Strict`] a malformed fingerprint fails the load.
pub fn load_template_with<P: AsRef<Path>>(
    path: P,
    policy: FingerprintPolicy,
) -> ScreenMatchResult<Template> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|err| ScreenMatchError::Io {
        path: path.display().to_string(),
        reason: err.to_string(),
    })?;
    let template = Template::from_json_str(&text)?;
    if policy == FingerprintPolicy::Strict {
        template.validate_fingerprints()?;
    }
    Ok(template)
}

/// Loads every `*.json` document in `dir`, ordered by file name.
pub fn load_templates_dir<P: AsRef<Path>>(
    dir: P,
    policy: FingerprintPolicy,
) -> ScreenMatchResult<Vec<Template>> {
    let dir = dir.as_ref();
    let io_err = |err: std::io::Error| ScreenMatchError::Io {
        path: dir.display().to_string(),
        reason: err.to_string(),
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    paths
        .iter()
        .map(|path| load_template_with(path, policy))
        .collect()
}
