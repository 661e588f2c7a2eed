//! OCR extraction instructions for named template fields.

use crate::template::Crop;
use serde::{Deserialize, Serialize};

/// Tesseract page segmentation mode treating the region as one text line.
pub const PSM_SINGLE_LINE: i32 = 7;
/// Tesseract OCR engine mode selecting the LSTM engine.
pub const OEM_LSTM: i32 = 1;

/// One element of a field's character allow-list.
///
/// Template authors write digits either as numbers (`[0, 1, 2]`) or as
/// strings (`["0", "1", "2"]`); both forms, and mixtures, are accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AllowEntry {
    Digit(i64),
    Text(String),
}

/// Post-processing hint attached to a field.
///
/// Variants are tried in declaration order, so `[]` decodes as an empty
/// `Names` chain. Shapes no other variant accepts are kept verbatim in
/// `Other` and re-encoded unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Callback {
    /// A single named post-processor.
    Name(String),
    /// An ordered chain of post-processors, possibly empty.
    Names(Vec<String>),
    /// Numeric post-processor codes.
    Codes(Vec<i64>),
    /// Any other JSON value.
    Other(serde_json::Value),
}

/// How to extract one field from a matched image.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSchema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback: Option<Callback>,
    /// OCR languages, e.g. `["eng"]`.
    #[serde(rename = "lang", skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub oem: i32,
    #[serde(skip_serializing_if = "is_zero")]
    pub psm: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop: Option<Crop>,
    #[serde(rename = "allowlist", skip_serializing_if = "Vec::is_empty")]
    pub allow_list: Vec<AllowEntry>,
}

fn is_zero(value: &i32) -> bool {
    *value == 0
}

impl FieldSchema {
    /// Single-line English field restricted to the digits 0-9.
    pub fn number(crop: Option<Crop>) -> Self {
        Self {
            callback: Some(Callback::Names(Vec::new())),
            languages: vec!["eng".to_owned()],
            oem: OEM_LSTM,
            psm: PSM_SINGLE_LINE,
            crop,
            allow_list: (0..10).map(AllowEntry::Digit).collect(),
        }
    }

    /// Single-line field in the given languages with no character restriction.
    pub fn text<I, S>(crop: Option<Crop>, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            callback: Some(Callback::Names(Vec::new())),
            languages: languages.into_iter().map(Into::into).collect(),
            oem: OEM_LSTM,
            psm: PSM_SINGLE_LINE,
            crop,
            allow_list: Vec::new(),
        }
    }

    /// Flattens the allow-list into a character whitelist string.
    ///
    /// Returns `None` when the field accepts any character.
    pub fn allowed_chars(&self) -> Option<String> {
        if self.allow_list.is_empty() {
            return None;
        }
        let mut out = String::new();
        for entry in &self.allow_list {
            match entry {
                AllowEntry::Digit(d) => out.push_str(&d.to_string()),
                AllowEntry::Text(s) => out.push_str(s),
            }
        }
        Some(out)
    }

    /// Languages joined the way Tesseract expects them, e.g. `eng+deu`.
    pub fn language_spec(&self) -> String {
        self.languages.join("+")
    }
}
