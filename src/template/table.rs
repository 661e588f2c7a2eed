//! Table column descriptors and their positional encoding.

use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Display descriptor for one column of tabular output.
///
/// Encoded as `[title, field, bold, color]`. Decoding fails when fewer than
/// four elements are present or an element has the wrong type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableColumn {
    /// Column header.
    pub title: String,
    /// Name of the OCR field rendered in this column.
    pub field: String,
    pub bold: bool,
    /// Color in whatever notation the renderer understands, e.g. `#FFFFFF`.
    pub color: String,
}

impl TableColumn {
    pub fn new(
        title: impl Into<String>,
        field: impl Into<String>,
        bold: bool,
        color: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            field: field.into(),
            bold,
            color: color.into(),
        }
    }
}

impl Serialize for TableColumn {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.title, &self.field, self.bold, &self.color).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TableColumn {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(TableColumnVisitor)
    }
}

struct TableColumnVisitor;

impl<'de> Visitor<'de> for TableColumnVisitor {
    type Value = TableColumn;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an array [title, field, bold, color]")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<TableColumn, A::Error> {
        let title: String = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let field: String = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;
        let bold: bool = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(2, &self))?;
        let color: String = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(3, &self))?;
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(TableColumn {
            title,
            field,
            bold,
            color,
        })
    }
}
