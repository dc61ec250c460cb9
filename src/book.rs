//! Typed view of the book JSON that mdBook hands to preprocessors.
//!
//! Only chapter `content` is ever modified. Every other field lives in an
//! insertion-ordered JSON map so the book round-trips losslessly, with field
//! order intact.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};
use serde_json::Value;

use crate::error::PreprocessError;

pub type JsonMap = serde_json::Map<String, Value>;

// ============================================================================
// Book
// ============================================================================

/// The book document: ordered sections plus passthrough metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Book {
    pub sections: Vec<BookItem>,
    /// Sibling fields (e.g. `__non_exhaustive`), emitted unchanged.
    #[serde(flatten)]
    pub extra: JsonMap,
}

/// Untyped sections, decoded one by one so errors can name the index.
#[derive(Deserialize)]
struct RawBook {
    sections: Vec<Value>,
    #[serde(flatten)]
    extra: JsonMap,
}

impl Book {
    /// Decode a book from its JSON value.
    pub fn from_value(value: Value) -> Result<Self, PreprocessError> {
        let raw: RawBook = serde_json::from_value(value).map_err(|source| {
            PreprocessError::ShapeMismatch {
                location: "book".to_string(),
                source,
            }
        })?;

        let sections = raw
            .sections
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value(item).map_err(|source| PreprocessError::ShapeMismatch {
                    location: format!("section {index}"),
                    source,
                })
            })
            .collect::<Result<Vec<BookItem>, _>>()?;

        Ok(Self {
            sections,
            extra: raw.extra,
        })
    }

    /// Iterate chapters mutably, in book order.
    pub fn chapters_mut(&mut self) -> impl Iterator<Item = &mut Chapter> {
        self.sections.iter_mut().filter_map(|item| match item {
            BookItem::Chapter(chapter) => Some(chapter),
            _ => None,
        })
    }
}

// ============================================================================
// BookItem
// ============================================================================

/// One entry of the book's top-level section list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BookItem {
    Chapter(Chapter),
    Separator,
    PartTitle(String),
}

// ============================================================================
// Chapter
// ============================================================================

/// A chapter object. Guaranteed to hold a string `content` field.
#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    fields: JsonMap,
}

impl Chapter {
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    pub fn content(&self) -> &str {
        self.fields
            .get("content")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Replace the content in place, keeping its position among the fields.
    pub fn set_content(&mut self, content: String) {
        if let Some(slot) = self.fields.get_mut("content") {
            *slot = Value::String(content);
        }
    }
}

impl TryFrom<JsonMap> for Chapter {
    type Error = &'static str;

    fn try_from(fields: JsonMap) -> Result<Self, Self::Error> {
        match fields.get("content") {
            Some(Value::String(_)) => Ok(Self { fields }),
            Some(_) => Err("chapter `content` is not a string"),
            None => Err("chapter has no `content` field"),
        }
    }
}

impl<'de> Deserialize<'de> for Chapter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = JsonMap::deserialize(deserializer)?;
        Self::try_from(fields).map_err(D::Error::custom)
    }
}

impl Serialize for Chapter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

// ============================================================================
// tests
// ============================================================================
