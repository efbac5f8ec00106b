//! # Export Document
//!
//! The portable JSON file used to move a catalog between machines:
//!
//! ```json
//! {
//!   "snippets":   [ ... ],
//!   "categories": [ ... ],
//!   "banners":    [ ... ],
//!   "exportDate": "2024-03-01T09:00:00Z"
//! }
//! ```
//!
//! ## Import Leniency
//!
//! [`ImportedDocument::parse`] checks exactly one thing: the top level has a
//! `snippets` field holding an array. Records themselves are not validated.
//! Each field is read on its own: a missing, null or wrong-typed value loads
//! as the empty value for that field, numbers and booleans in text fields
//! are kept as their text, and an element that is not an object at all
//! becomes an empty record. Such records show up as blanks in listings.
//!
//! Timestamps accept RFC 3339, a bare `YYYY-MM-DD` date (midnight UTC) or
//! epoch milliseconds; anything else loads as the Unix epoch.
//!
//! A document without `categories` or `banners` carries `None` for them.
//!
//! ## File Names
//!
//! `code-library-export-YYYY-MM-DD.json` for a full export and
//! `code-library-export-selected-YYYY-MM-DD.json` when only some snippets
//! were picked.

use crate::error::{CodeshelfError, Result};
use crate::model::{Banner, Category, CodeSnippet};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const FILE_PREFIX: &str = "code-library-export";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub snippets: Vec<CodeSnippet>,
    pub categories: Vec<Category>,
    pub banners: Vec<Banner>,
    pub export_date: DateTime<Utc>,
}

impl Document {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A decoded import file. Only `snippets` is guaranteed to be present.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedDocument {
    pub snippets: Vec<CodeSnippet>,
    pub categories: Option<Vec<Category>>,
    pub banners: Option<Vec<Banner>>,
}

impl ImportedDocument {
    /// Decode `raw`, checking only that `snippets` is an array.
    pub fn parse(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| CodeshelfError::InvalidFormat(format!("not valid JSON: {}", e)))?;
        Self::from_value(value)
    }

    pub fn from_value(mut value: Value) -> Result<Self> {
        let object = value.as_object_mut().ok_or_else(|| {
            CodeshelfError::InvalidFormat("expected a JSON object at the top level".to_string())
        })?;

        let snippets = match object.remove("snippets") {
            Some(Value::Array(items)) => decode_records(items, snippet_from_record),
            Some(_) => {
                return Err(CodeshelfError::InvalidFormat(
                    "'snippets' must be a list".to_string(),
                ))
            }
            None => {
                return Err(CodeshelfError::InvalidFormat(
                    "missing 'snippets' list".to_string(),
                ))
            }
        };

        let categories = optional_list(object.remove("categories"), category_from_record);
        let banners = optional_list(object.remove("banners"), banner_from_record);

        Ok(Self {
            snippets,
            categories,
            banners,
        })
    }
}

impl From<Document> for ImportedDocument {
    fn from(doc: Document) -> Self {
        Self {
            snippets: doc.snippets,
            categories: Some(doc.categories),
            banners: Some(doc.banners),
        }
    }
}

fn optional_list<T>(value: Option<Value>, decode: fn(&Map<String, Value>) -> T) -> Option<Vec<T>> {
    match value {
        Some(Value::Array(items)) => Some(decode_records(items, decode)),
        // Anything other than a list is treated as absent
        _ => None,
    }
}

fn decode_records<T>(items: Vec<Value>, decode: fn(&Map<String, Value>) -> T) -> Vec<T> {
    let empty = Map::new();
    items
        .iter()
        .map(|item| decode(item.as_object().unwrap_or(&empty)))
        .collect()
}

fn snippet_from_record(record: &Map<String, Value>) -> CodeSnippet {
    CodeSnippet {
        id: text(record, "id"),
        title: text(record, "title"),
        description: text(record, "description"),
        code: text(record, "code"),
        language: text(record, "language"),
        cover_image: text(record, "coverImage"),
        category: text(record, "category"),
        created_at: timestamp(record, "createdAt"),
        updated_at: timestamp(record, "updatedAt"),
    }
}

fn category_from_record(record: &Map<String, Value>) -> Category {
    Category {
        id: text(record, "id"),
        name: text(record, "name"),
        icon: text(record, "icon"),
    }
}

fn banner_from_record(record: &Map<String, Value>) -> Banner {
    Banner {
        id: text(record, "id"),
        image_url: text(record, "imageUrl"),
        link: optional_text(record, "link"),
        is_active: record
            .get("isActive")
            .and_then(Value::as_bool)
            .unwrap_or_default(),
    }
}

fn optional_text(record: &Map<String, Value>, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn text(record: &Map<String, Value>, key: &str) -> String {
    optional_text(record, key).unwrap_or_default()
}

fn timestamp(record: &Map<String, Value>, key: &str) -> DateTime<Utc> {
    let parsed = match record.get(key) {
        Some(Value::String(s)) => parse_timestamp(s),
        Some(Value::Number(n)) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    };
    parsed.unwrap_or_default()
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// File name for an export made on `date`.
pub fn export_file_name(selected: bool, date: DateTime<Utc>) -> String {
    let stamp = date.format("%Y-%m-%d");
    if selected {
        format!("{}-selected-{}.json", FILE_PREFIX, stamp)
    } else {
        format!("{}-{}.json", FILE_PREFIX, stamp)
    }
}
