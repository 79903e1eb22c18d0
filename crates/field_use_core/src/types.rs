//! Core domain types for the field-use reporter.
//! Pure value types with no sqlx or DB dependencies.

use serde::{Deserialize, Serialize};

use crate::sanitize::sanitize_key;

/// WordPress post identifier (`{prefix}posts.ID`, BIGINT UNSIGNED).
pub type PostId = u64;

/// A field name that has been key-sanitized and is known to be non-empty.
///
/// Holding a `FieldName` is the precondition for running a lookup: empty
/// input never becomes one, so an empty name can never reach the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FieldName(String);

impl FieldName {
    /// Sanitize `raw`; `None` when nothing survives sanitizing.
    pub fn parse(raw: &str) -> Option<Self> {
        let key = sanitize_key(raw);
        if key.is_empty() {
            None
        } else {
            Some(Self(key))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for FieldName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One distinct (post, value) match returned by a field-use lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldUse {
    pub post_id: PostId,
    pub post_title: String,
    pub meta_value: String,
}

/// A content item as the host stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: PostId,
    pub title: String,
    /// `publish`, `draft`, `inherit`, ...
    pub status: String,
}

/// A metadata entry attached to a content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub post_id: PostId,
    pub meta_key: String,
    pub meta_value: Option<String>,
}

/// A rendered-ready report row: the match plus resolved links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub post_id: PostId,
    pub title: String,
    pub edit_link: String,
    pub permalink: String,
    pub value: String,
}

/// Result of a field-use report for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldUseReport {
    pub field: FieldName,
    pub count: usize,
    pub rows: Vec<ReportRow>,
}

/// A top-level admin menu entry and the capability that gates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub slug: &'static str,
    pub page_title: &'static str,
    pub menu_title: &'static str,
    pub capability: &'static str,
    pub icon: &'static str,
    pub position: u32,
}

impl MenuEntry {
    /// Path the entry's page is served from.
    pub fn path(&self) -> String {
        format!("/admin/{}", self.slug)
    }
}
