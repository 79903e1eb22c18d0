//! In-memory implementation of the store ports.
//!
//! Evaluates the field-use query with the same `LIKE` semantics the MySQL
//! adapter binds, in insertion order. Used by router tests and local demos.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::FieldUseError;
use crate::ports::{FieldUseStore, PluginProbe, Result};
use crate::sanitize::{contains_pattern, LikePattern, REFERENCE_VALUE_PATTERN};
use crate::types::{ContentItem, FieldName, FieldUse, MetadataEntry, PostId};

pub const PUBLISHED: &str = "publish";

#[derive(Debug, Default)]
pub struct MemoryFieldUseStore {
    posts: Vec<ContentItem>,
    meta: Vec<MetadataEntry>,
    custom_fields_active: bool,
    probe_fails: bool,
    queries: AtomicUsize,
}

impl MemoryFieldUseStore {
    pub fn new() -> Self {
        Self {
            custom_fields_active: true,
            ..Self::default()
        }
    }

    pub fn with_post(mut self, id: PostId, title: &str, status: &str) -> Self {
        self.posts.push(ContentItem {
            id,
            title: title.to_string(),
            status: status.to_string(),
        });
        self
    }

    pub fn with_meta(self, post_id: PostId, key: &str, value: &str) -> Self {
        self.with_meta_value(post_id, key, Some(value))
    }

    pub fn with_meta_value(mut self, post_id: PostId, key: &str, value: Option<&str>) -> Self {
        self.meta.push(MetadataEntry {
            post_id,
            meta_key: key.to_string(),
            meta_value: value.map(str::to_string),
        });
        self
    }

    pub fn with_custom_fields_active(mut self, active: bool) -> Self {
        self.custom_fields_active = active;
        self
    }

    pub fn with_failing_probe(mut self) -> Self {
        self.probe_fails = true;
        self
    }

    /// Number of field-use queries executed so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FieldUseStore for MemoryFieldUseStore {
    async fn find_field_uses(&self, field: &FieldName) -> Result<Vec<FieldUse>> {
        self.queries.fetch_add(1, Ordering::SeqCst);

        let key_pattern = LikePattern::new(&contains_pattern(field.as_str()));
        let reference = LikePattern::new(REFERENCE_VALUE_PATTERN);

        let mut seen = HashSet::new();
        let mut uses = Vec::new();
        for post in self.posts.iter().filter(|p| p.status == PUBLISHED) {
            for entry in self.meta.iter().filter(|m| m.post_id == post.id) {
                let Some(value) = entry.meta_value.as_deref() else {
                    continue;
                };
                if value.is_empty()
                    || !key_pattern.matches(&entry.meta_key)
                    || reference.matches(value)
                {
                    continue;
                }
                let found = FieldUse {
                    post_id: post.id,
                    post_title: post.title.clone(),
                    meta_value: value.to_string(),
                };
                if seen.insert(found.clone()) {
                    uses.push(found);
                }
            }
        }
        Ok(uses)
    }
}

#[async_trait]
impl PluginProbe for MemoryFieldUseStore {
    async fn custom_fields_active(&self) -> Result<bool> {
        if self.probe_fails {
            return Err(FieldUseError::Internal(anyhow::anyhow!(
                "options table unavailable"
            )));
        }
        Ok(self.custom_fields_active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str) -> FieldName {
        FieldName::parse(name).unwrap()
    }

    #[tokio::test]
    async fn only_published_posts_match() {
        let store = MemoryFieldUseStore::new()
            .with_post(1, "Live", "publish")
            .with_post(2, "Draft", "draft")
            .with_post(3, "Rev", "inherit")
            .with_meta(1, "subtitle", "a")
            .with_meta(2, "subtitle", "b")
            .with_meta(3, "subtitle", "c");
        let uses = store.find_field_uses(&field("subtitle")).await.unwrap();
        assert_eq!(uses.len(), 1);
        assert_eq!(uses[0].post_id, 1);
    }

    #[tokio::test]
    async fn key_matches_by_substring() {
        let store = MemoryFieldUseStore::new()
            .with_post(1, "Home", "publish")
            .with_meta(1, "hero_subtitle", "nested")
            .with_meta(1, "subtitle", "plain")
            .with_meta(1, "title", "other");
        let uses = store.find_field_uses(&field("subtitle")).await.unwrap();
        let values: Vec<_> = uses.iter().map(|u| u.meta_value.as_str()).collect();
        assert_eq!(values, vec!["nested", "plain"]);
    }

    #[tokio::test]
    async fn reference_rows_and_empty_values_are_excluded() {
        let store = MemoryFieldUseStore::new()
            .with_post(1, "Home", "publish")
            .with_meta(1, "_subtitle", "field_1234")
            .with_meta(1, "subtitle", "")
            .with_meta_value(1, "subtitle", None)
            .with_meta(1, "subtitle", "kept");
        let uses = store.find_field_uses(&field("subtitle")).await.unwrap();
        assert_eq!(uses.len(), 1);
        assert_eq!(uses[0].meta_value, "kept");
        assert!(uses.iter().all(|u| u.meta_value != "field_1234"));
    }

    #[tokio::test]
    async fn duplicate_matches_are_collapsed() {
        let store = MemoryFieldUseStore::new()
            .with_post(1, "Home", "publish")
            .with_meta(1, "subtitle", "same")
            .with_meta(1, "hero_subtitle", "same")
            .with_meta(1, "subtitle", "different");
        let uses = store.find_field_uses(&field("subtitle")).await.unwrap();
        assert_eq!(uses.len(), 2);
        assert_eq!(store.query_count(), 1);
    }
}
