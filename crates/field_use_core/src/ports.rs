//! Port traits the reporter depends on.
//!
//! Implementations live in adapter crates (`field_use_mysql`) or in
//! [`crate::memory`] for tests.

use async_trait::async_trait;
use url::Url;

use crate::error::FieldUseError;
use crate::types::{FieldName, FieldUse, PostId};

pub type Result<T> = std::result::Result<T, FieldUseError>;

/// Read access to published posts and their metadata.
#[async_trait]
pub trait FieldUseStore: Send + Sync {
    /// Distinct (post id, post title, value) matches for `field`, in the
    /// store's natural order. Only published posts are considered; the
    /// metadata key must contain `field`; the value must be non-empty and
    /// must not match [`crate::sanitize::REFERENCE_VALUE_PATTERN`].
    async fn find_field_uses(&self, field: &FieldName) -> Result<Vec<FieldUse>>;
}

/// Detects whether the custom-fields framework is active on the site.
#[async_trait]
pub trait PluginProbe: Send + Sync {
    async fn custom_fields_active(&self) -> Result<bool>;
}

/// Resolves the public and edit URLs of a post.
pub trait LinkResolver: Send + Sync {
    fn permalink(&self, post_id: PostId) -> String;
    fn edit_link(&self, post_id: PostId) -> String;
}

/// Link resolver for a site using plain (`?p=ID`) permalinks.
#[derive(Debug, Clone)]
pub struct SiteLinks {
    home: String,
}

impl SiteLinks {
    pub fn new(site_url: &str) -> Result<Self> {
        let parsed = Url::parse(site_url)
            .map_err(|e| FieldUseError::InvalidInput(format!("site url {site_url:?}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FieldUseError::InvalidInput(format!(
                "site url must be http or https, got {}",
                parsed.scheme()
            )));
        }
        let home = parsed.as_str().trim_end_matches('/').to_string();
        Ok(Self { home })
    }
}

impl LinkResolver for SiteLinks {
    fn permalink(&self, post_id: PostId) -> String {
        format!("{}/?p={post_id}", self.home)
    }

    fn edit_link(&self, post_id: PostId) -> String {
        format!("{}/wp-admin/post.php?post={post_id}&action=edit", self.home)
    }
}
