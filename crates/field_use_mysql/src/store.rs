use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::MySqlPool;

use field_use_core::ports::{FieldUseStore, PluginProbe, Result};
use field_use_core::sanitize::{contains_pattern, REFERENCE_VALUE_PATTERN};
use field_use_core::types::{FieldName, FieldUse};

use crate::pool::TablePrefix;

/// Option holding the serialized list of active plugin files.
const ACTIVE_PLUGINS_OPTION: &str = "active_plugins";
/// Directory prefix shared by the free and pro custom-fields plugins.
const CUSTOM_FIELDS_PLUGIN_DIR: &str = "advanced-custom-fields";

/// All MySQL adapters, sharing one pool.
pub struct MySqlStores {
    pub field_uses: MySqlFieldUseStore,
    pub plugins: MySqlPluginProbe,
}

impl MySqlStores {
    pub fn new(pool: MySqlPool, prefix: TablePrefix) -> Self {
        Self {
            field_uses: MySqlFieldUseStore::new(pool.clone(), prefix.clone()),
            plugins: MySqlPluginProbe::new(pool, prefix),
        }
    }
}

// ── MySqlFieldUseStore ────────────────────────────────────────

#[derive(sqlx::FromRow)]
struct FieldUseRow {
    #[sqlx(rename = "ID")]
    id: u64,
    post_title: String,
    meta_value: Option<String>,
}

pub struct MySqlFieldUseStore {
    pool: MySqlPool,
    sql: String,
}

impl MySqlFieldUseStore {
    pub fn new(pool: MySqlPool, prefix: TablePrefix) -> Self {
        Self {
            pool,
            sql: field_use_sql(&prefix),
        }
    }
}

/// No ORDER BY: rows come back in the server's natural order.
fn field_use_sql(prefix: &TablePrefix) -> String {
    format!(
        r#"
        SELECT DISTINCT p.ID, p.post_title, m.meta_value
        FROM `{posts}` p
        LEFT JOIN `{postmeta}` m ON m.post_id = p.ID
        WHERE p.post_status = 'publish'
          AND m.meta_key LIKE ?
          AND m.meta_value NOT LIKE ?
          AND m.meta_value IS NOT NULL
          AND m.meta_value <> ''
        "#,
        posts = prefix.table("posts"),
        postmeta = prefix.table("postmeta"),
    )
}

#[async_trait]
impl FieldUseStore for MySqlFieldUseStore {
    async fn find_field_uses(&self, field: &FieldName) -> Result<Vec<FieldUse>> {
        let rows = sqlx::query_as::<_, FieldUseRow>(&self.sql)
            .bind(contains_pattern(field.as_str()))
            .bind(REFERENCE_VALUE_PATTERN)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| anyhow!(e))?;

        Ok(rows
            .into_iter()
            .filter_map(|r| {
                r.meta_value.map(|meta_value| FieldUse {
                    post_id: r.id,
                    post_title: r.post_title,
                    meta_value,
                })
            })
            .collect())
    }
}

// ── MySqlPluginProbe ──────────────────────────────────────────

pub struct MySqlPluginProbe {
    pool: MySqlPool,
    sql: String,
}

impl MySqlPluginProbe {
    pub fn new(pool: MySqlPool, prefix: TablePrefix) -> Self {
        let sql = format!(
            "SELECT option_value FROM `{}` WHERE option_name = ? LIMIT 1",
            prefix.table("options")
        );
        Self { pool, sql }
    }
}

#[async_trait]
impl PluginProbe for MySqlPluginProbe {
    async fn custom_fields_active(&self) -> Result<bool> {
        let row = sqlx::query_as::<_, (String,)>(&self.sql)
            .bind(ACTIVE_PLUGINS_OPTION)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| anyhow!(e))?;
        Ok(row.is_some_and(|(plugins,)| lists_custom_fields_plugin(&plugins)))
    }
}

/// `active_plugins` is a PHP-serialized array of plugin files such as
/// `advanced-custom-fields-pro/acf.php`; a substring check is enough.
fn lists_custom_fields_plugin(serialized: &str) -> bool {
    serialized.contains(&format!("\"{CUSTOM_FIELDS_PLUGIN_DIR}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_use_sql_uses_prefixed_tables_and_placeholders() {
        let sql = field_use_sql(&TablePrefix::new("site2_").unwrap());
        assert!(sql.contains("FROM `site2_posts` p"));
        assert!(sql.contains("LEFT JOIN `site2_postmeta` m"));
        assert_eq!(sql.matches('?').count(), 2);
        assert!(!sql.to_uppercase().contains("ORDER BY"));
    }

    #[test]
    fn detects_free_and_pro_plugin_files() {
        let free = r#"a:2:{i:0;s:34:"advanced-custom-fields/acf.php";i:1;s:19:"akismet/akismet.php";}"#;
        let pro = r#"a:1:{i:0;s:34:"advanced-custom-fields-pro/acf.php";}"#;
        let none = r#"a:1:{i:0;s:19:"akismet/akismet.php";}"#;
        assert!(lists_custom_fields_plugin(free));
        assert!(lists_custom_fields_plugin(pro));
        assert!(!lists_custom_fields_plugin(none));
        assert!(!lists_custom_fields_plugin("a:0:{}"));
    }
}
