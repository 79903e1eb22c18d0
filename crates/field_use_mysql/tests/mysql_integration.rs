//! Integration tests for the MySQL adapters.
//!
//! Each test creates its own throwaway `futest<n>_*` tables in the target
//! database so the tests can run in parallel.
//! Run with: FIELD_USE_DATABASE_URL="mysql://root@localhost/wordpress_test" cargo test -p field_use_mysql --test mysql_integration -- --ignored --nocapture

use field_use_core::ports::{FieldUseStore, PluginProbe};
use field_use_core::FieldName;
use field_use_mysql::{connect, DatabaseConfig, MySqlStores, TablePrefix};

async fn seeded_stores(prefix: &str) -> MySqlStores {
    let url = std::env::var("FIELD_USE_DATABASE_URL")
        .expect("FIELD_USE_DATABASE_URL must be set for integration tests");
    let pool = connect(&DatabaseConfig::new(url, 2))
        .await
        .expect("failed to connect to test database");

    for stmt in [
        "DROP TABLE IF EXISTS {p}posts, {p}postmeta, {p}options",
        "CREATE TABLE {p}posts (ID BIGINT UNSIGNED PRIMARY KEY, post_title TEXT NOT NULL, post_status VARCHAR(20) NOT NULL)",
        "CREATE TABLE {p}postmeta (meta_id BIGINT UNSIGNED AUTO_INCREMENT PRIMARY KEY, post_id BIGINT UNSIGNED NOT NULL, meta_key VARCHAR(255), meta_value LONGTEXT)",
        "CREATE TABLE {p}options (option_name VARCHAR(191) PRIMARY KEY, option_value LONGTEXT NOT NULL)",
        "INSERT INTO {p}posts VALUES (1, 'About', 'publish'), (2, 'Draft', 'draft'), (3, 'Contact', 'publish')",
        "INSERT INTO {p}postmeta (post_id, meta_key, meta_value) VALUES \
            (1, 'subtitle', 'Who we are'), \
            (1, '_subtitle', 'field_5f3a2b1c9d8e7'), \
            (1, 'hero_subtitle', 'Who we are'), \
            (2, 'subtitle', 'unpublished'), \
            (3, 'subtitle', ''), \
            (3, 'subtitle', NULL), \
            (3, 'subtitle', 'Say hi')",
        "INSERT INTO {p}options VALUES ('active_plugins', 'a:1:{i:0;s:30:\"advanced-custom-fields/acf.php\";}')",
    ] {
        let stmt = stmt.replace("{p}", prefix);
        sqlx::query(&stmt).execute(&pool).await.expect(&stmt);
    }
    MySqlStores::new(pool, TablePrefix::new(prefix).unwrap())
}

#[tokio::test]
#[ignore] // requires FIELD_USE_DATABASE_URL
async fn finds_distinct_published_uses() {
    let stores = seeded_stores("futest1_").await;

    let uses = stores
        .field_uses
        .find_field_uses(&FieldName::parse("subtitle").unwrap())
        .await
        .unwrap();

    let mut pairs: Vec<(u64, String)> = uses
        .iter()
        .map(|u| (u.post_id, u.meta_value.clone()))
        .collect();
    pairs.sort();
    assert_eq!(
        pairs,
        vec![(1, "Who we are".to_string()), (3, "Say hi".to_string())]
    );
}

#[tokio::test]
#[ignore] // requires FIELD_USE_DATABASE_URL
async fn unknown_field_has_no_uses() {
    let stores = seeded_stores("futest2_").await;
    let uses = stores
        .field_uses
        .find_field_uses(&FieldName::parse("no_such_field").unwrap())
        .await
        .unwrap();
    assert!(uses.is_empty());
}

#[tokio::test]
#[ignore] // requires FIELD_USE_DATABASE_URL
async fn probe_reads_active_plugins_option() {
    let stores = seeded_stores("futest3_").await;
    assert!(stores.plugins.custom_fields_active().await.unwrap());
}
