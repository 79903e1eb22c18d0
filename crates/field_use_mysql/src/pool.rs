//! Connection pool and table naming for the WordPress database.

use std::time::Duration;

use field_use_core::FieldUseError;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tracing::{info, warn};

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub connection_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

impl DatabaseConfig {
    pub fn new(database_url: impl Into<String>, max_connections: u32) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections,
            connection_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            max_lifetime: Some(Duration::from_secs(1800)),
        }
    }
}

/// Open a MySQL pool for the given configuration.
pub async fn connect(config: &DatabaseConfig) -> Result<MySqlPool, sqlx::Error> {
    info!(
        "Connecting to database: {}",
        mask_database_url(&config.database_url)
    );

    let mut pool_options = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.connection_timeout);

    if let Some(idle_timeout) = config.idle_timeout {
        pool_options = pool_options.idle_timeout(idle_timeout);
    }

    if let Some(max_lifetime) = config.max_lifetime {
        pool_options = pool_options.max_lifetime(max_lifetime);
    }

    let pool = pool_options
        .connect(&config.database_url)
        .await
        .map_err(|e| {
            warn!("Failed to connect to database: {}", e);
            e
        })?;

    info!("Database connection pool created successfully");
    Ok(pool)
}

/// Mask sensitive information in database URL for logging
pub fn mask_database_url(url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(url) {
        let mut masked = parsed.clone();
        if parsed.password().is_some() {
            let _ = masked.set_password(Some("***"));
        }
        masked.to_string()
    } else if url.len() > 20 {
        let head: String = url.chars().take(10).collect();
        let tail: String = url.chars().rev().take(10).collect::<Vec<_>>().into_iter().rev().collect();
        format!("{head}***{tail}")
    } else {
        "***".to_string()
    }
}

/// WordPress table prefix (`$table_prefix`, usually `wp_`).
///
/// Table names cannot be bound as query parameters, so the prefix is the
/// one piece of SQL text built from configuration. It is restricted to
/// `[A-Za-z0-9_]` to keep that safe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePrefix(String);

impl TablePrefix {
    pub fn new(prefix: &str) -> Result<Self, FieldUseError> {
        let valid = !prefix.is_empty()
            && prefix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if valid {
            Ok(Self(prefix.to_string()))
        } else {
            Err(FieldUseError::InvalidInput(format!(
                "table prefix {prefix:?} may only contain letters, digits and underscores"
            )))
        }
    }

    pub fn table(&self, name: &str) -> String {
        format!("{}{}", self.0, name)
    }
}

impl Default for TablePrefix {
    fn default() -> Self {
        Self("wp_".to_string())
    }
}
