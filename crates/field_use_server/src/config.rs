//! Server configuration, read from flags or `FIELD_USE_*` environment
//! variables (a `.env` file is loaded first by `main`).

use clap::Parser;
use field_use_mysql::DatabaseConfig;

#[derive(Clone, Parser)]
#[command(name = "field-use-server")]
#[command(version)]
#[command(about = "Report where a custom field is used across published WordPress posts")]
pub struct ServerConfig {
    /// MySQL connection string for the WordPress database
    #[arg(long, env = "FIELD_USE_DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Listen address
    #[arg(long, env = "FIELD_USE_BIND_ADDR", default_value = "0.0.0.0:4200")]
    pub bind_addr: String,

    /// Public site URL used to build permalinks and edit links
    #[arg(long, env = "FIELD_USE_SITE_URL", default_value = "http://localhost")]
    pub site_url: String,

    /// WordPress table prefix
    #[arg(long, env = "FIELD_USE_TABLE_PREFIX", default_value = "wp_")]
    pub table_prefix: String,

    /// HMAC secret for admin tokens and form nonces
    #[arg(long, env = "FIELD_USE_AUTH_SECRET", hide_env_values = true)]
    pub auth_secret: String,

    /// Database pool size
    #[arg(long, env = "FIELD_USE_DB_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,
}

impl ServerConfig {
    pub fn database(&self) -> DatabaseConfig {
        DatabaseConfig::new(self.database_url.clone(), self.max_connections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_only_required_args_given() {
        let config = ServerConfig::try_parse_from([
            "field-use-server",
            "--database-url",
            "mysql://wp@localhost/wordpress",
            "--auth-secret",
            "s3cret",
        ])
        .unwrap();
        assert_eq!(config.table_prefix, "wp_");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.database().max_connections, 5);
        assert_eq!(config.database().database_url, "mysql://wp@localhost/wordpress");
    }

    #[test]
    fn flags_override_defaults() {
        let config = ServerConfig::try_parse_from([
            "field-use-server",
            "--database-url",
            "mysql://wp@localhost/wordpress",
            "--auth-secret",
            "s3cret",
            "--table-prefix",
            "site2_",
            "--site-url",
            "https://example.com",
            "--max-connections",
            "12",
        ])
        .unwrap();
        assert_eq!(config.table_prefix, "site2_");
        assert_eq!(config.site_url, "https://example.com");
        assert_eq!(config.max_connections, 12);
    }
}
