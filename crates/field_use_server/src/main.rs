//! field-use-server: admin server reporting where a custom field is used
//! across published WordPress posts.
//!
//! Reads config from flags or env vars (see `config::ServerConfig`):
//!   FIELD_USE_DATABASE_URL: WordPress MySQL connection string (required)
//!   FIELD_USE_AUTH_SECRET: HMAC secret for admin tokens and nonces (required)
//!   FIELD_USE_BIND_ADDR: listen address (default: 0.0.0.0:4200)

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use field_use_core::nonce::NonceIssuer;
use field_use_core::ports::SiteLinks;
use field_use_core::FieldUseReporter;
use field_use_mysql::{connect, MySqlStores, TablePrefix};
use field_use_server::config::ServerConfig;
use field_use_server::middleware::auth::AuthConfig;
use field_use_server::router::build_router;
use field_use_server::state::AppState;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,field_use_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::parse();

    let prefix = TablePrefix::new(&config.table_prefix)?;
    let links = SiteLinks::new(&config.site_url)?;

    let pool = connect(&config.database())
        .await
        .context("Database connection failed; check FIELD_USE_DATABASE_URL")?;
    let stores = MySqlStores::new(pool, prefix);

    let reporter = Arc::new(FieldUseReporter::new(
        Arc::new(stores.field_uses),
        Arc::new(links),
        Arc::new(stores.plugins),
    ));

    let secret = config.auth_secret.as_bytes();
    let state = AppState::new(reporter, NonceIssuer::new(secret))?;
    let app = build_router(state, AuthConfig::from_secret(secret));

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;
    tracing::info!("field-use-server listening on {}", config.bind_addr);
    tracing::info!("  GET  /health");
    tracing::info!("  GET  /admin");
    tracing::info!("  GET  {}", field_use_core::REPORTER_MENU.path());
    tracing::info!(
        "  POST {}",
        field_use_server::handlers::submit::submit_path()
    );

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
