//! Router construction for the field-use admin server.

use axum::{
    middleware as axum_mw,
    routing::{get, post},
    Extension, Router,
};
use field_use_core::REPORTER_MENU;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::auth::{jwt_auth, AuthConfig};
use crate::state::AppState;

/// Build the full axum router with all routes and middleware.
pub fn build_router(state: AppState, auth: AuthConfig) -> Router {
    // Routes that require a signed-in admin
    let protected = Router::new()
        .route("/admin", get(handlers::index::admin_index))
        .route(
            &REPORTER_MENU.path(),
            get(handlers::report::field_use_page),
        )
        .route(
            &handlers::submit::submit_path(),
            post(handlers::submit::submit_field),
        )
        .layer(axum_mw::from_fn(jwt_auth))
        .layer(Extension(auth));

    // Public routes (no auth)
    let public = Router::new().route("/health", get(handlers::health::health));

    public
        .merge(protected)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
