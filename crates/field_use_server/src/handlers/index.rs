//! GET /admin: landing page listing the menu entries the user may open.

use axum::{extract::State, response::Html, Extension};
use field_use_core::principal::Principal;

use crate::error::AppError;
use crate::render::AdminIndexPage;
use crate::state::AppState;

pub async fn admin_index(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Html<String>, AppError> {
    let page = AdminIndexPage {
        page_title: "Dashboard",
        menu: state.menu.links_for(&principal),
        user: principal.user,
    };
    Ok(Html(state.pages.admin_index(&page)?))
}
