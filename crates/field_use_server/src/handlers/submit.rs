//! POST /admin/admin-post/check_acf_page_use: form submission.
//!
//! Verifies the nonce carried in the form action's query string, then
//! answers 302 back to the referring page with `field=<sanitized>` or
//! `no-field=1`. No database access happens here.

use axum::{
    extract::{Form, Query, State},
    http::{
        header::{LOCATION, REFERER},
        HeaderMap, StatusCode,
    },
    response::IntoResponse,
    Extension,
};
use chrono::Utc;
use field_use_core::principal::Principal;
use field_use_core::redirect::redirect_target;
use field_use_core::{FieldUseError, REPORTER_MENU, SUBMIT_ACTION};
use serde::Deserialize;
use url::form_urlencoded;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SubmitQuery {
    pub nonce: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SubmitForm {
    pub field: Option<String>,
}

pub fn submit_path() -> String {
    format!("/admin/admin-post/{SUBMIT_ACTION}")
}

/// Form action URL for the report page, carrying the page slug and nonce.
pub fn form_action(nonce: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("page", REPORTER_MENU.slug)
        .append_pair("nonce", nonce)
        .finish();
    format!("{}?{query}", submit_path())
}

pub async fn submit_field(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<SubmitQuery>,
    headers: HeaderMap,
    Form(form): Form<SubmitForm>,
) -> Result<impl IntoResponse, AppError> {
    principal.require(REPORTER_MENU.capability)?;

    let nonce = query.nonce.ok_or(FieldUseError::InvalidNonce)?;
    state
        .nonces
        .verify(&nonce, SUBMIT_ACTION, &principal.user, Utc::now())?;

    let referer = headers.get(REFERER).and_then(|v| v.to_str().ok());
    let target = redirect_target(referer, form.field.as_deref(), &REPORTER_MENU.path());
    let location = target.location();
    tracing::debug!(user = %principal.user, %location, "field submission redirect");

    Ok((StatusCode::FOUND, [(LOCATION, location)]))
}
