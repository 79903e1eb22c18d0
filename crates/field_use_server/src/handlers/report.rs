//! GET /admin/check-acf-field-use: the field-use report page.
//!
//! `?field=<name>` runs the lookup; `?no-field=1` shows the validation
//! notice. A `field` that sanitizes to nothing also shows the notice and
//! never reaches the store.

use axum::{
    extract::{Query, State},
    response::Html,
    Extension,
};
use chrono::Utc;
use field_use_core::principal::Principal;
use field_use_core::{FieldName, REPORTER_MENU, SUBMIT_ACTION};
use serde::Deserialize;

use crate::error::AppError;
use crate::handlers::submit::form_action;
use crate::render::FieldUsePage;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub field: Option<String>,
    #[serde(rename = "no-field")]
    pub no_field: Option<String>,
}

pub async fn field_use_page(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<ReportQuery>,
) -> Result<Html<String>, AppError> {
    principal.require(REPORTER_MENU.capability)?;

    let field = query.field.as_deref().and_then(FieldName::parse);
    let report = match &field {
        Some(field) => Some(state.reporter.report(field).await?),
        None => None,
    };
    let no_field = query.no_field.as_deref() == Some("1")
        || (query.field.is_some() && field.is_none());

    let nonce = state
        .nonces
        .create(SUBMIT_ACTION, &principal.user, Utc::now());

    let page = FieldUsePage {
        page_title: REPORTER_MENU.page_title,
        menu: state.menu.links_for(&principal),
        custom_fields_active: state.reporter.custom_fields_active().await,
        form_action: form_action(&nonce),
        submit_action: SUBMIT_ACTION,
        field_value: field.map(|f| f.to_string()).unwrap_or_default(),
        no_field,
        report: report.as_ref(),
    };
    Ok(Html(state.pages.field_use_page(&page)?))
}
