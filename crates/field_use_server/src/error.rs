use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};
use field_use_core::FieldUseError;

/// Handler error: maps `FieldUseError` onto an HTTP status and a small
/// escaped HTML notice. Server errors are logged, never echoed.
#[derive(Debug)]
pub struct AppError(pub FieldUseError);

impl From<FieldUseError> for AppError {
    fn from(err: FieldUseError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if status.is_server_error() {
            tracing::error!("request failed: {:#}", self.0);
            "Something went wrong while reading the database.".to_string()
        } else {
            tracing::debug!("request rejected: {}", self.0);
            self.0.to_string()
        };

        let body = format!(
            "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\"><title>Error</title></head>\
             <body class=\"wp-admin\"><div class=\"notice notice-error\"><p>{}</p></div></body></html>\n",
            handlebars::html_escape(&message)
        );

        let mut response = (status, Html(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
