//! JWT authentication for admin routes.
//!
//! Accepts an HS256 token from `Authorization: Bearer …` or from the
//! `field_use_token` cookie (so plain browser form posts authenticate too)
//! and inserts the resulting `Principal` as a request extension.

use anyhow::anyhow;
use axum::{
    extract::Request,
    http::{
        header::{AUTHORIZATION, COOKIE},
        HeaderMap,
    },
    middleware::Next,
    response::Response,
};
use field_use_core::principal::{AuthClaims, Principal};
use field_use_core::FieldUseError;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::error::AppError;

pub const TOKEN_COOKIE: &str = "field_use_token";

#[derive(Clone)]
pub struct AuthConfig {
    key: DecodingKey,
    validation: Validation,
}

impl AuthConfig {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn authenticate(&self, token: &str) -> Result<Principal, FieldUseError> {
        let data = decode::<AuthClaims>(token, &self.key, &self.validation)
            .map_err(|e| FieldUseError::Unauthorized(format!("invalid token: {e}")))?;
        Principal::from_claims(&data.claims)
    }
}

pub async fn jwt_auth(mut req: Request, next: Next) -> Result<Response, AppError> {
    let config = req
        .extensions()
        .get::<AuthConfig>()
        .cloned()
        .ok_or_else(|| FieldUseError::Internal(anyhow!("AuthConfig extension not installed")))?;

    let token = bearer_token(req.headers())
        .or_else(|| cookie_token(req.headers()))
        .ok_or_else(|| FieldUseError::Unauthorized("missing credentials".into()))?;

    let principal = config.authenticate(&token)?;
    tracing::debug!(user = %principal.user, "authenticated");
    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == TOKEN_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn reads_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&headers).as_deref(), Some("abc.def.ghi"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwdw=="));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn reads_token_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; field_use_token=abc.def.ghi; lang=en"),
        );
        assert_eq!(cookie_token(&headers).as_deref(), Some("abc.def.ghi"));

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("field_use_token="));
        assert_eq!(cookie_token(&headers), None);
    }

    #[test]
    fn rejects_tokens_signed_with_another_secret() {
        let claims = serde_json::json!({ "sub": "admin", "caps": ["manage_options"], "exp": 4_102_444_800u64 });
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(b"other"),
        )
        .unwrap();

        let err = AuthConfig::from_secret(b"s3cret").authenticate(&token).unwrap_err();
        assert_eq!(err.http_status(), 401);

        let ok = AuthConfig::from_secret(b"other").authenticate(&token).unwrap();
        assert_eq!(ok.user, "admin");
    }
}
