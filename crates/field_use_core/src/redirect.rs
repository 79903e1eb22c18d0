//! Submission redirector: turns a posted form into a GET back to the page
//! that submitted it, carrying the field name in the query string.

use url::{form_urlencoded, Url};

use crate::types::FieldName;

pub const FIELD_PARAM: &str = "field";
pub const NO_FIELD_PARAM: &str = "no-field";

/// A site-relative redirect location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    pub path: String,
    pub pairs: Vec<(String, String)>,
}

impl RedirectTarget {
    /// `path?query`, always with a `?` since a flag or field is always set.
    pub fn location(&self) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.pairs)
            .finish();
        format!("{}?{}", self.path, query)
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Build the redirect target for a submission.
///
/// Only the referer's path and query are kept, so the result always stays on
/// this site. Prior `field` / `no-field` parameters are dropped and all other
/// parameters keep their order. A missing or unparseable referer falls back
/// to `fallback_path` with no inherited parameters.
pub fn redirect_target(
    referer: Option<&str>,
    submitted: Option<&str>,
    fallback_path: &str,
) -> RedirectTarget {
    let (path, mut pairs) = match referer.and_then(parse_referer) {
        Some(url) => {
            let pairs = url
                .query_pairs()
                .filter(|(k, _)| k != FIELD_PARAM && k != NO_FIELD_PARAM)
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            (site_relative_path(url.path()), pairs)
        }
        None => {
            tracing::debug!(?referer, "unusable referer, redirecting to report page");
            (fallback_path.to_string(), Vec::new())
        }
    };

    match submitted.and_then(FieldName::parse) {
        Some(field) => pairs.push((FIELD_PARAM.to_string(), field.as_str().to_string())),
        None => pairs.push((NO_FIELD_PARAM.to_string(), "1".to_string())),
    }

    RedirectTarget { path, pairs }
}

fn parse_referer(referer: &str) -> Option<Url> {
    let referer = referer.trim();
    if referer.is_empty() {
        return None;
    }
    match Url::parse(referer) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse("http://localhost/").ok()?;
            base.join(referer).ok()
        }
        Err(_) => None,
    }
}

// `//host/path` would be read as a protocol-relative URL by the browser.
fn site_relative_path(path: &str) -> String {
    format!("/{}", path.trim_start_matches('/'))
}
