use serde::Deserialize;

use crate::error::FieldUseError;

/// Capability required to see and use the field-use report.
pub const MANAGE_OPTIONS: &str = "manage_options";

/// The authenticated admin user making a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user: String,
    pub capabilities: Vec<String>,
}

impl Principal {
    /// Construct from validated token claims at the server boundary.
    pub fn from_claims(claims: &AuthClaims) -> Result<Self, FieldUseError> {
        let user = claims
            .sub
            .clone()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| FieldUseError::Unauthorized("missing sub claim".into()))?;
        Ok(Self {
            user,
            capabilities: claims.caps.clone().unwrap_or_default(),
        })
    }

    pub fn new(user: impl Into<String>, capabilities: Vec<String>) -> Self {
        Self {
            user: user.into(),
            capabilities,
        }
    }

    pub fn can(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }

    pub fn require(&self, capability: &str) -> Result<(), FieldUseError> {
        if self.can(capability) {
            Ok(())
        } else {
            Err(FieldUseError::Forbidden(format!(
                "{} lacks the {capability} capability",
                self.user
            )))
        }
    }
}

/// Token claims expected from the identity provider.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthClaims {
    pub sub: Option<String>,
    pub caps: Option<Vec<String>>,
    pub exp: usize,
}
