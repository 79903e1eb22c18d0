use thiserror::Error;

#[derive(Debug, Error)]
pub enum FieldUseError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("the link you followed has expired")]
    InvalidNonce,

    #[error("internal: {0}")]
    Internal(#[from] anyhow::Error),
}

impl FieldUseError {
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::InvalidNonce => 403,
            Self::Internal(_) => 500,
        }
    }
}
