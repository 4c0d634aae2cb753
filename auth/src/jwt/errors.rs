use thiserror::Error;

/// Error type for access token operations.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token claims are malformed: {0}")]
    MalformedClaims(String),
}
