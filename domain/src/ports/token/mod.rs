use chrono::{DateTime, Utc};
use domain_shared::authentication::{AccessToken, UserId};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TokenSignerPort {
    /// Signs a token letting `user_id` connect to the chat provider directly.
    /// Expiry is counted from `issued_at`.
    fn sign_token(
        &self,
        user_id: &UserId,
        issued_at: DateTime<Utc>,
    ) -> Result<AccessToken, TokenSignerError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenSignerError {
    #[error("Token signing secret is not configured")]
    MissingSecret,
    #[error("Token signing failed: {0}")]
    Signing(String),
}
