use async_trait::async_trait;
use domain_shared::authentication::{AccessToken, UserId};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait TokenPort {
    async fn issue_token(&self, user_id: UserId) -> Result<AccessToken, TokenError>;
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token issuance failed: {0}")]
    IssuanceFailed(String),
}
