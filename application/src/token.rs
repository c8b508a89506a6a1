use application_ports::token::{TokenError, TokenPort};
use async_trait::async_trait;
use chrono::Utc;
use domain::ports::token::{TokenSignerError, TokenSignerPort};
use domain_shared::authentication::{AccessToken, UserId};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

pub struct TokenService {
    token_signer: Arc<dyn TokenSignerPort + Send + Sync>,
}

impl TokenService {
    #[instrument(level = "trace", skip_all)]
    pub fn new(token_signer: Arc<dyn TokenSignerPort + Send + Sync>) -> Self {
        Self { token_signer }
    }
}

#[async_trait]
impl TokenPort for TokenService {
    #[instrument(level = "info", skip(self))]
    async fn issue_token(&self, user_id: UserId) -> Result<AccessToken, TokenError> {
        if user_id.0.trim().is_empty() {
            warn!("Refusing to issue a chat token for an empty user identity");
            return Err(TokenError::IssuanceFailed(
                "user identity is empty".to_string(),
            ));
        }

        let token = self
            .token_signer
            .sign_token(&user_id, Utc::now())
            .map_err(map_token_signer_err)?;

        info!(user_id = %user_id, "Chat token issued");

        Ok(token)
    }
}

#[instrument(level = "trace", skip_all)]
fn map_token_signer_err(err: TokenSignerError) -> TokenError {
    error!(error = %err, "Chat token signing failed");
    TokenError::IssuanceFailed(err.to_string())
}
