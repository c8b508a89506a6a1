use crate::stream::jwt::{encode_hs256, JwtError};
use chrono::{DateTime, Duration, Utc};
use domain::ports::token::{TokenSignerError, TokenSignerPort};
use domain_shared::authentication::{AccessToken, UserId};
use serde::Serialize;
use tracing::{instrument, warn};

/// Signs user tokens the way Stream Chat verifies them: HS256 with the API
/// secret, carrying `user_id`, `iat` and `exp`.
pub struct StreamTokenSigner {
    api_secret: String,
    ttl: Duration,
}

#[derive(Serialize)]
struct UserTokenClaims<'a> {
    user_id: &'a str,
    iat: i64,
    exp: i64,
}

impl StreamTokenSigner {
    #[instrument(level = "trace", skip_all)]
    pub fn new(api_secret: String, ttl: Duration) -> Self {
        Self { api_secret, ttl }
    }
}

impl TokenSignerPort for StreamTokenSigner {
    #[instrument(level = "debug", skip(self))]
    fn sign_token(
        &self,
        user_id: &UserId,
        issued_at: DateTime<Utc>,
    ) -> Result<AccessToken, TokenSignerError> {
        let claims = UserTokenClaims {
            user_id: &user_id.0,
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        encode_hs256(&claims, &self.api_secret)
            .map(AccessToken)
            .map_err(map_jwt_err)
    }
}

#[instrument(level = "trace", skip_all)]
fn map_jwt_err(err: JwtError) -> TokenSignerError {
    match err {
        JwtError::EmptySecret => {
            warn!("Stream API secret is empty, cannot sign user tokens");
            TokenSignerError::MissingSecret
        }
        JwtError::InvalidKey(_) | JwtError::Claims(_) => {
            warn!(error = %err, "Failed to sign user token");
            TokenSignerError::Signing(err.to_string())
        }
    }
}
