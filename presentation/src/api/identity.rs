use crate::api::error::ApiError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use domain_shared::authentication::UserId;
use tracing::{instrument, warn};

/// Header in which the upstream authentication layer passes the verified user.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The caller's identity, as verified before the request reached this service.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub UserId);

impl<S: Send + Sync> FromRequestParts<S> for AuthenticatedUser {
    type Rejection = ApiError;

    #[instrument(level = "trace", skip_all)]
    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                warn!(path = %parts.uri.path(), "Request without a verified user identity");
                ApiError::Unauthenticated
            })?;

        Ok(AuthenticatedUser(UserId(user_id.to_string())))
    }
}
