use crate::api::error::ApiError;
use crate::api::identity::AuthenticatedUser;
use crate::application_ports::Locator;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::instrument;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[instrument(level = "debug", skip(service_locator))]
pub async fn token_handler<L: Locator>(
    State(service_locator): State<L>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = service_locator
        .get_token_port()
        .issue_token(user_id)
        .await?;

    Ok(Json(TokenResponse { token: token.0 }))
}
