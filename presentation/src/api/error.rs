use application_ports::group_channel::GroupChannelError;
use application_ports::token::TokenError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{instrument, warn};

const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized - no verified user identity")]
    Unauthenticated,
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    GroupChannel(#[from] GroupChannelError),
    #[error(transparent)]
    Token(#[from] TokenError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                json!({ "message": self.to_string() }),
            ),
            ApiError::BadRequest(message)
            | ApiError::GroupChannel(GroupChannelError::Validation(message)) => {
                (StatusCode::BAD_REQUEST, json!({ "message": message }))
            }
            ApiError::GroupChannel(GroupChannelError::ChannelNotFound { .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "message": INTERNAL_SERVER_ERROR,
                    "error": self.to_string(),
                    "kind": "channel_not_found",
                }),
            ),
            ApiError::GroupChannel(GroupChannelError::Provider { .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "message": INTERNAL_SERVER_ERROR,
                    "error": self.to_string(),
                    "kind": "provider_failure",
                }),
            ),
            ApiError::Token(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "message": INTERNAL_SERVER_ERROR }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

#[instrument(level = "trace", skip_all)]
pub fn map_json_rejection(rejection: JsonRejection) -> ApiError {
    warn!(error = %rejection, "Malformed request body");
    ApiError::BadRequest(rejection.body_text())
}
