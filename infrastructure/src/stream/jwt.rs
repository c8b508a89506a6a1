use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;
use thiserror::Error;
use tracing::instrument;

type HmacSha256 = Hmac<Sha256>;

const HS256_HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("signing secret is empty")]
    EmptySecret,
    #[error("invalid signing key: {0}")]
    InvalidKey(String),
    #[error("failed to encode claims: {0}")]
    Claims(#[from] serde_json::Error),
}

/// Encodes `claims` as a compact HS256 JWT.
#[instrument(level = "trace", skip_all)]
pub fn encode_hs256<C: Serialize>(claims: &C, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::EmptySecret);
    }

    let header = URL_SAFE_NO_PAD.encode(HS256_HEADER);
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims)?);
    let signing_input = format!("{}.{}", header, payload);

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|err| JwtError::InvalidKey(err.to_string()))?;
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{}.{}", signing_input, signature))
}

/// Checks the signature of an HS256 JWT and returns its decoded claims.
#[cfg(test)]
pub(crate) fn decode_hs256(token: &str, secret: &str) -> Option<serde_json::Value> {
    let (signing_input, signature) = token.rsplit_once('.')?;
    let (_, payload) = signing_input.split_once('.')?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(signing_input.as_bytes());
    mac.verify_slice(&URL_SAFE_NO_PAD.decode(signature).ok()?)
        .ok()?;

    serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload).ok()?).ok()
}
