use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config;

/// Session claim carried in the signed token. The token is the sole carrier
/// of authenticated identity between requests; nothing is stored server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated user id.
    pub sub: Uuid,
    /// Tenant the session is scoped to, when the user has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<Uuid>,
    pub iat: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    pub fn new(user_id: Uuid, tenant_id: Option<Uuid>) -> Self {
        let now = Utc::now();
        let exp = config::config()
            .security
            .jwt_expiry_hours
            .map(|hours| (now + Duration::hours(hours as i64)).timestamp());

        Self {
            sub: user_id,
            tenant_id,
            iat: now.timestamp(),
            exp,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("token could not be parsed")]
    Malformed,
    #[error("token signature mismatch")]
    BadSignature,
    #[error("token expired")]
    Expired,
    #[error("signing secret not configured")]
    MissingSecret,
    #[error("token generation failed: {0}")]
    Encode(String),
}

/// Sign a claim with an explicit secret. Kept separate from [`issue_token`]
/// so tests can run against fixed secrets instead of process configuration.
pub fn encode_claims(claims: &Claims, secret: &str) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key).map_err(|e| AuthError::Encode(e.to_string()))
}

/// Verify and decode a token with an explicit secret. Signature comparison is
/// constant-time inside the HMAC verification; expiry is enforced only when
/// the claim carries one.
pub fn decode_claims(token: &str, secret: &str) -> Result<Claims, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();
    validation.validate_exp = true;

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    match decode::<Claims>(token, &decoding_key, &validation) {
        Ok(data) => Ok(data.claims),
        Err(e) => Err(match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            ErrorKind::InvalidSignature => AuthError::BadSignature,
            _ => AuthError::Malformed,
        }),
    }
}

/// Issue a session token with the process-wide signing secret.
pub fn issue_token(claims: &Claims) -> Result<String, AuthError> {
    encode_claims(claims, &config::config().security.jwt_secret)
}

/// Verify a bearer token against the process-wide signing secret.
pub fn verify_token(token: &str) -> Result<Claims, AuthError> {
    decode_claims(token, &config::config().security.jwt_secret)
}
