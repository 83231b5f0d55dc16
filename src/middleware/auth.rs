use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::{self, Claims};
use crate::error::ApiError;

/// Authenticated principal extracted from the session token. Lives in the
/// request's extensions for the lifetime of that single request.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub tenant_id: Option<Uuid>,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            tenant_id: claims.tenant_id,
        }
    }
}

/// Session-token middleware that authenticates the request and injects the
/// principal. The rejection message is deliberately uniform; which
/// verification step failed is only logged.
pub async fn jwt_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).map_err(|reason| {
        tracing::warn!(reason, "rejected unauthenticated request");
        ApiError::unauthorized("Unauthorized")
    })?;

    let claims = auth::verify_token(&token).map_err(|e| {
        tracing::warn!(error = %e, "rejected invalid session token");
        ApiError::unauthorized("Unauthorized")
    })?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

/// Extract the bearer credential from the Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, &'static str> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))
        .ok_or("missing Authorization header")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "malformed Authorization header")?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.to_string()),
        Some(_) => Err("empty bearer token"),
        None => Err("Authorization header is not a bearer credential"),
    }
}
