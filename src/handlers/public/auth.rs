use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{TenantResponse, UserResponse};
use crate::services::{AccountService, AuthSession};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub tenant_name: String,
    /// Requested subdomain token under the root domain.
    pub domains: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub tenant_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub message: &'static str,
    pub token: String,
    pub user: UserResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<TenantResponse>,
    /// One-time redirect target carrying the token as a URL parameter; the
    /// client consumes it and strips the token from the URL.
    pub redirect_url: Option<String>,
}

impl SessionResponse {
    fn new(message: &'static str, session: AuthSession) -> Self {
        Self {
            message,
            user: UserResponse::from(&session.user),
            tenant: session.tenant.as_ref().map(TenantResponse::new),
            redirect_url: session.redirect_url,
            token: session.token,
        }
    }
}

/// POST /register - create a user plus their tenant and log them in
pub async fn register(Json(payload): Json<RegisterRequest>) -> ApiResult<SessionResponse> {
    let session = AccountService::new()
        .register(
            &payload.email,
            &payload.password,
            &payload.tenant_name,
            &payload.domains,
        )
        .await?;

    Ok(ApiResponse::created(SessionResponse::new(
        "User created",
        session,
    )))
}

/// POST /login - verify credentials and mint a tenant-scoped session
pub async fn login(Json(payload): Json<LoginRequest>) -> ApiResult<SessionResponse> {
    let session = AccountService::new()
        .login(&payload.email, &payload.password, payload.tenant_id)
        .await?;

    Ok(ApiResponse::success(SessionResponse::new(
        "User logged in",
        session,
    )))
}
