use axum::{Extension, Json};
use serde::Deserialize;

use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::models::TenantResponse;
use crate::services::AccountService;

#[derive(Debug, Deserialize)]
pub struct CreateTenantRequest {
    pub name: String,
    /// Comma-separated domain list.
    pub domains: String,
}

/// POST /tenant/create - explicit tenant creation for a session without one
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CreateTenantRequest>,
) -> ApiResult<TenantResponse> {
    let service = AccountService::new();
    let tenant = service
        .create_tenant(auth.user_id, &payload.name, &payload.domains)
        .await?;

    let owner = service
        .tenant_with_owner(tenant.id)
        .await?
        .and_then(|(_, owner)| owner);
    let response = match owner {
        Some(owner) => TenantResponse::with_owner(&tenant, &owner),
        None => TenantResponse::new(&tenant),
    };

    Ok(ApiResponse::created(response))
}
