use axum::extract::Path;
use axum::http::{header, HeaderMap};
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::TenantResponse;
use crate::services::{AccountService, TenantResolver};

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
}

/// GET /tenant/validate - pre-authentication tenant existence check by host.
/// The root domain always validates; any other host must be claimed by a
/// tenant.
pub async fn validate(headers: HeaderMap) -> ApiResult<ValidateResponse> {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    TenantResolver::new().resolve_host(host).await?;
    Ok(ApiResponse::success(ValidateResponse { valid: true }))
}

/// GET /tenant/:id - public tenant page data with the owner embedded
pub async fn show(Path(id): Path<String>) -> ApiResult<TenantResponse> {
    // A malformed id is indistinguishable from an unknown one
    let id = Uuid::parse_str(id.trim()).map_err(|_| ApiError::not_found("Tenant not found"))?;

    match AccountService::new().tenant_with_owner(id).await? {
        Some((tenant, Some(owner))) => Ok(ApiResponse::success(TenantResponse::with_owner(
            &tenant, &owner,
        ))),
        Some((tenant, None)) => Ok(ApiResponse::success(TenantResponse::new(&tenant))),
        None => Err(ApiError::not_found("Tenant not found")),
    }
}
