use axum::extract::Path;
use axum::http::HeaderMap;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::models::{Tenant, Todo};
use crate::services::{TenantResolver, TodoService};

#[derive(Debug, Deserialize)]
pub struct TodoPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Resolve the target tenant for a todo call: session claim first, then the
/// `Tenant` header hint. An unparseable hint behaves like an absent one.
async fn resolve_tenant(auth: &AuthUser, headers: &HeaderMap) -> Result<Tenant, ApiError> {
    let hint = headers
        .get("tenant")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s.trim()).ok());

    Ok(TenantResolver::new().resolve(auth, hint).await?)
}

/// A malformed todo id is indistinguishable from an unknown one.
fn parse_todo_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ApiError::not_found("Todo not found"))
}

/// GET /todos - the caller's todos within the resolved tenant
pub async fn list(
    Extension(auth): Extension<AuthUser>,
    headers: HeaderMap,
) -> ApiResult<Vec<Todo>> {
    let tenant = resolve_tenant(&auth, &headers).await?;
    let todos = TodoService::new().list(&tenant, auth.user_id).await?;
    Ok(ApiResponse::success(todos))
}

/// POST /todos
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    headers: HeaderMap,
    Json(payload): Json<TodoPayload>,
) -> ApiResult<Todo> {
    let tenant = resolve_tenant(&auth, &headers).await?;
    let todo = TodoService::new()
        .create(&tenant, auth.user_id, &payload.title, &payload.description)
        .await?;
    Ok(ApiResponse::created(todo))
}

/// GET /todos/:id
pub async fn show(
    Extension(auth): Extension<AuthUser>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Todo> {
    let tenant = resolve_tenant(&auth, &headers).await?;
    let todo = TodoService::new()
        .get(&tenant, auth.user_id, parse_todo_id(&id)?)
        .await?;
    Ok(ApiResponse::success(todo))
}

/// PUT /todos/:id - replace title and description
pub async fn update(
    Extension(auth): Extension<AuthUser>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(payload): Json<TodoPayload>,
) -> ApiResult<Todo> {
    let tenant = resolve_tenant(&auth, &headers).await?;
    let todo = TodoService::new()
        .update(
            &tenant,
            auth.user_id,
            parse_todo_id(&id)?,
            &payload.title,
            &payload.description,
        )
        .await?;
    Ok(ApiResponse::success(todo))
}

/// PUT /todos/:id/complete - mark done (idempotent)
pub async fn complete(
    Extension(auth): Extension<AuthUser>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Todo> {
    let tenant = resolve_tenant(&auth, &headers).await?;
    let todo = TodoService::new()
        .complete(&tenant, auth.user_id, parse_todo_id(&id)?)
        .await?;
    Ok(ApiResponse::success(todo))
}

/// DELETE /todos/:id
pub async fn destroy(
    Extension(auth): Extension<AuthUser>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let tenant = resolve_tenant(&auth, &headers).await?;
    TodoService::new()
        .delete(&tenant, auth.user_id, parse_todo_id(&id)?)
        .await?;
    Ok(ApiResponse::success(json!({ "message": "Todo deleted" })))
}
