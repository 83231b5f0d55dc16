use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered account. The bcrypt hash never leaves the store layer;
/// responses go through [`UserResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Isolated account boundary owning a domain set and a todo collection.
/// The todo collection itself lives in the todo store, keyed by tenant id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
    pub domains: Vec<String>,
}

impl Tenant {
    /// Primary domain, used for post-auth redirect targets.
    pub fn primary_domain(&self) -> Option<&str> {
        self.domains.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub owner_id: Uuid,
}

/// Client-safe view of a user (no credential material).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
        }
    }
}

/// Client-safe view of a tenant, optionally embedding its owner.
#[derive(Debug, Clone, Serialize)]
pub struct TenantResponse {
    pub id: Uuid,
    pub name: String,
    pub domains: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<UserResponse>,
}

impl TenantResponse {
    pub fn new(tenant: &Tenant) -> Self {
        Self {
            id: tenant.id,
            name: tenant.name.clone(),
            domains: tenant.domains.clone(),
            owner: None,
        }
    }

    pub fn with_owner(tenant: &Tenant, owner: &User) -> Self {
        Self {
            owner: Some(owner.into()),
            ..Self::new(tenant)
        }
    }
}
