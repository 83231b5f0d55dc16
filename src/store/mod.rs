pub mod memory;
pub mod registry;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Tenant, Todo, User};

pub use memory::{InMemoryIdentityStore, InMemoryTenantStore, InMemoryTodoStore};
pub use registry::StoreRegistry;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("{0}")]
    Duplicate(String),
    #[error("{0}")]
    Invalid(String),
    /// A persistent backend failing transiently. The in-memory stores never
    /// return this; it exists so substituted backends can surface outages
    /// instead of swallowing them.
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// User credential records, resolvable by id or email.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Insert a new user. Fails with [`StoreError::Duplicate`] when the
    /// email is already registered (exact, case-sensitive match).
    async fn create(&self, user: User) -> Result<(), StoreError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    /// Remove a user record. Exists for the registration compensating
    /// cleanup; users are otherwise never deleted.
    async fn remove(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Tenant records, resolvable by id, owning user, or bound domain.
#[async_trait]
pub trait TenantStore: Send + Sync {
    /// Insert a new tenant. Enforces one tenant per owner and a non-empty
    /// domain set.
    async fn create(&self, tenant: Tenant) -> Result<(), StoreError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Tenant>, StoreError>;
    async fn get_by_owner(&self, owner_id: Uuid) -> Result<Option<Tenant>, StoreError>;
    /// Exact-string domain membership lookup. Suffix or scheme policies
    /// belong to the resolver, not the store.
    async fn get_by_domain(&self, domain: &str) -> Result<Option<Tenant>, StoreError>;
}

/// Per-tenant todo collections. Every call is tenant-scoped; a todo is never
/// visible outside the collection it was created in. Ownership checks are the
/// todo service's job, not the store's.
#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn create(&self, tenant_id: Uuid, todo: Todo) -> Result<(), StoreError>;
    async fn get_by_id(&self, tenant_id: Uuid, todo_id: Uuid) -> Result<Option<Todo>, StoreError>;
    /// Todos owned by `owner_id`, in insertion order.
    async fn list_by_owner(&self, tenant_id: Uuid, owner_id: Uuid)
        -> Result<Vec<Todo>, StoreError>;
    /// Replace the stored record matching `todo.id`. A missing id is a
    /// silent no-op; callers resolve the record first.
    async fn update(&self, tenant_id: Uuid, todo: Todo) -> Result<(), StoreError>;
    /// Remove by id. A missing id is a silent no-op at this layer.
    async fn delete(&self, tenant_id: Uuid, todo_id: Uuid) -> Result<(), StoreError>;
}
