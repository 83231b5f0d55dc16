//! In-memory reference implementations of the repository traits.
//!
//! Each store owns its collection outright behind a single `RwLock`; every
//! mutation takes the write lock for the whole read-modify-write, so
//! concurrent writers on the same key cannot interleave partial writes.
//! Locks are never held across await points.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Tenant, Todo, User};

use super::{IdentityStore, StoreError, TenantStore, TodoStore};

#[derive(Default)]
pub struct InMemoryIdentityStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn create(&self, user: User) -> Result<(), StoreError> {
        let mut users = self.users.write().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate(format!(
                "email '{}' is already registered",
                user.email
            )));
        }
        users.insert(user.id, user);
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().unwrap().get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn remove(&self, id: Uuid) -> Result<(), StoreError> {
        self.users.write().unwrap().remove(&id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryTenantStore {
    tenants: RwLock<HashMap<Uuid, Tenant>>,
}

impl InMemoryTenantStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TenantStore for InMemoryTenantStore {
    async fn create(&self, tenant: Tenant) -> Result<(), StoreError> {
        if tenant.domains.is_empty() {
            return Err(StoreError::Invalid(
                "a tenant requires at least one domain".to_string(),
            ));
        }

        let mut tenants = self.tenants.write().unwrap();
        if tenants.values().any(|t| t.owner_id == tenant.owner_id) {
            return Err(StoreError::Duplicate(
                "owner already has a tenant".to_string(),
            ));
        }
        tenants.insert(tenant.id, tenant);
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Tenant>, StoreError> {
        Ok(self.tenants.read().unwrap().get(&id).cloned())
    }

    async fn get_by_owner(&self, owner_id: Uuid) -> Result<Option<Tenant>, StoreError> {
        Ok(self
            .tenants
            .read()
            .unwrap()
            .values()
            .find(|t| t.owner_id == owner_id)
            .cloned())
    }

    async fn get_by_domain(&self, domain: &str) -> Result<Option<Tenant>, StoreError> {
        Ok(self
            .tenants
            .read()
            .unwrap()
            .values()
            .find(|t| t.domains.iter().any(|d| d == domain))
            .cloned())
    }
}

/// Tenant-keyed todo arenas. The inner `Vec` preserves insertion order,
/// which is the listing order callers observe.
#[derive(Default)]
pub struct InMemoryTodoStore {
    collections: RwLock<HashMap<Uuid, Vec<Todo>>>,
}

impl InMemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for InMemoryTodoStore {
    async fn create(&self, tenant_id: Uuid, todo: Todo) -> Result<(), StoreError> {
        self.collections
            .write()
            .unwrap()
            .entry(tenant_id)
            .or_default()
            .push(todo);
        Ok(())
    }

    async fn get_by_id(&self, tenant_id: Uuid, todo_id: Uuid) -> Result<Option<Todo>, StoreError> {
        Ok(self
            .collections
            .read()
            .unwrap()
            .get(&tenant_id)
            .and_then(|todos| todos.iter().find(|t| t.id == todo_id))
            .cloned())
    }

    async fn list_by_owner(
        &self,
        tenant_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Vec<Todo>, StoreError> {
        Ok(self
            .collections
            .read()
            .unwrap()
            .get(&tenant_id)
            .map(|todos| {
                todos
                    .iter()
                    .filter(|t| t.owner_id == owner_id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn update(&self, tenant_id: Uuid, todo: Todo) -> Result<(), StoreError> {
        let mut collections = self.collections.write().unwrap();
        if let Some(todos) = collections.get_mut(&tenant_id) {
            if let Some(existing) = todos.iter_mut().find(|t| t.id == todo.id) {
                *existing = todo;
            }
        }
        Ok(())
    }

    async fn delete(&self, tenant_id: Uuid, todo_id: Uuid) -> Result<(), StoreError> {
        let mut collections = self.collections.write().unwrap();
        if let Some(todos) = collections.get_mut(&tenant_id) {
            todos.retain(|t| t.id != todo_id);
        }
        Ok(())
    }
}
