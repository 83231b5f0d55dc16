//! Process-wide store registry.
//!
//! The stores are shared mutable state reached by every request; handlers
//! build their services from these accessors. Swapping in a persistent
//! backend means replacing the initializers here, nothing else.

use std::sync::Arc;

use once_cell::sync::Lazy;

use super::memory::{InMemoryIdentityStore, InMemoryTenantStore, InMemoryTodoStore};
use super::{IdentityStore, TenantStore, TodoStore};

static IDENTITY: Lazy<Arc<InMemoryIdentityStore>> =
    Lazy::new(|| Arc::new(InMemoryIdentityStore::new()));
static TENANTS: Lazy<Arc<InMemoryTenantStore>> =
    Lazy::new(|| Arc::new(InMemoryTenantStore::new()));
static TODOS: Lazy<Arc<InMemoryTodoStore>> = Lazy::new(|| Arc::new(InMemoryTodoStore::new()));

pub struct StoreRegistry;

impl StoreRegistry {
    pub fn identity() -> Arc<dyn IdentityStore> {
        IDENTITY.clone()
    }

    pub fn tenants() -> Arc<dyn TenantStore> {
        TENANTS.clone()
    }

    pub fn todos() -> Arc<dyn TodoStore> {
        TODOS.clone()
    }
}
