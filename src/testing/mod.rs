use std::sync::Arc;

use crate::services::{AccountService, AuthSession, TenantResolver, TodoService};
use crate::store::{InMemoryIdentityStore, InMemoryTenantStore, InMemoryTodoStore};

/// Test utilities: a disposable store bundle plus service constructors bound
/// to it, so scenario tests can run the real flows without touching the
/// process-wide registry.
pub struct TestContext {
    pub identity: Arc<InMemoryIdentityStore>,
    pub tenants: Arc<InMemoryTenantStore>,
    pub todos: Arc<InMemoryTodoStore>,
    pub root_domain: String,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            identity: Arc::new(InMemoryIdentityStore::new()),
            tenants: Arc::new(InMemoryTenantStore::new()),
            todos: Arc::new(InMemoryTodoStore::new()),
            root_domain: "example.com".to_string(),
        }
    }

    pub fn accounts(&self) -> AccountService {
        AccountService::with_stores(
            self.identity.clone(),
            self.tenants.clone(),
            self.root_domain.clone(),
        )
    }

    pub fn resolver(&self) -> TenantResolver {
        TenantResolver::with_store(self.tenants.clone(), self.root_domain.clone())
    }

    pub fn todo_service(&self) -> TodoService {
        TodoService::with_store(self.todos.clone())
    }

    /// Register a user with a tenant named after the subdomain.
    pub async fn register(&self, email: &str, subdomain: &str) -> AuthSession {
        self.accounts()
            .register(email, "password-1", subdomain, subdomain)
            .await
            .expect("test registration failed")
    }
}
