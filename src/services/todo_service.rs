use std::sync::Arc;

use uuid::Uuid;

use crate::models::{Tenant, Todo};
use crate::store::{StoreError, StoreRegistry, TodoStore};

#[derive(Debug, thiserror::Error)]
pub enum TodoError {
    #[error("{0}")]
    Validation(String),
    /// Covers both "no such todo" and "not the caller's todo"; the two are
    /// indistinguishable so ids cannot be probed.
    #[error("Todo not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Ownership-enforcing façade over the todo store. Every read and write of a
/// todo in the system goes through here; no other code path touches the
/// store.
pub struct TodoService {
    todos: Arc<dyn TodoStore>,
}

impl TodoService {
    pub fn new() -> Self {
        Self::with_store(StoreRegistry::todos())
    }

    pub fn with_store(todos: Arc<dyn TodoStore>) -> Self {
        Self { todos }
    }

    /// Resolve a todo the caller owns. Absent ids and foreign-owned ids
    /// collapse into the same `NotFound`.
    async fn owned(
        &self,
        tenant: &Tenant,
        caller_id: Uuid,
        todo_id: Uuid,
    ) -> Result<Todo, TodoError> {
        match self.todos.get_by_id(tenant.id, todo_id).await? {
            Some(todo) if todo.owner_id == caller_id => Ok(todo),
            _ => Err(TodoError::NotFound),
        }
    }

    pub async fn list(&self, tenant: &Tenant, caller_id: Uuid) -> Result<Vec<Todo>, TodoError> {
        Ok(self.todos.list_by_owner(tenant.id, caller_id).await?)
    }

    pub async fn create(
        &self,
        tenant: &Tenant,
        caller_id: Uuid,
        title: &str,
        description: &str,
    ) -> Result<Todo, TodoError> {
        let title = title.trim();
        let description = description.trim();
        if title.is_empty() || description.is_empty() {
            return Err(TodoError::Validation(
                "Title and description are required".to_string(),
            ));
        }

        let todo = Todo {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.to_string(),
            completed: false,
            owner_id: caller_id,
        };
        self.todos.create(tenant.id, todo.clone()).await?;
        tracing::debug!(tenant = %tenant.id, todo = %todo.id, "todo created");
        Ok(todo)
    }

    pub async fn get(
        &self,
        tenant: &Tenant,
        caller_id: Uuid,
        todo_id: Uuid,
    ) -> Result<Todo, TodoError> {
        self.owned(tenant, caller_id, todo_id).await
    }

    /// Replace title and description; `completed` and ownership are left
    /// untouched.
    pub async fn update(
        &self,
        tenant: &Tenant,
        caller_id: Uuid,
        todo_id: Uuid,
        title: &str,
        description: &str,
    ) -> Result<Todo, TodoError> {
        let mut todo = self.owned(tenant, caller_id, todo_id).await?;
        todo.title = title.to_string();
        todo.description = description.to_string();
        self.todos.update(tenant.id, todo.clone()).await?;
        Ok(todo)
    }

    /// Mark done. Idempotent; there is no toggle-off here.
    pub async fn complete(
        &self,
        tenant: &Tenant,
        caller_id: Uuid,
        todo_id: Uuid,
    ) -> Result<Todo, TodoError> {
        let mut todo = self.owned(tenant, caller_id, todo_id).await?;
        todo.completed = true;
        self.todos.update(tenant.id, todo.clone()).await?;
        Ok(todo)
    }

    pub async fn delete(
        &self,
        tenant: &Tenant,
        caller_id: Uuid,
        todo_id: Uuid,
    ) -> Result<(), TodoError> {
        self.owned(tenant, caller_id, todo_id).await?;
        self.todos.delete(tenant.id, todo_id).await?;
        tracing::debug!(tenant = %tenant.id, todo = %todo_id, "todo deleted");
        Ok(())
    }
}
