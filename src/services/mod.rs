pub mod account_service;
pub mod tenant_resolver;
pub mod todo_service;

pub use account_service::{AccountError, AccountService, AuthSession};
pub use tenant_resolver::{HostTenant, ResolveError, TenantResolver};
pub use todo_service::{TodoError, TodoService};
