use std::sync::Arc;

use uuid::Uuid;

use crate::config;
use crate::middleware::auth::AuthUser;
use crate::models::Tenant;
use crate::store::{StoreError, StoreRegistry, TenantStore};

/// Outcome of host-based resolution: the shared root domain serves the app
/// without a specific tenant, any other host must be claimed by one.
#[derive(Debug, Clone)]
pub enum HostTenant {
    Root,
    Tenant(Tenant),
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Tenant not found")]
    TenantNotFound,
    #[error("Missing or empty host header")]
    InvalidHost,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Binds a request to exactly one tenant, either from the authenticated
/// session's claim (with an optional request-supplied hint as fallback) or
/// from the request host before any token exists.
pub struct TenantResolver {
    tenants: Arc<dyn TenantStore>,
    root_domain: String,
}

impl TenantResolver {
    pub fn new() -> Self {
        Self::with_store(
            StoreRegistry::tenants(),
            config::config().security.root_domain.clone(),
        )
    }

    pub fn with_store(tenants: Arc<dyn TenantStore>, root_domain: String) -> Self {
        Self {
            tenants,
            root_domain,
        }
    }

    /// Claim-based resolution for authenticated calls. The session claim
    /// wins; the `Tenant` header hint is only consulted when the claim
    /// carries no tenant.
    pub async fn resolve(
        &self,
        principal: &AuthUser,
        hint: Option<Uuid>,
    ) -> Result<Tenant, ResolveError> {
        let tenant_id = principal
            .tenant_id
            .or(hint)
            .ok_or(ResolveError::TenantNotFound)?;

        match self.tenants.get_by_id(tenant_id).await? {
            Some(tenant) => Ok(tenant),
            None => {
                tracing::warn!(%tenant_id, "tenant claim does not resolve");
                Err(ResolveError::TenantNotFound)
            }
        }
    }

    /// Host-based resolution for the pre-authentication existence check.
    /// Registration stores domains as canonical origins, so a bare host is
    /// retried with the `https://` prefix when the exact match misses.
    pub async fn resolve_host(&self, host: &str) -> Result<HostTenant, ResolveError> {
        let host = host.trim();
        if host.is_empty() {
            return Err(ResolveError::InvalidHost);
        }

        if host == self.root_domain {
            return Ok(HostTenant::Root);
        }

        if let Some(tenant) = self.tenants.get_by_domain(host).await? {
            return Ok(HostTenant::Tenant(tenant));
        }
        if let Some(tenant) = self
            .tenants
            .get_by_domain(&format!("https://{host}"))
            .await?
        {
            return Ok(HostTenant::Tenant(tenant));
        }

        tracing::debug!(host, "no tenant claims host");
        Err(ResolveError::TenantNotFound)
    }
}
