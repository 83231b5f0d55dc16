use std::sync::Arc;

use bcrypt::{hash, verify, DEFAULT_COST};
use uuid::Uuid;

use crate::auth::{self, AuthError, Claims};
use crate::config;
use crate::models::{Tenant, User};
use crate::store::{IdentityStore, StoreError, StoreRegistry, TenantStore};

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("User already exists")]
    EmailTaken,
    #[error("Invalid subdomain format")]
    InvalidSubdomain,
    /// Unknown email and wrong password are deliberately the same error.
    #[error("Incorrect email or password")]
    InvalidCredentials,
    #[error("You already have a tenant")]
    TenantExists,
    #[error(transparent)]
    Token(#[from] AuthError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("password hashing failed")]
    Hash(#[from] bcrypt::BcryptError),
}

/// An authenticated session plus the records it was minted against.
#[derive(Debug)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
    pub tenant: Option<Tenant>,
    pub redirect_url: Option<String>,
}

/// Registration, login and tenant creation. Registration is the one compound
/// flow in the system: it touches the identity and tenant stores and must
/// look atomic to the caller.
pub struct AccountService {
    identity: Arc<dyn IdentityStore>,
    tenants: Arc<dyn TenantStore>,
    root_domain: String,
}

impl AccountService {
    pub fn new() -> Self {
        Self::with_stores(
            StoreRegistry::identity(),
            StoreRegistry::tenants(),
            config::config().security.root_domain.clone(),
        )
    }

    pub fn with_stores(
        identity: Arc<dyn IdentityStore>,
        tenants: Arc<dyn TenantStore>,
        root_domain: String,
    ) -> Self {
        Self {
            identity,
            tenants,
            root_domain,
        }
    }

    /// Register a new user with a fresh tenant bound to
    /// `https://{subdomain}.{root}`, and log them in.
    ///
    /// Ids are generated and the token is signed before any store write, so
    /// the only partial-failure window left is the tenant insert, which is
    /// compensated by removing the just-created user.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        tenant_name: &str,
        subdomain: &str,
    ) -> Result<AuthSession, AccountError> {
        if self.identity.get_by_email(email).await?.is_some() {
            return Err(AccountError::EmailTaken);
        }

        let subdomain = subdomain.trim().to_lowercase();
        if !is_valid_subdomain(&subdomain) {
            return Err(AccountError::InvalidSubdomain);
        }

        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: hash(password, DEFAULT_COST)?,
        };
        let tenant_id = Uuid::new_v4();
        let domain = format!("https://{}.{}", subdomain, self.root_domain);
        let token = auth::issue_token(&Claims::new(user.id, Some(tenant_id)))?;

        self.identity.create(user.clone()).await.map_err(|e| match e {
            // Lost a race with a concurrent registration for the same email
            StoreError::Duplicate(_) => AccountError::EmailTaken,
            other => other.into(),
        })?;

        let tenant = Tenant {
            id: tenant_id,
            name: tenant_name.to_string(),
            owner_id: user.id,
            domains: vec![domain.clone()],
        };
        if let Err(e) = self.tenants.create(tenant.clone()).await {
            if let Err(cleanup) = self.identity.remove(user.id).await {
                tracing::error!(user = %user.id, %cleanup, "registration rollback failed");
            }
            return Err(e.into());
        }

        tracing::info!(user = %user.id, tenant = %tenant.id, "user registered");
        let redirect_url = format!("{}/todos?auth={}", domain, token);
        Ok(AuthSession {
            token,
            user,
            tenant: Some(tenant),
            redirect_url: Some(redirect_url),
        })
    }

    /// Verify credentials and mint a session scoped to the hinted tenant,
    /// falling back to the tenant the user owns, if any.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        tenant_hint: Option<Uuid>,
    ) -> Result<AuthSession, AccountError> {
        let user = self
            .identity
            .get_by_email(email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if !verify(password, &user.password_hash)? {
            tracing::warn!(user = %user.id, "failed login attempt");
            return Err(AccountError::InvalidCredentials);
        }

        let mut tenant = None;
        if let Some(id) = tenant_hint {
            tenant = self.tenants.get_by_id(id).await?;
        }
        if tenant.is_none() {
            tenant = self.tenants.get_by_owner(user.id).await?;
        }

        let token = auth::issue_token(&Claims::new(user.id, tenant.as_ref().map(|t| t.id)))?;
        let redirect_url = tenant
            .as_ref()
            .and_then(|t| t.primary_domain())
            .map(|domain| format!("{}/todos?auth={}", domain, token));

        Ok(AuthSession {
            token,
            user,
            tenant,
            redirect_url,
        })
    }

    /// Explicit tenant creation for a logged-in user without one. Domains
    /// arrive as a comma-separated list and are stored as given.
    pub async fn create_tenant(
        &self,
        owner_id: Uuid,
        name: &str,
        domains: &str,
    ) -> Result<Tenant, AccountError> {
        if self.tenants.get_by_owner(owner_id).await?.is_some() {
            return Err(AccountError::TenantExists);
        }

        let domains: Vec<String> = domains
            .split(',')
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .collect();

        let tenant = Tenant {
            id: Uuid::new_v4(),
            name: name.to_string(),
            owner_id,
            domains,
        };
        self.tenants.create(tenant.clone()).await.map_err(|e| match e {
            StoreError::Duplicate(_) => AccountError::TenantExists,
            other => other.into(),
        })?;

        tracing::info!(tenant = %tenant.id, owner = %owner_id, "tenant created");
        Ok(tenant)
    }

    /// Look up a tenant together with its owning user, for the public
    /// tenant page.
    pub async fn tenant_with_owner(
        &self,
        tenant_id: Uuid,
    ) -> Result<Option<(Tenant, Option<User>)>, AccountError> {
        let Some(tenant) = self.tenants.get_by_id(tenant_id).await? else {
            return Ok(None);
        };
        let owner = self.identity.get_by_id(tenant.owner_id).await?;
        Ok(Some((tenant, owner)))
    }
}

fn is_valid_subdomain(subdomain: &str) -> bool {
    !subdomain.is_empty()
        && subdomain
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
