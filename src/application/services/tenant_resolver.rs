use std::sync::Arc;

use crate::application::ports::{RepositoryError, UserRepository};
use crate::domain::{Tenant, User};

/// Maps an authenticated caller to the tenant whose data they act on.
pub struct TenantResolver {
    users: Arc<dyn UserRepository>,
}

impl TenantResolver {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn resolve(&self, email: &str) -> Result<Tenant, TenantError> {
        Ok(self.caller(email).await?.effective_tenant())
    }

    pub async fn caller(&self, email: &str) -> Result<User, TenantError> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or_else(|| TenantError::UnknownCaller(email.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TenantError {
    #[error("no account for {0}")]
    UnknownCaller(String),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
}
