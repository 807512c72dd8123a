use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::User;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `Duplicate` when the email is already registered.
    async fn create(&self, user: &User) -> Result<(), RepositoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    async fn update_profile(
        &self,
        current_email: &str,
        name: &str,
        email: &str,
        company_name: Option<&str>,
    ) -> Result<(), RepositoryError>;

    async fn update_password(&self, email: &str, password_hash: &str)
    -> Result<(), RepositoryError>;

    async fn set_reset_token(
        &self,
        email: &str,
        reset_token: Option<&str>,
    ) -> Result<(), RepositoryError>;

    async fn list_team_members(&self, owner_email: &str) -> Result<Vec<User>, RepositoryError>;

    async fn delete(&self, email: &str) -> Result<bool, RepositoryError>;
}
