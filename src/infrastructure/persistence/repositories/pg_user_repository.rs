use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use super::pg_error::map_sqlx_error;
use crate::application::ports::{RepositoryError, UserRepository};
use crate::domain::{User, UserId, UserRole};

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    company_name: Option<String>,
    password_hash: String,
    role: String,
    owner_company_email: Option<String>,
    reset_token: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        let role = r
            .role
            .parse::<UserRole>()
            .map_err(RepositoryError::CorruptRecord)?;

        Ok(User {
            id: UserId::from_uuid(r.id),
            name: r.name,
            email: r.email,
            company_name: r.company_name,
            password_hash: r.password_hash,
            role,
            owner_company_email: r.owner_company_email,
            reset_token: r.reset_token,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

const USER_COLUMNS: &str = "id, name, email, company_name, password_hash, role, \
     owner_company_email, reset_token, created_at, updated_at";

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self, user), fields(user_id = %user.id.as_uuid()))]
    async fn create(&self, user: &User) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, company_name, password_hash, role,
                               owner_company_email, reset_token, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.company_name)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(&user.owner_company_email)
        .bind(&user.reset_token)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        row.map(User::try_from).transpose()
    }

    #[instrument(skip(self, name, company_name))]
    async fn update_profile(
        &self,
        current_email: &str,
        name: &str,
        email: &str,
        company_name: Option<&str>,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            UPDATE users
            SET name = $1, email = $2, company_name = $3, updated_at = $4
            WHERE email = $5
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(company_name)
        .bind(Utc::now())
        .bind(current_email)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE users SET password_hash = $1, updated_at = $2 WHERE email = $3")
            .bind(password_hash)
            .bind(Utc::now())
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    #[instrument(skip(self, reset_token))]
    async fn set_reset_token(
        &self,
        email: &str,
        reset_token: Option<&str>,
    ) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE users SET reset_token = $1, updated_at = $2 WHERE email = $3")
            .bind(reset_token)
            .bind(Utc::now())
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_team_members(&self, owner_email: &str) -> Result<Vec<User>, RepositoryError> {
        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE owner_company_email = $1 ORDER BY created_at"
        ))
        .bind(owner_email)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(User::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn delete(&self, email: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}
