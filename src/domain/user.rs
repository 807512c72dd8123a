use chrono::{DateTime, Utc};

use super::{Tenant, UserId, UserRole};

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub company_name: Option<String>,
    pub password_hash: String,
    pub role: UserRole,
    pub owner_company_email: Option<String>,
    pub reset_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new_admin(
        name: String,
        email: String,
        company_name: Option<String>,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            name,
            email,
            company_name,
            password_hash,
            role: UserRole::Admin,
            owner_company_email: None,
            reset_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn new_team_member(
        name: String,
        email: String,
        owner_company_email: String,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            name,
            email,
            company_name: None,
            password_hash,
            role: UserRole::TeamMember,
            owner_company_email: Some(owner_company_email),
            reset_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Team members act on behalf of the company that invited them.
    pub fn effective_tenant(&self) -> Tenant {
        match (&self.role, &self.owner_company_email) {
            (UserRole::TeamMember, Some(owner)) => Tenant::new(owner.clone()),
            _ => Tenant::new(self.email.clone()),
        }
    }
}
