use std::sync::Arc;

use crate::application::ports::{
    DocumentRepository, Mailer, MeetingRepository, OutgoingEmail, PasswordHasher,
    PasswordHasherError, RepositoryError, TokenError, TokenService, UserRepository,
};
use crate::domain::{User, UserRole};

use super::credentials::{RESET_TOKEN_LENGTH, generate_password, generate_reset_token};

/// Token plus the profile bits the frontend needs right after sign-in.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub token: String,
    pub name: String,
    pub role: UserRole,
}

#[derive(Debug, Clone)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub company_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    pub company_name: Option<String>,
}

pub struct AccountService {
    users: Arc<dyn UserRepository>,
    documents: Arc<dyn DocumentRepository>,
    meetings: Arc<dyn MeetingRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
    mailer: Arc<dyn Mailer>,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        documents: Arc<dyn DocumentRepository>,
        meetings: Arc<dyn MeetingRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            users,
            documents,
            meetings,
            hasher,
            tokens,
            mailer,
        }
    }

    #[tracing::instrument(skip(self, request), fields(email = %request.email))]
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<AuthSession, AccountError> {
        let email = request.email.trim();
        if email.is_empty() || request.password.is_empty() {
            return Err(AccountError::MissingField("Email or Password is required"));
        }

        if self.users.find_by_email(email).await?.is_some() {
            return Err(AccountError::EmailTaken);
        }

        let password_hash = self.hasher.hash(&request.password).await?;
        let user = User::new_admin(
            request.name.trim().to_string(),
            email.to_string(),
            request.company_name.filter(|c| !c.trim().is_empty()),
            password_hash,
        );

        self.users.create(&user).await.map_err(|e| match e {
            RepositoryError::Duplicate(_) => AccountError::EmailTaken,
            other => AccountError::Repository(other),
        })?;

        let token = self.tokens.issue(&user.email)?;

        self.notify(OutgoingEmail {
            to: user.email.clone(),
            subject: "Blitzday Account Created".to_string(),
            body: "A Blitzday account has been created using your email.\n\nIf you suspect someone created this account without your authorization contact us via support@blitzday.com.\n".to_string(),
        })
        .await;

        tracing::info!("Account created");
        Ok(AuthSession {
            token,
            name: user.name,
            role: user.role,
        })
    }

    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AccountError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AccountError::MissingField("Email or Password is required"));
        }

        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        if !self.hasher.verify(password, &user.password_hash).await? {
            tracing::info!("Login rejected");
            return Err(AccountError::IncorrectPassword);
        }

        let token = self.tokens.issue(&user.email)?;
        Ok(AuthSession {
            token,
            name: user.name,
            role: user.role,
        })
    }

    pub async fn current_user(&self, email: &str) -> Result<User, AccountError> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or(AccountError::UserNotFound)
    }

    /// Updates the caller's profile and issues a token for the (possibly new) email.
    #[tracing::instrument(skip(self, update))]
    pub async fn update_current_user(
        &self,
        email: &str,
        update: ProfileUpdate,
    ) -> Result<AuthSession, AccountError> {
        let name = update.name.trim();
        let new_email = update.email.trim();
        if name.is_empty() || new_email.is_empty() {
            return Err(AccountError::MissingField("Name or Email is required"));
        }

        let user = self.current_user(email).await?;

        if new_email != email {
            if self.users.find_by_email(new_email).await?.is_some() {
                return Err(AccountError::EmailTaken);
            }
            if user.is_admin() && self.owns_tenant_data(&user).await? {
                return Err(AccountError::AdminEmailLocked);
            }
        }

        self.users
            .update_profile(
                email,
                name,
                new_email,
                update.company_name.as_deref().filter(|c| !c.trim().is_empty()),
            )
            .await
            .map_err(|e| match e {
                RepositoryError::Duplicate(_) => AccountError::EmailTaken,
                other => AccountError::Repository(other),
            })?;

        let token = self.tokens.issue(new_email)?;
        Ok(AuthSession {
            token,
            name: name.to_string(),
            role: user.role,
        })
    }

    /// Tenant rows are keyed by the admin's email, so they pin it.
    async fn owns_tenant_data(&self, admin: &User) -> Result<bool, AccountError> {
        if !self.users.list_team_members(&admin.email).await?.is_empty() {
            return Ok(true);
        }
        let tenant = admin.effective_tenant();
        if !self.documents.list_by_owner(&tenant).await?.is_empty() {
            return Ok(true);
        }
        Ok(!self.meetings.list_by_owner(&tenant).await?.is_empty())
    }

    #[tracing::instrument(skip(self, current_password, new_password))]
    pub async fn update_password(
        &self,
        email: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AccountError> {
        if current_password.is_empty() || new_password.is_empty() {
            return Err(AccountError::MissingField(
                "Current Password or New Password is required",
            ));
        }

        let user = self.current_user(email).await?;
        if !self
            .hasher
            .verify(current_password, &user.password_hash)
            .await?
        {
            return Err(AccountError::CurrentPasswordIncorrect);
        }

        let password_hash = self.hasher.hash(new_password).await?;
        self.users.update_password(email, &password_hash).await?;
        Ok(())
    }

    /// Creates a team member under the calling admin and emails them a generated password.
    #[tracing::instrument(skip(self, name))]
    pub async fn invite_team_member(
        &self,
        caller: &str,
        name: &str,
        email: &str,
    ) -> Result<(), AccountError> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() || email.is_empty() {
            return Err(AccountError::MissingField("Name or Email is required"));
        }

        self.require_admin(caller).await?;

        if self.users.find_by_email(email).await?.is_some() {
            return Err(AccountError::EmailTaken);
        }

        let password = generate_password();
        let password_hash = self.hasher.hash(&password).await?;
        let member = User::new_team_member(
            name.to_string(),
            email.to_string(),
            caller.to_string(),
            password_hash,
        );

        self.users.create(&member).await.map_err(|e| match e {
            RepositoryError::Duplicate(_) => AccountError::EmailTaken,
            other => AccountError::Repository(other),
        })?;

        self.notify(OutgoingEmail {
            to: member.email.clone(),
            subject: "Blitzday Invite".to_string(),
            body: format!(
                "Hi {name},\n\n{caller} has invited you to join team. Please use following credentials to login:\n\nEmail: {email}\nPassword: {password}\n\nThanks\n"
            ),
        })
        .await;

        tracing::info!("Team member invited");
        Ok(())
    }

    pub async fn team_members(&self, caller: &str) -> Result<Vec<User>, AccountError> {
        Ok(self.users.list_team_members(caller).await?)
    }

    /// Deletes a team member together with the meetings they created.
    #[tracing::instrument(skip(self))]
    pub async fn remove_team_member(&self, caller: &str, email: &str) -> Result<(), AccountError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AccountError::MissingField("Team member email is required"));
        }

        self.require_admin(caller).await?;

        let member = self
            .users
            .find_by_email(email)
            .await?
            .filter(|u| {
                u.role == UserRole::TeamMember && u.owner_company_email.as_deref() == Some(caller)
            })
            .ok_or(AccountError::TeamMemberNotFound)?;

        let removed_meetings = self.meetings.delete_created_by(&member.email).await?;
        self.users.delete(&member.email).await?;

        tracing::info!(removed_meetings, "Team member removed");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn generate_password_reset_token(&self, email: &str) -> Result<(), AccountError> {
        let user = self
            .users
            .find_by_email(email.trim())
            .await?
            .ok_or(AccountError::ResetEmailUnknown)?;

        let reset_token = generate_reset_token(RESET_TOKEN_LENGTH);
        self.users
            .set_reset_token(&user.email, Some(reset_token.as_str()))
            .await?;

        self.notify(OutgoingEmail {
            to: user.email.clone(),
            subject: "Forgot Password".to_string(),
            body: format!(
                "Hi {},\n\nPlease use following token to resume password reset flow:\n\nToken: {reset_token}\n\nThanks\n",
                user.name
            ),
        })
        .await;

        Ok(())
    }

    /// Consumes a reset token and returns a session token for the reset flow.
    #[tracing::instrument(skip(self, token))]
    pub async fn verify_password_reset_token(
        &self,
        email: &str,
        token: &str,
    ) -> Result<String, AccountError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AccountError::MissingField("Token is required"));
        }

        let user = self
            .users
            .find_by_email(email.trim())
            .await?
            .filter(|u| u.reset_token.as_deref() == Some(token))
            .ok_or(AccountError::InvalidResetToken)?;

        self.users.set_reset_token(&user.email, None).await?;
        Ok(self.tokens.issue(&user.email)?)
    }

    pub async fn update_forgotten_password(
        &self,
        email: &str,
        new_password: &str,
    ) -> Result<(), AccountError> {
        if new_password.is_empty() {
            return Err(AccountError::MissingField("New Password is required"));
        }

        let password_hash = self.hasher.hash(new_password).await?;
        self.users.update_password(email, &password_hash).await?;
        Ok(())
    }

    async fn require_admin(&self, email: &str) -> Result<User, AccountError> {
        let user = self.current_user(email).await?;
        if !user.is_admin() {
            return Err(AccountError::NotAdmin);
        }
        Ok(user)
    }

    /// Account notifications are best effort; a failed delivery never fails the request.
    async fn notify(&self, email: OutgoingEmail) {
        let subject = email.subject.clone();
        if let Err(e) = self.mailer.send(email).await {
            tracing::warn!(subject = %subject, error = %e, "Failed to send account email");
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("{0}")]
    MissingField(&'static str),
    #[error("Email already exists")]
    EmailTaken,
    #[error("Email cannot be changed while the company has team members, documents or meetings")]
    AdminEmailLocked,
    #[error("No user exists with this email")]
    UserNotFound,
    #[error("Password is incorrect")]
    IncorrectPassword,
    #[error("Current password is incorrect")]
    CurrentPasswordIncorrect,
    #[error("Only admins can manage team members")]
    NotAdmin,
    #[error("Team member not found")]
    TeamMemberNotFound,
    #[error("No users exists with this email")]
    ResetEmailUnknown,
    #[error("Token is invalid")]
    InvalidResetToken,
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
    #[error("password hashing: {0}")]
    Hashing(#[from] PasswordHasherError),
    #[error("token: {0}")]
    Token(#[from] TokenError),
}
