use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::services::{AuthSession, ProfileUpdate, SignUpRequest};
use crate::domain::{User, UserRole};
use crate::presentation::extractors::{CallerIdentity, JsonBody};
use crate::presentation::response::{ApiResponse, ApiResult, Flag};
use crate::presentation::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignUpBody {
    pub name: String,
    pub email: String,
    pub password: String,
    pub company_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateUserBody {
    pub name: String,
    pub email: String,
    pub company_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdatePasswordBody {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InviteBody {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EmailBody {
    pub email: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VerifyResetBody {
    pub email: String,
    pub token: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewPasswordBody {
    pub new_password: String,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub name: String,
    pub role: UserRole,
}

impl From<AuthSession> for SessionResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            token: session.token,
            name: session.name,
            role: session.role,
        }
    }
}

#[derive(Serialize)]
pub struct RenamedSessionResponse {
    pub token: String,
    pub name: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// User profile as returned to clients. Never carries the password hash or reset token.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub company_name: Option<String>,
    pub role: UserRole,
    pub owner_company_email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id.as_uuid().to_string(),
            name: user.name,
            email: user.email,
            company_name: user.company_name,
            role: user.role,
            owner_company_email: user.owner_company_email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct CurrentUserResponse {
    pub user: UserView,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMembersResponse {
    pub team_members: Vec<UserView>,
}

#[tracing::instrument(skip(state, body), fields(email = %body.email))]
pub async fn sign_up_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<SignUpBody>,
) -> ApiResult<SessionResponse> {
    let session = state
        .account_service
        .sign_up(SignUpRequest {
            name: body.name,
            email: body.email,
            password: body.password,
            company_name: body.company_name,
        })
        .await?;
    Ok(ApiResponse(session.into()))
}

#[tracing::instrument(skip(state, body), fields(email = %body.email))]
pub async fn login_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginBody>,
) -> ApiResult<SessionResponse> {
    let session = state
        .account_service
        .login(&body.email, &body.password)
        .await?;
    Ok(ApiResponse(session.into()))
}

pub async fn current_user_handler(
    State(state): State<AppState>,
    caller: CallerIdentity,
) -> ApiResult<CurrentUserResponse> {
    let user = state.account_service.current_user(caller.email()).await?;
    Ok(ApiResponse(CurrentUserResponse { user: user.into() }))
}

pub async fn update_current_user_handler(
    State(state): State<AppState>,
    caller: CallerIdentity,
    JsonBody(body): JsonBody<UpdateUserBody>,
) -> ApiResult<RenamedSessionResponse> {
    let session = state
        .account_service
        .update_current_user(
            caller.email(),
            ProfileUpdate {
                name: body.name,
                email: body.email,
                company_name: body.company_name,
            },
        )
        .await?;
    Ok(ApiResponse(RenamedSessionResponse {
        token: session.token,
        name: session.name,
    }))
}

pub async fn update_password_handler(
    State(state): State<AppState>,
    caller: CallerIdentity,
    JsonBody(body): JsonBody<UpdatePasswordBody>,
) -> ApiResult<Flag> {
    state
        .account_service
        .update_password(caller.email(), &body.current_password, &body.new_password)
        .await?;
    Ok(ApiResponse(Flag::updated()))
}

pub async fn invite_team_member_handler(
    State(state): State<AppState>,
    caller: CallerIdentity,
    JsonBody(body): JsonBody<InviteBody>,
) -> ApiResult<Flag> {
    state
        .account_service
        .invite_team_member(caller.email(), &body.name, &body.email)
        .await?;
    Ok(ApiResponse(Flag::invited()))
}

pub async fn team_members_handler(
    State(state): State<AppState>,
    caller: CallerIdentity,
) -> ApiResult<TeamMembersResponse> {
    let members = state.account_service.team_members(caller.email()).await?;
    Ok(ApiResponse(TeamMembersResponse {
        team_members: members.into_iter().map(UserView::from).collect(),
    }))
}

pub async fn remove_team_member_handler(
    State(state): State<AppState>,
    caller: CallerIdentity,
    JsonBody(body): JsonBody<EmailBody>,
) -> ApiResult<Flag> {
    state
        .account_service
        .remove_team_member(caller.email(), &body.email)
        .await?;
    Ok(ApiResponse(Flag::deleted()))
}

pub async fn generate_reset_token_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<EmailBody>,
) -> ApiResult<Flag> {
    state
        .account_service
        .generate_password_reset_token(&body.email)
        .await?;
    Ok(ApiResponse(Flag::token_generated()))
}

pub async fn verify_reset_token_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<VerifyResetBody>,
) -> ApiResult<TokenResponse> {
    let token = state
        .account_service
        .verify_password_reset_token(&body.email, &body.token)
        .await?;
    Ok(ApiResponse(TokenResponse { token }))
}

pub async fn update_forgotten_password_handler(
    State(state): State<AppState>,
    caller: CallerIdentity,
    JsonBody(body): JsonBody<NewPasswordBody>,
) -> ApiResult<Flag> {
    state
        .account_service
        .update_forgotten_password(caller.email(), &body.new_password)
        .await?;
    Ok(ApiResponse(Flag::updated()))
}

/// Short-lived token for browser-side realtime transcription.
pub async fn realtime_token_handler(
    State(state): State<AppState>,
    _caller: CallerIdentity,
) -> ApiResult<TokenResponse> {
    let token = state.meeting_service.realtime_token().await?;
    Ok(ApiResponse(TokenResponse { token }))
}
