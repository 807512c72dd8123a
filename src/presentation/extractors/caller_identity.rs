use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::presentation::error::ApiError;
use crate::presentation::state::AppState;

/// Email of the authenticated caller, taken from a verified session token.
///
/// The `Authorization` header may carry either `Bearer <token>` or the bare token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity(pub String);

impl CallerIdentity {
    pub fn email(&self) -> &str {
        &self.0
    }
}

impl FromRequestParts<AppState> for CallerIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(ApiError::unauthenticated)?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .unwrap_or(header);

        match state.token_service.verify(token) {
            Ok(email) => Ok(Self(email)),
            Err(e) => {
                tracing::debug!(error = %e, "Rejected session token");
                Err(ApiError::unauthenticated())
            }
        }
    }
}
