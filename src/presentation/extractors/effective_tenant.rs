use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::domain::Tenant;
use crate::presentation::error::ApiError;
use crate::presentation::state::AppState;

use super::CallerIdentity;

/// The tenant whose data the caller acts on. Team members resolve to their
/// owning company's email.
#[derive(Debug, Clone)]
pub struct EffectiveTenant {
    pub caller: String,
    pub tenant: Tenant,
}

impl FromRequestParts<AppState> for EffectiveTenant {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CallerIdentity(caller) = CallerIdentity::from_request_parts(parts, state).await?;
        let tenant = state.tenant_resolver.resolve(&caller).await?;
        Ok(Self { caller, tenant })
    }
}
