use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use super::error::ApiError;

/// Successful payload wrapped as `{data, success: true}`.
pub struct ApiResponse<T>(pub T);

pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

#[derive(Serialize)]
struct Envelope<T> {
    data: T,
    success: bool,
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            Json(Envelope {
                data: self.0,
                success: true,
            }),
        )
            .into_response()
    }
}

/// `{"isDeleted": true}` style acknowledgements.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Flag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_updated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_invited: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_token_generated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_scheduled: Option<bool>,
}

impl Flag {
    fn empty() -> Self {
        Self {
            is_updated: None,
            is_invited: None,
            is_deleted: None,
            is_token_generated: None,
            is_scheduled: None,
        }
    }

    pub fn updated() -> Self {
        Self {
            is_updated: Some(true),
            ..Self::empty()
        }
    }

    pub fn invited() -> Self {
        Self {
            is_invited: Some(true),
            ..Self::empty()
        }
    }

    pub fn deleted() -> Self {
        Self {
            is_deleted: Some(true),
            ..Self::empty()
        }
    }

    pub fn scheduled() -> Self {
        Self {
            is_scheduled: Some(true),
            ..Self::empty()
        }
    }

    pub fn token_generated() -> Self {
        Self {
            is_token_generated: Some(true),
            ..Self::empty()
        }
    }
}
