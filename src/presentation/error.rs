use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::{
    AccountError, IngestionError, MeetingError, RetrievalError, TenantError,
};

pub const NOT_AUTHENTICATED: &str = "Not authenticated.";
const INTERNAL_ERROR: &str = "Something went wrong";

/// Every failed request is rendered as `{message, statusCode}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    message: &'a str,
    status_code: u16,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn unauthenticated() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, NOT_AUTHENTICATED)
    }

    /// Logs the cause and hides it from the caller.
    pub fn internal(cause: impl std::fmt::Display) -> Self {
        tracing::error!(error = %cause, "Request failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: &self.message,
            status_code: self.status.as_u16(),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(e: AccountError) -> Self {
        let status = match &e {
            AccountError::MissingField(_)
            | AccountError::ResetEmailUnknown
            | AccountError::InvalidResetToken
            | AccountError::CurrentPasswordIncorrect
            | AccountError::AdminEmailLocked => StatusCode::UNPROCESSABLE_ENTITY,
            AccountError::EmailTaken => StatusCode::CONFLICT,
            AccountError::UserNotFound | AccountError::TeamMemberNotFound => StatusCode::NOT_FOUND,
            AccountError::IncorrectPassword => StatusCode::UNAUTHORIZED,
            AccountError::NotAdmin => StatusCode::FORBIDDEN,
            AccountError::Repository(_) | AccountError::Hashing(_) | AccountError::Token(_) => {
                return Self::internal(e);
            }
        };
        Self::new(status, e.to_string())
    }
}

impl From<IngestionError> for ApiError {
    fn from(e: IngestionError) -> Self {
        match &e {
            IngestionError::UnsupportedContentType(_) | IngestionError::FileLoading(_) => {
                Self::validation(e.to_string())
            }
            IngestionError::DocumentNotFound => Self::new(StatusCode::NOT_FOUND, e.to_string()),
            _ => Self::internal(e),
        }
    }
}

impl From<RetrievalError> for ApiError {
    fn from(e: RetrievalError) -> Self {
        match &e {
            RetrievalError::EmptyQuestion => Self::validation(e.to_string()),
            _ => Self::internal(e),
        }
    }
}

impl From<MeetingError> for ApiError {
    fn from(e: MeetingError) -> Self {
        match &e {
            MeetingError::Validation(_)
            | MeetingError::Expired
            | MeetingError::Compiling
            | MeetingError::Processing
            | MeetingError::TranscriptionFailed(_) => Self::validation(e.to_string()),
            MeetingError::NotFound => Self::new(StatusCode::NOT_FOUND, e.to_string()),
            _ => Self::internal(e),
        }
    }
}

impl From<TenantError> for ApiError {
    fn from(e: TenantError) -> Self {
        match &e {
            // A valid token for an account that no longer exists.
            TenantError::UnknownCaller(_) => Self::unauthenticated(),
            TenantError::Repository(_) => Self::internal(e),
        }
    }
}

/// Body that does not parse, or lacks the JSON content type, is invalid input.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => {
                Self::new(StatusCode::PAYLOAD_TOO_LARGE, rejection.body_text())
            }
            _ => Self::validation(format!("Invalid request body: {}", rejection.body_text())),
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::validation(format!("Invalid upload: {}", rejection.body_text()))
    }
}
