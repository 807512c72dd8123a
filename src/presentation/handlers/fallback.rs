use axum::http::{StatusCode, Uri};

use crate::presentation::error::ApiError;

pub async fn not_found_handler(uri: Uri) -> ApiError {
    tracing::debug!(path = %uri.path(), "No route matched");
    ApiError::new(StatusCode::NOT_FOUND, format!("Not found - {}", uri.path()))
}
