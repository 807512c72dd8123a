use serde::Serialize;

use crate::infrastructure::observability::RequestId;
use crate::presentation::response::ApiResponse;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub request_id: String,
}

pub async fn health_handler(request_id: RequestId) -> ApiResponse<HealthResponse> {
    ApiResponse(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        request_id: request_id.as_str().to_string(),
    })
}
