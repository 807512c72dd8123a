use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::application::ports::ModelError;

/// Sends an authenticated OpenAI request and decodes a successful JSON body.
/// 429 maps to [`ModelError::RateLimited`]; any other failure status carries the body.
pub(super) async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    api_key: &str,
) -> Result<T, ModelError> {
    let response = request
        .bearer_auth(api_key)
        .send()
        .await
        .map_err(|e| ModelError::Request(e.to_string()))?;

    let response = check_status(response).await?;

    response
        .json()
        .await
        .map_err(|e| ModelError::MalformedResponse(e.to_string()))
}

async fn check_status(response: Response) -> Result<Response, ModelError> {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ModelError::RateLimited);
    }
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ModelError::Request(format!("HTTP {status}: {body}")))
}
