use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::ports::{TranscriptionClient, TranscriptionError};
use crate::domain::{Transcript, TranscriptStatus, Utterance};

/// AssemblyAI REST client: transcript lookup and realtime token minting.
pub struct AssemblyAiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct TranscriptResponse {
    id: String,
    status: String,
    #[serde(default)]
    utterances: Option<Vec<UtteranceResponse>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct UtteranceResponse {
    speaker: String,
    text: String,
}

#[derive(Serialize)]
struct RealtimeTokenRequest {
    expires_in: u64,
}

#[derive(Deserialize)]
struct RealtimeTokenResponse {
    token: String,
}

impl AssemblyAiClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    async fn error_for(response: reqwest::Response) -> TranscriptionError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        TranscriptionError::ApiRequestFailed(format!("HTTP {}: {}", status, body))
    }
}

#[async_trait]
impl TranscriptionClient for AssemblyAiClient {
    #[tracing::instrument(skip(self))]
    async fn fetch_transcript(&self, transcript_id: &str) -> Result<Transcript, TranscriptionError> {
        let response = self
            .client
            .get(format!("{}/v2/transcript/{}", self.base_url, transcript_id))
            .header("authorization", &self.api_key)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(TranscriptionError::NotFound(transcript_id.to_string()));
        }

        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        let body: TranscriptResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(e.to_string()))?;

        let status = body
            .status
            .parse::<TranscriptStatus>()
            .map_err(TranscriptionError::InvalidResponse)?;

        tracing::debug!(status = %status, "Transcript fetched");

        Ok(Transcript {
            id: body.id,
            status,
            utterances: body
                .utterances
                .unwrap_or_default()
                .into_iter()
                .map(|u| Utterance {
                    speaker: u.speaker,
                    text: u.text,
                })
                .collect(),
            error: body.error,
        })
    }

    #[tracing::instrument(skip(self))]
    async fn create_realtime_token(
        &self,
        expires_in_secs: u64,
    ) -> Result<String, TranscriptionError> {
        let response = self
            .client
            .post(format!("{}/v2/realtime/token", self.base_url))
            .header("authorization", &self.api_key)
            .json(&RealtimeTokenRequest {
                expires_in: expires_in_secs,
            })
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        let body: RealtimeTokenResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(e.to_string()))?;

        Ok(body.token)
    }
}
