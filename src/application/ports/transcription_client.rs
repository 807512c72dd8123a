use async_trait::async_trait;

use crate::domain::Transcript;

#[async_trait]
pub trait TranscriptionClient: Send + Sync {
    async fn fetch_transcript(&self, transcript_id: &str) -> Result<Transcript, TranscriptionError>;

    /// Temporary token that lets a browser stream audio to the realtime endpoint.
    async fn create_realtime_token(&self, expires_in_secs: u64)
    -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("transcript not found: {0}")]
    NotFound(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
