use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{TranscriptionClient, TranscriptionError};
use crate::domain::Transcript;

/// Serves transcripts registered up front and counts lookups.
#[derive(Default)]
pub struct MockTranscriptionClient {
    transcripts: RwLock<HashMap<String, Transcript>>,
    fetches: AtomicUsize,
}

impl MockTranscriptionClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, transcript: Transcript) {
        self.transcripts
            .write()
            .await
            .insert(transcript.id.clone(), transcript);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranscriptionClient for MockTranscriptionClient {
    async fn fetch_transcript(&self, transcript_id: &str) -> Result<Transcript, TranscriptionError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.transcripts
            .read()
            .await
            .get(transcript_id)
            .cloned()
            .ok_or_else(|| TranscriptionError::NotFound(transcript_id.to_string()))
    }

    async fn create_realtime_token(
        &self,
        expires_in_secs: u64,
    ) -> Result<String, TranscriptionError> {
        Ok(format!("mock-realtime-token-{expires_in_secs}"))
    }
}
