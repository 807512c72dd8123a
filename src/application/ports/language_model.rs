use async_trait::async_trait;

use crate::domain::Embedding;

/// Chat-completion model. The system prompt, when present, precedes the user prompt.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(
        &self,
        system_prompt: Option<&str>,
        user_prompt: &str,
    ) -> Result<String, ModelError>;
}

/// Turns text into vectors. Questions and stored chunks must go through the same model.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// One vector per input, in input order.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, ModelError>;

    async fn embed(&self, text: &str) -> Result<Embedding, ModelError> {
        self.embed_batch(&[text])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::MalformedResponse("no embedding returned".to_string()))
    }
}

/// Failure talking to a hosted model, whether for completions or embeddings.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model request failed: {0}")]
    Request(String),
    #[error("model provider is rate limiting")]
    RateLimited,
    #[error("malformed model response: {0}")]
    MalformedResponse(String),
}
