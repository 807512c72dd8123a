use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::openai_http::send_json;
use crate::application::ports::{Embedder, ModelError};
use crate::domain::Embedding;

/// `/v1/embeddings` client. Questions and chunks are embedded with the same model.
pub struct OpenAiEmbedder {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Deserialize)]
struct EmbeddingItem {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

impl OpenAiEmbedder {
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/v1/embeddings", base_url.trim_end_matches('/')),
            api_key,
            model,
        }
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    #[tracing::instrument(skip_all, fields(model = %self.model, count = texts.len()))]
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, ModelError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = self.client.post(&self.endpoint).json(&EmbeddingsRequest {
            model: &self.model,
            input: texts,
        });
        let EmbeddingsResponse { mut data } = send_json(request, &self.api_key).await?;

        if data.len() != texts.len() {
            return Err(ModelError::MalformedResponse(format!(
                "asked for {} embeddings, received {}",
                texts.len(),
                data.len()
            )));
        }

        // The API may answer out of order; `index` points back at the input.
        data.sort_unstable_by_key(|item| item.index);
        Ok(data
            .into_iter()
            .map(|item| Embedding::new(item.embedding))
            .collect())
    }
}
