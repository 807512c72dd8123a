use crate::application::ports::{Embedder, ModelError};
use crate::domain::Embedding;

pub const MOCK_EMBEDDING_DIMENSIONS: usize = 8;

/// Deterministic embedder: texts sharing words land close together.
pub struct MockEmbedder;

impl MockEmbedder {
    fn vectorize(text: &str) -> Embedding {
        let mut values = vec![0.0_f32; MOCK_EMBEDDING_DIMENSIONS];
        for word in text.split_whitespace() {
            let bucket = word
                .to_lowercase()
                .bytes()
                .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize))
                % MOCK_EMBEDDING_DIMENSIONS;
            values[bucket] += 1.0;
        }
        if values.iter().all(|v| *v == 0.0) {
            values[0] = 1.0;
        }
        Embedding::new(values)
    }
}

#[async_trait::async_trait]
impl Embedder for MockEmbedder {
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, ModelError> {
        Ok(texts.iter().map(|t| Self::vectorize(t)).collect())
    }
}
