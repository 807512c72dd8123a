use async_trait::async_trait;
use tokio::sync::RwLock;

use super::ConnectionGate;
use crate::application::ports::{IndexLayout, ScoredChunk, VectorStore, VectorStoreError};
use crate::domain::{Chunk, DocumentId, Embedding, Tenant};

/// Brute-force cosine search over points kept in memory. Holds a lease from its
/// gate for every operation, like the Qdrant adapter.
pub struct InMemoryVectorStore {
    points: RwLock<Vec<(Chunk, Embedding)>>,
    gate: ConnectionGate,
    fail_searches: bool,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::with_gate(ConnectionGate::new(4))
    }

    pub fn with_gate(gate: ConnectionGate) -> Self {
        Self {
            points: RwLock::new(Vec::new()),
            gate,
            fail_searches: false,
        }
    }

    /// Store whose searches fail after the lease has been taken.
    pub fn failing(gate: ConnectionGate) -> Self {
        Self {
            fail_searches: true,
            ..Self::with_gate(gate)
        }
    }

    pub async fn chunks(&self) -> Vec<Chunk> {
        self.points
            .read()
            .await
            .iter()
            .map(|(chunk, _)| chunk.clone())
            .collect()
    }
}

impl Default for InMemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn ensure_index(&self, _layout: &IndexLayout) -> Result<bool, VectorStoreError> {
        let _lease = self.gate.acquire().await?;
        Ok(false)
    }

    async fn index_exists(&self) -> Result<bool, VectorStoreError> {
        let _lease = self.gate.acquire().await?;
        Ok(true)
    }

    async fn upsert(
        &self,
        chunks: &[Chunk],
        embeddings: &[Embedding],
    ) -> Result<(), VectorStoreError> {
        if chunks.len() != embeddings.len() {
            return Err(VectorStoreError::Upsert(
                "chunks and embeddings count mismatch".to_string(),
            ));
        }

        let _lease = self.gate.acquire().await?;
        let mut points = self.points.write().await;
        for (chunk, embedding) in chunks.iter().zip(embeddings) {
            points.retain(|(existing, _)| existing.id != chunk.id);
            points.push((chunk.clone(), embedding.clone()));
        }
        Ok(())
    }

    async fn search(
        &self,
        embedding: &Embedding,
        owner: &Tenant,
        limit: usize,
    ) -> Result<Vec<ScoredChunk>, VectorStoreError> {
        let _lease = self.gate.acquire().await?;

        if self.fail_searches {
            return Err(VectorStoreError::Search("store unavailable".to_string()));
        }

        let points = self.points.read().await;
        let mut results: Vec<ScoredChunk> = points
            .iter()
            .filter(|(chunk, _)| &chunk.owner == owner)
            .map(|(chunk, stored)| ScoredChunk {
                chunk: chunk.clone(),
                score: embedding.cosine_similarity(stored),
                embedding: Some(stored.clone()),
            })
            .collect();

        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(limit);
        Ok(results)
    }

    async fn delete_by_document(&self, document_id: DocumentId) -> Result<(), VectorStoreError> {
        let _lease = self.gate.acquire().await?;
        self.points
            .write()
            .await
            .retain(|(chunk, _)| chunk.document_id != document_id);
        Ok(())
    }
}
