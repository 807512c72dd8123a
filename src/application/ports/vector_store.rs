use async_trait::async_trait;

use crate::domain::{Chunk, DocumentId, Embedding, Tenant};

/// Payload keys the index must be able to filter on: search is always scoped to
/// an owner and deletion always targets one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilteredField {
    DocumentId,
    OwnerEmail,
}

impl FilteredField {
    pub const ALL: [FilteredField; 2] = [FilteredField::DocumentId, FilteredField::OwnerEmail];

    pub fn key(&self) -> &'static str {
        match self {
            FilteredField::DocumentId => "document_id",
            FilteredField::OwnerEmail => "owner_email",
        }
    }
}

/// Shape of the chunk index. Similarity is cosine throughout, matching the
/// re-ranking done on the returned vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexLayout {
    pub dimensions: u64,
    pub filtered_fields: Vec<FilteredField>,
}

impl IndexLayout {
    pub fn new(dimensions: u64) -> Self {
        Self {
            dimensions,
            filtered_fields: FilteredField::ALL.to_vec(),
        }
    }
}

/// A stored chunk with its similarity to the query and, when available, its vector.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
    pub embedding: Option<Embedding>,
}

#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Creates the index when missing. Returns `false` when it already existed.
    async fn ensure_index(&self, layout: &IndexLayout) -> Result<bool, VectorStoreError>;

    async fn index_exists(&self) -> Result<bool, VectorStoreError>;

    async fn upsert(
        &self,
        chunks: &[Chunk],
        embeddings: &[Embedding],
    ) -> Result<(), VectorStoreError>;

    /// Nearest chunks owned by `owner`, returned with their stored vectors.
    async fn search(
        &self,
        embedding: &Embedding,
        owner: &Tenant,
        limit: usize,
    ) -> Result<Vec<ScoredChunk>, VectorStoreError>;

    async fn delete_by_document(&self, document_id: DocumentId) -> Result<(), VectorStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum VectorStoreError {
    #[error("vector store unreachable: {0}")]
    Unreachable(String),
    #[error("vector store gate closed")]
    GateClosed,
    #[error("index setup failed: {0}")]
    IndexSetup(String),
    #[error("chunk upsert failed: {0}")]
    Upsert(String),
    #[error("similarity search failed: {0}")]
    Search(String),
    #[error("chunk deletion failed: {0}")]
    Delete(String),
}
