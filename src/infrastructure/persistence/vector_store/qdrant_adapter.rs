use std::collections::HashMap;

use async_trait::async_trait;
use qdrant_client::qdrant::point_id::PointIdOptions;
use qdrant_client::qdrant::vectors_output::VectorsOptions;
use qdrant_client::qdrant::{
    Condition, CreateCollectionBuilder, CreateFieldIndexCollectionBuilder, DeletePointsBuilder,
    Distance, FieldType, Filter, PointStruct, ScoredPoint, SearchPointsBuilder,
    UpsertPointsBuilder, Value, VectorParamsBuilder, VectorsOutput,
};
use qdrant_client::Qdrant;
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use super::ConnectionGate;
use crate::application::ports::{
    FilteredField, IndexLayout, ScoredChunk, VectorStore, VectorStoreError,
};
use crate::domain::{Chunk, ChunkId, DocumentId, Embedding, Tenant};

/// Chunk store on a single Qdrant collection. Every chunk is a point whose
/// payload carries its text, owner and source document, so tenant scoping and
/// document deletion are plain payload filters.
pub struct QdrantAdapter {
    client: Qdrant,
    collection: String,
    gate: ConnectionGate,
}

impl QdrantAdapter {
    pub fn new(
        url: &str,
        api_key: Option<String>,
        collection: String,
        gate: ConnectionGate,
    ) -> Result<Self, VectorStoreError> {
        let client = Qdrant::from_url(url)
            .api_key(api_key)
            .build()
            .map_err(|e| VectorStoreError::Unreachable(e.to_string()))?;
        Ok(Self {
            client,
            collection,
            gate,
        })
    }

    pub fn gate(&self) -> &ConnectionGate {
        &self.gate
    }

    async fn collection_present(&self) -> Result<bool, VectorStoreError> {
        self.client
            .collection_exists(&self.collection)
            .await
            .map_err(|e| VectorStoreError::Unreachable(e.to_string()))
    }
}

fn field_equals(field: FilteredField, value: String) -> Filter {
    Filter::must([Condition::matches(field.key(), value)])
}

fn chunk_point(chunk: &Chunk, embedding: &Embedding) -> PointStruct {
    let payload: HashMap<String, serde_json::Value> = HashMap::from([
        (
            FilteredField::DocumentId.key().to_string(),
            json!(chunk.document_id.to_string()),
        ),
        (
            FilteredField::OwnerEmail.key().to_string(),
            json!(chunk.owner.as_str()),
        ),
        ("text".to_string(), json!(chunk.text)),
        ("offset".to_string(), json!(chunk.offset)),
    ]);
    PointStruct::new(chunk.id.to_string(), embedding.values.clone(), payload)
}

fn text_field(payload: &HashMap<String, Value>, key: &str) -> Option<String> {
    payload.get(key)?.as_str().map(|s| s.to_string())
}

/// Points written by another tool, or missing any payload field, are skipped.
fn scored_chunk(point: ScoredPoint) -> Option<ScoredChunk> {
    let chunk_id = match point.id?.point_id_options? {
        PointIdOptions::Uuid(raw) => Uuid::parse_str(&raw).ok()?,
        PointIdOptions::Num(_) => return None,
    };
    let payload = &point.payload;
    let document_id: DocumentId = text_field(payload, FilteredField::DocumentId.key())?
        .parse()
        .ok()?;
    let owner = Tenant::new(text_field(payload, FilteredField::OwnerEmail.key())?);
    let text = text_field(payload, "text")?;
    let offset = payload
        .get("offset")
        .and_then(Value::as_integer)
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0);

    Some(ScoredChunk {
        chunk: Chunk {
            id: ChunkId::from_uuid(chunk_id),
            text,
            document_id,
            owner,
            offset,
        },
        score: point.score,
        embedding: dense_vector(point.vectors),
    })
}

#[allow(deprecated)]
fn dense_vector(vectors: Option<VectorsOutput>) -> Option<Embedding> {
    match vectors?.vectors_options? {
        VectorsOptions::Vector(vector) => Some(Embedding::new(vector.data)),
        VectorsOptions::Vectors(_) => None,
    }
}

#[async_trait]
impl VectorStore for QdrantAdapter {
    #[instrument(skip(self, layout), fields(collection = %self.collection, dims = layout.dimensions))]
    async fn ensure_index(&self, layout: &IndexLayout) -> Result<bool, VectorStoreError> {
        let _lease = self.gate.acquire().await?;
        if self.collection_present().await? {
            tracing::info!("Collection already present");
            return Ok(false);
        }

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection)
                    .vectors_config(VectorParamsBuilder::new(layout.dimensions, Distance::Cosine)),
            )
            .await
            .map_err(|e| VectorStoreError::IndexSetup(e.to_string()))?;

        for field in &layout.filtered_fields {
            self.client
                .create_field_index(CreateFieldIndexCollectionBuilder::new(
                    &self.collection,
                    field.key(),
                    FieldType::Keyword,
                ))
                .await
                .map_err(|e| {
                    VectorStoreError::IndexSetup(format!("keyword index on {}: {e}", field.key()))
                })?;
        }

        tracing::info!(indexed_fields = layout.filtered_fields.len(), "Collection created");
        Ok(true)
    }

    async fn index_exists(&self) -> Result<bool, VectorStoreError> {
        let _lease = self.gate.acquire().await?;
        self.collection_present().await
    }

    #[instrument(skip_all, fields(collection = %self.collection, points = chunks.len()))]
    async fn upsert(&self, chunks: &[Chunk], embeddings: &[Embedding]) -> Result<(), VectorStoreError> {
        if chunks.len() != embeddings.len() {
            return Err(VectorStoreError::Upsert(format!(
                "{} chunks but {} embeddings",
                chunks.len(),
                embeddings.len()
            )));
        }
        let points = chunks
            .iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| chunk_point(chunk, embedding))
            .collect::<Vec<_>>();

        let _lease = self.gate.acquire().await?;
        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, points).wait(true))
            .await
            .map_err(|e| VectorStoreError::Upsert(e.to_string()))?;
        Ok(())
    }

    #[instrument(skip(self, embedding), fields(collection = %self.collection, owner = %owner))]
    async fn search(
        &self,
        embedding: &Embedding,
        owner: &Tenant,
        limit: usize,
    ) -> Result<Vec<ScoredChunk>, VectorStoreError> {
        let request = SearchPointsBuilder::new(&self.collection, embedding.values.clone(), limit as u64)
            .filter(field_equals(FilteredField::OwnerEmail, owner.as_str().to_string()))
            .with_payload(true)
            .with_vectors(true);

        let _lease = self.gate.acquire().await?;
        let response = self
            .client
            .search_points(request)
            .await
            .map_err(|e| VectorStoreError::Search(e.to_string()))?;

        let hits: Vec<ScoredChunk> = response.result.into_iter().filter_map(scored_chunk).collect();
        tracing::debug!(hits = hits.len(), "Search finished");
        Ok(hits)
    }

    #[instrument(skip(self), fields(collection = %self.collection))]
    async fn delete_by_document(&self, document_id: DocumentId) -> Result<(), VectorStoreError> {
        let request = DeletePointsBuilder::new(&self.collection)
            .points(field_equals(FilteredField::DocumentId, document_id.to_string()))
            .wait(true);

        let _lease = self.gate.acquire().await?;
        self.client
            .delete_points(request)
            .await
            .map_err(|e| VectorStoreError::Delete(e.to_string()))?;
        Ok(())
    }
}
