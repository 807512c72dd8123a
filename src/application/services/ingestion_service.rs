use std::sync::Arc;

use crate::application::ports::{
    DocumentRepository, Embedder, FileLoader, FileLoaderError, ModelError, RepositoryError,
    StagingStore, StagingStoreError, TextSplitter, VectorStore, VectorStoreError,
};
use crate::domain::{Chunk, ContentType, Document, DocumentId, StoragePath, Tenant};

/// An uploaded file already written to the staging store.
#[derive(Debug, Clone)]
pub struct StagedUpload {
    pub path: StoragePath,
    pub filename: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

pub struct IngestionService {
    file_loader: Arc<dyn FileLoader>,
    embedder: Arc<dyn Embedder>,
    vector_store: Arc<dyn VectorStore>,
    text_splitter: Arc<dyn TextSplitter>,
    documents: Arc<dyn DocumentRepository>,
    staging_store: Arc<dyn StagingStore>,
}

impl IngestionService {
    pub fn new(
        file_loader: Arc<dyn FileLoader>,
        embedder: Arc<dyn Embedder>,
        vector_store: Arc<dyn VectorStore>,
        text_splitter: Arc<dyn TextSplitter>,
        documents: Arc<dyn DocumentRepository>,
        staging_store: Arc<dyn StagingStore>,
    ) -> Self {
        Self {
            file_loader,
            embedder,
            vector_store,
            text_splitter,
            documents,
            staging_store,
        }
    }

    /// Ingests a staged upload. The staged file is deleted whether or not ingestion succeeds.
    #[tracing::instrument(skip(self, upload), fields(owner = %owner, filename = %upload.filename))]
    pub async fn ingest(
        &self,
        owner: &Tenant,
        upload: StagedUpload,
    ) -> Result<Document, IngestionError> {
        let result = self.ingest_staged(owner, &upload).await;
        self.discard(&upload.path).await;

        match &result {
            Ok(document) => tracing::info!(document_id = %document.id.as_uuid(), "Document ingested"),
            Err(e) => tracing::warn!(error = %e, "Document ingestion failed"),
        }

        result
    }

    /// Ingests uploads one after another, stopping at the first failure.
    /// Uploads never reached are still removed from staging.
    pub async fn ingest_all(
        &self,
        owner: &Tenant,
        uploads: Vec<StagedUpload>,
    ) -> Result<Vec<Document>, IngestionError> {
        let mut documents = Vec::with_capacity(uploads.len());
        let mut pending = uploads.into_iter();

        while let Some(upload) = pending.next() {
            match self.ingest(owner, upload).await {
                Ok(document) => documents.push(document),
                Err(e) => {
                    for skipped in pending {
                        self.discard(&skipped.path).await;
                    }
                    return Err(e);
                }
            }
        }

        Ok(documents)
    }

    pub async fn list_documents(&self, owner: &Tenant) -> Result<Vec<Document>, IngestionError> {
        Ok(self.documents.list_by_owner(owner).await?)
    }

    /// Removes a document record and every chunk indexed for it.
    #[tracing::instrument(skip(self), fields(owner = %owner, document_id = %id.as_uuid()))]
    pub async fn delete_document(
        &self,
        owner: &Tenant,
        id: DocumentId,
    ) -> Result<(), IngestionError> {
        if self.documents.find(id, owner).await?.is_none() {
            return Err(IngestionError::DocumentNotFound);
        }

        self.vector_store.delete_by_document(id).await?;
        self.documents.delete(id).await?;

        tracing::info!("Document deleted");
        Ok(())
    }

    async fn ingest_staged(
        &self,
        owner: &Tenant,
        upload: &StagedUpload,
    ) -> Result<Document, IngestionError> {
        let content_type = ContentType::from_mime(&upload.mime_type)
            .ok_or_else(|| IngestionError::UnsupportedContentType(upload.mime_type.clone()))?;

        let document = Document::new(
            upload.filename.clone(),
            content_type,
            owner.clone(),
            upload.size_bytes,
        );
        self.documents.create(&document).await?;

        let data = self.staging_store.read(&upload.path).await?;

        let text = self
            .file_loader
            .load_text(&document, data)
            .await
            .map_err(IngestionError::FileLoading)?;

        let chunks: Vec<Chunk> = self
            .text_splitter
            .split(&text)
            .into_iter()
            .map(|window| Chunk::new(window.text, document.id, owner.clone(), window.offset))
            .collect();

        if chunks.is_empty() {
            return Ok(document);
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self
            .embedder
            .embed_batch(&texts)
            .await
            .map_err(IngestionError::Embedding)?;

        self.vector_store
            .upsert(&chunks, &embeddings)
            .await
            .map_err(IngestionError::Storage)?;

        tracing::debug!(chunks = chunks.len(), "Chunks indexed");
        Ok(document)
    }

    async fn discard(&self, path: &StoragePath) {
        if let Err(e) = self.staging_store.discard(path).await {
            tracing::warn!(path = %path, error = %e, "Failed to remove staged upload");
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("unsupported file type: {0}")]
    UnsupportedContentType(String),
    #[error("document not found")]
    DocumentNotFound,
    #[error("file loading: {0}")]
    FileLoading(FileLoaderError),
    #[error("embedding: {0}")]
    Embedding(ModelError),
    #[error("storage: {0}")]
    Storage(#[from] VectorStoreError),
    #[error("staging: {0}")]
    Staging(#[from] StagingStoreError),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
}
