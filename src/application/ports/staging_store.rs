use std::io;

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::domain::StoragePath;

/// Body of an upload as it arrives from the client.
pub type ByteStream<'a> = BoxStream<'a, Result<Bytes, io::Error>>;

/// Holds uploaded files between the multipart request and ingestion.
#[async_trait::async_trait]
pub trait StagingStore: Send + Sync {
    /// Writes the whole stream and returns its length in bytes. When the stream
    /// fails midway nothing is left at `path`.
    async fn stage(&self, path: &StoragePath, body: ByteStream<'_>) -> Result<u64, StagingStoreError>;

    async fn read(&self, path: &StoragePath) -> Result<Bytes, StagingStoreError>;

    /// Removing a path that is not staged succeeds.
    async fn discard(&self, path: &StoragePath) -> Result<(), StagingStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StagingStoreError {
    #[error("nothing staged at {0}")]
    NotFound(String),
    #[error("upload body failed: {0}")]
    Stream(#[from] io::Error),
    #[error("staging backend error: {0}")]
    Backend(String),
}
