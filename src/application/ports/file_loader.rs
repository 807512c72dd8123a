use bytes::Bytes;

use crate::domain::Document;

/// Turns the bytes of an upload into clean plain text ready for splitting.
#[async_trait::async_trait]
pub trait FileLoader: Send + Sync {
    async fn load_text(&self, document: &Document, data: Bytes) -> Result<String, FileLoaderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FileLoaderError {
    #[error("no extractor for {0}")]
    UnsupportedContentType(String),
    #[error("could not read document: {0}")]
    ExtractionFailed(String),
    #[error("{0} contains no extractable text")]
    NoTextFound(String),
    #[error("extraction of {0} did not finish in time")]
    TimedOut(String),
}
