use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

use super::text_sanitizer::sanitize_extracted_text;
use super::{DocxAdapter, PdfAdapter, PlainTextAdapter, PptxAdapter};

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking text extraction for one file format. Output is raw; the loader
/// sanitizes it afterwards.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, data: &[u8]) -> Result<String, FileLoaderError>;
}

/// Picks the extractor registered for a document's content type and runs it
/// on the blocking pool under a deadline.
pub struct CompositeFileLoader {
    extractors: HashMap<ContentType, Arc<dyn TextExtractor>>,
    timeout: Duration,
}

impl CompositeFileLoader {
    pub fn new(extractors: Vec<(ContentType, Arc<dyn TextExtractor>)>) -> Self {
        Self {
            extractors: extractors.into_iter().collect(),
            timeout: EXTRACTION_TIMEOUT,
        }
    }

    pub fn with_default_loaders() -> Self {
        Self::new(vec![
            (ContentType::Text, Arc::new(PlainTextAdapter)),
            (ContentType::Pdf, Arc::new(PdfAdapter)),
            (ContentType::Docx, Arc::new(DocxAdapter)),
            (ContentType::Pptx, Arc::new(PptxAdapter)),
        ])
    }

    pub fn supports(&self, content_type: ContentType) -> bool {
        self.extractors.contains_key(&content_type)
    }
}

#[async_trait::async_trait]
impl FileLoader for CompositeFileLoader {
    #[tracing::instrument(
        skip(self, document, data),
        fields(document_id = %document.id, content_type = document.content_type.as_mime())
    )]
    async fn load_text(&self, document: &Document, data: Bytes) -> Result<String, FileLoaderError> {
        let extractor = self
            .extractors
            .get(&document.content_type)
            .cloned()
            .ok_or_else(|| {
                FileLoaderError::UnsupportedContentType(document.content_type.as_mime().to_string())
            })?;

        // A panicking parser surfaces here as a join error.
        let job = tokio::task::spawn_blocking(move || extractor.extract(&data));
        let raw = tokio::time::timeout(self.timeout, job)
            .await
            .map_err(|_| FileLoaderError::TimedOut(document.name.clone()))?
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("extractor aborted: {e}")))??;

        let text = sanitize_extracted_text(&raw);
        if text.is_empty() {
            return Err(FileLoaderError::NoTextFound(document.name.clone()));
        }
        tracing::info!(chars = text.chars().count(), "Text extracted");
        Ok(text)
    }
}
