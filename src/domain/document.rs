use chrono::{DateTime, Utc};

use super::{DocumentId, Tenant};

/// Metadata of an uploaded document. The text itself only lives in the vector index.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub name: String,
    pub content_type: ContentType,
    pub owner: Tenant,
    pub size_bytes: u64,
    pub created_at: DateTime<Utc>,
}

/// Upload formats the ingestion pipeline can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Pdf,
    Text,
    Docx,
    Pptx,
}

const MIME_TABLE: [(ContentType, &str); 4] = [
    (ContentType::Pdf, "application/pdf"),
    (ContentType::Text, "text/plain"),
    (
        ContentType::Docx,
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    (
        ContentType::Pptx,
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ),
];

impl ContentType {
    /// Matches the essence of a MIME type, so `text/plain; charset=utf-8` is text.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        MIME_TABLE
            .iter()
            .find(|(_, known)| known.eq_ignore_ascii_case(essence))
            .map(|(content_type, _)| *content_type)
    }

    pub fn as_mime(&self) -> &'static str {
        MIME_TABLE
            .iter()
            .find(|(content_type, _)| content_type == self)
            .map(|(_, mime)| *mime)
            .unwrap_or("application/octet-stream")
    }
}

impl Document {
    pub fn new(name: String, content_type: ContentType, owner: Tenant, size_bytes: u64) -> Self {
        Self {
            id: DocumentId::new(),
            name,
            content_type,
            owner,
            size_bytes,
            created_at: Utc::now(),
        }
    }
}
