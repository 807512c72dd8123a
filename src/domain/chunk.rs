use super::{ChunkId, DocumentId, Tenant};

/// A window of document text as stored in the vector index. `offset` is the
/// character position of the window inside the sanitized document text.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub id: ChunkId,
    pub text: String,
    pub document_id: DocumentId,
    pub owner: Tenant,
    pub offset: usize,
}

impl Chunk {
    pub fn new(text: String, document_id: DocumentId, owner: Tenant, offset: usize) -> Self {
        Self {
            id: ChunkId::new(),
            text,
            document_id,
            owner,
            offset,
        }
    }
}
