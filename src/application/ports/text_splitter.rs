/// A run of document text starting `offset` characters into the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextWindow {
    pub offset: usize,
    pub text: String,
}

/// Cuts extracted text into windows small enough to embed one at a time.
/// Windows holding only whitespace are never produced.
pub trait TextSplitter: Send + Sync {
    fn split(&self, text: &str) -> Vec<TextWindow>;
}

#[derive(Debug, thiserror::Error)]
pub enum TextSplitterError {
    #[error("chunk size must be positive")]
    ZeroChunkSize,
    #[error("chunk overlap {overlap} must be smaller than chunk size {size}")]
    OverlapTooLarge { size: usize, overlap: usize },
}
