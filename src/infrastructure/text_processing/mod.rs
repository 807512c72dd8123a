mod character_splitter;
mod composite_file_loader;
mod docx_adapter;
mod office_xml;
mod pdf_adapter;
mod plain_text_adapter;
mod pptx_adapter;
mod text_sanitizer;

pub use character_splitter::CharacterSplitter;
pub use composite_file_loader::{CompositeFileLoader, TextExtractor};
pub use docx_adapter::DocxAdapter;
pub use pdf_adapter::PdfAdapter;
pub use plain_text_adapter::PlainTextAdapter;
pub use pptx_adapter::PptxAdapter;
pub use text_sanitizer::sanitize_extracted_text;
