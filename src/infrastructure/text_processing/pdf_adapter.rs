use crate::application::ports::FileLoaderError;

use super::composite_file_loader::TextExtractor;

pub struct PdfAdapter;

impl TextExtractor for PdfAdapter {
    fn extract(&self, data: &[u8]) -> Result<String, FileLoaderError> {
        pdf_extract::extract_text_from_mem(data)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to parse PDF: {e}")))
    }
}
