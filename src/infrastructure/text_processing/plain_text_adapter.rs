use crate::application::ports::FileLoaderError;

use super::composite_file_loader::TextExtractor;

/// UTF-8 text. A leading byte-order mark is dropped.
pub struct PlainTextAdapter;

impl TextExtractor for PlainTextAdapter {
    fn extract(&self, data: &[u8]) -> Result<String, FileLoaderError> {
        let data = data.strip_prefix("\u{feff}".as_bytes()).unwrap_or(data);
        String::from_utf8(data.to_vec())
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("not UTF-8 text: {e}")))
    }
}
