use crate::application::ports::FileLoaderError;

use super::composite_file_loader::TextExtractor;
use super::office_xml::{open_archive, read_part};

/// Word documents: body paragraphs of `word/document.xml`, one per line.
pub struct DocxAdapter;

impl TextExtractor for DocxAdapter {
    fn extract(&self, data: &[u8]) -> Result<String, FileLoaderError> {
        read_part(&mut open_archive(data)?, "word/document.xml")
    }
}
