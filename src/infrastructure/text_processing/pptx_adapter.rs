use crate::application::ports::FileLoaderError;

use super::composite_file_loader::TextExtractor;
use super::office_xml::{open_archive, read_part};

/// Presentations: slide text in slide order, slides separated by a blank line.
pub struct PptxAdapter;

fn slide_number(part_name: &str) -> Option<u32> {
    part_name
        .strip_prefix("ppt/slides/slide")?
        .strip_suffix(".xml")?
        .parse()
        .ok()
}

impl TextExtractor for PptxAdapter {
    fn extract(&self, data: &[u8]) -> Result<String, FileLoaderError> {
        let mut archive = open_archive(data)?;

        // `slide10.xml` sorts before `slide2.xml` by name.
        let mut slides: Vec<(u32, String)> = archive
            .file_names()
            .filter_map(|name| slide_number(name).map(|n| (n, name.to_string())))
            .collect();
        slides.sort_unstable_by_key(|(number, _)| *number);

        let mut texts = Vec::with_capacity(slides.len());
        for (_, name) in &slides {
            let text = read_part(&mut archive, name)?;
            if !text.trim().is_empty() {
                texts.push(text);
            }
        }
        Ok(texts.join("\n\n"))
    }
}
