use std::io::{BufRead, Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipArchive;

use crate::application::ports::FileLoaderError;

/// Collects the text runs (`<w:t>`, `<a:t>`) of an OOXML part, one line per paragraph.
pub(super) fn paragraph_text<R: BufRead>(source: R) -> Result<String, FileLoaderError> {
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut in_run = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"t" => in_run = true,
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"t" => in_run = false,
                b"p" => push_line_break(&mut text),
                _ => {}
            },
            Ok(Event::Empty(ref e)) if e.local_name().as_ref() == b"p" => {
                push_line_break(&mut text)
            }
            Ok(Event::Text(ref e)) if in_run => {
                let run = e
                    .unescape()
                    .map_err(|e| FileLoaderError::ExtractionFailed(format!("xml text: {e}")))?;
                text.push_str(&run);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(FileLoaderError::ExtractionFailed(format!(
                    "malformed xml at {}: {e}",
                    reader.buffer_position()
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}

pub(super) fn open_archive(data: &[u8]) -> Result<ZipArchive<Cursor<&[u8]>>, FileLoaderError> {
    ZipArchive::new(Cursor::new(data))
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("not a zip archive: {e}")))
}

pub(super) fn read_part(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    name: &str,
) -> Result<String, FileLoaderError> {
    let mut entry = archive
        .by_name(name)
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("missing {name}: {e}")))?;

    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("reading {name}: {e}")))?;

    paragraph_text(xml.as_bytes())
}

fn push_line_break(text: &mut String) {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
}
