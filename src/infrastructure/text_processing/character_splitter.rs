use crate::application::ports::{TextSplitter, TextSplitterError, TextWindow};

/// Fixed-size character windows. Consecutive windows share `chunk_overlap` characters.
#[derive(Debug, Clone, Copy)]
pub struct CharacterSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl CharacterSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self, TextSplitterError> {
        if chunk_size == 0 {
            return Err(TextSplitterError::ZeroChunkSize);
        }
        if chunk_overlap >= chunk_size {
            return Err(TextSplitterError::OverlapTooLarge {
                size: chunk_size,
                overlap: chunk_overlap,
            });
        }

        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    fn stride(&self) -> usize {
        self.chunk_size - self.chunk_overlap
    }
}

impl TextSplitter for CharacterSplitter {
    fn split(&self, text: &str) -> Vec<TextWindow> {
        let chars: Vec<char> = text.chars().collect();

        (0..chars.len())
            .step_by(self.stride())
            .take_while(|&start| start == 0 || start + self.chunk_overlap < chars.len())
            .map(|start| {
                let end = (start + self.chunk_size).min(chars.len());
                TextWindow {
                    offset: start,
                    text: chars[start..end].iter().collect(),
                }
            })
            .filter(|window| !window.text.trim().is_empty())
            .collect()
    }
}
