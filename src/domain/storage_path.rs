use std::fmt;

use uuid::Uuid;

const MAX_FILE_NAME_CHARS: usize = 100;

/// Key of a staged upload: `<uuid>/<file name>`. The file name is reduced to
/// `[A-Za-z0-9._-]` so the key never escapes its directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePath {
    key: String,
    name_start: usize,
}

impl StoragePath {
    pub fn staged(client_name: &str) -> Self {
        let mut name: String = client_name
            .chars()
            .map(|c| match c {
                'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' => c,
                _ => '_',
            })
            .take(MAX_FILE_NAME_CHARS)
            .collect();
        if name.trim_matches('.').is_empty() {
            name = "upload".to_string();
        } else if name.starts_with('.') {
            name.insert(0, '_');
        }

        let prefix = Uuid::new_v4().to_string();
        let name_start = prefix.len() + 1;
        Self {
            key: format!("{prefix}/{name}"),
            name_start,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    pub fn file_name(&self) -> &str {
        &self.key[self.name_start..]
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}
