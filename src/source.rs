use std::path::{Path, PathBuf};

use crate::error::LexiconError;
use crate::traits::DatasetSource;

/// Reads the dataset from a UTF-8 file on every fetch.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for FileSource {
    fn fetch(&self) -> Result<String, LexiconError> {
        std::fs::read_to_string(&self.path).map_err(|source| LexiconError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Dataset text held in memory.
#[derive(Debug, Clone)]
pub struct TextSource {
    text: String,
}

impl TextSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl DatasetSource for TextSource {
    fn fetch(&self) -> Result<String, LexiconError> {
        Ok(self.text.clone())
    }

    fn describe(&self) -> String {
        format!("<{} bytes in memory>", self.text.len())
    }
}
