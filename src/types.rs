// Core types for chonkgrep
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One keyword hit: the fragment plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(rename = "file")]
    pub file_name: String,
    #[serde(rename = "page")]
    pub page_number: u32,
    pub sentence: String,
}

impl MatchRecord {
    pub fn new(file_name: impl Into<String>, page_number: u32, sentence: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            page_number,
            sentence: sentence.into(),
        }
    }
}

/// Parameters for a single scan. Built fresh per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    keyword: String,
    case_sensitive: bool,
    max_fragment_length: usize,
}

impl ScanRequest {
    pub fn new(keyword: impl Into<String>, case_sensitive: bool, max_fragment_length: usize) -> Result<Self> {
        let keyword = keyword.into();
        if keyword.is_empty() {
            return Err(ChonkError::InvalidRequest("keyword must not be empty".into()));
        }
        if max_fragment_length == 0 {
            return Err(ChonkError::InvalidRequest(
                "maximum fragment length must be greater than zero".into(),
            ));
        }
        Ok(Self {
            keyword,
            case_sensitive,
            max_fragment_length,
        })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn max_fragment_length(&self) -> usize {
        self.max_fragment_length
    }
}

/// A document handle: raw bytes plus the name shown in results.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceDocument {
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Reads the whole file. The display name is the file name without its directory.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, bytes })
    }
}

/// A document that could not be opened at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentError {
    pub file_name: String,
    pub message: String,
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' could not be read: {}", self.file_name, self.message)
    }
}

// Error types
#[derive(Debug, thiserror::Error)]
pub enum ChonkError {
    #[error("failed to open '{file_name}': {message}")]
    DocumentOpen { file_name: String, message: String },

    #[error("page {page}: {message}")]
    PageExtraction { page: u32, message: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("export error: {0}")]
    Export(String),
}

impl From<csv::Error> for ChonkError {
    fn from(err: csv::Error) -> Self {
        ChonkError::Export(err.to_string())
    }
}

impl From<serde_json::Error> for ChonkError {
    fn from(err: serde_json::Error) -> Self {
        ChonkError::Export(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ChonkError>;
