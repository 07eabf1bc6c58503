// PDF extraction module
pub mod basic;
pub mod lopdf_helper;

pub use basic::LopdfExtractor;

use crate::types::{Result, SourceDocument};

/// Turns a document into per-page plain text.
pub trait TextExtractor {
    /// Fails with `ChonkError::DocumentOpen` when the document cannot be parsed at all.
    fn open(&self, document: &SourceDocument) -> Result<Box<dyn PageSource>>;
}

/// An opened document. Pages are numbered from 1.
pub trait PageSource {
    fn page_count(&self) -> usize;

    /// Best-effort text for one page. Callers treat an error as an empty page.
    fn page_text(&self, page_number: u32) -> Result<String>;
}
