// Page text extraction backed by lopdf
use lopdf::Document;
use tracing::debug;

use super::lopdf_helper::{load_pdf, with_pdf};
use super::{PageSource, TextExtractor};
use crate::types::{ChonkError, Result, SourceDocument};

/// Default extractor: parses the document with lopdf and pulls text page by page.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfExtractor;

impl LopdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for LopdfExtractor {
    fn open(&self, document: &SourceDocument) -> Result<Box<dyn PageSource>> {
        let parsed = load_pdf(&document.bytes).map_err(|e| ChonkError::DocumentOpen {
            file_name: document.name.clone(),
            message: e.to_string(),
        })?;

        // lopdf keys pages by their 1-based number
        let page_numbers: Vec<u32> = parsed.get_pages().keys().copied().collect();
        debug!(file = %document.name, pages = page_numbers.len(), "opened PDF");

        Ok(Box::new(LopdfPages {
            document: parsed,
            page_numbers,
        }))
    }
}

struct LopdfPages {
    document: Document,
    page_numbers: Vec<u32>,
}

impl PageSource for LopdfPages {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn page_text(&self, page_number: u32) -> Result<String> {
        let index = (page_number as usize)
            .checked_sub(1)
            .ok_or_else(|| page_error(page_number, "page numbers start at 1"))?;
        let lopdf_page = *self
            .page_numbers
            .get(index)
            .ok_or_else(|| page_error(page_number, "page not found"))?;

        with_pdf(&self.document, |doc| doc.extract_text(&[lopdf_page]))
            .map_err(|e| page_error(page_number, &e.to_string()))
    }
}

fn page_error(page: u32, message: &str) -> ChonkError {
    ChonkError::PageExtraction {
        page,
        message: message.to_string(),
    }
}
