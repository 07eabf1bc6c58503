//! chonkgrep: find every sentence in a set of PDFs that mentions a keyword,
//! with file and page provenance, and export the hits as CSV or a text log.
pub mod config;
pub mod display;
pub mod export;
pub mod matcher;
pub mod pdf_extraction;
pub mod scan;
pub mod sources;
pub mod types;

pub use matcher::{find_matches, SentenceMatcher};
pub use pdf_extraction::{LopdfExtractor, PageSource, TextExtractor};
pub use scan::{scan, CancelFlag, Progress, ScanReport};
pub use types::{ChonkError, DocumentError, MatchRecord, ScanRequest, SourceDocument};
