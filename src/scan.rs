// Scan orchestration - walks documents and pages, collects keyword hits
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::matcher::SentenceMatcher;
use crate::pdf_extraction::TextExtractor;
use crate::types::{ChonkError, DocumentError, MatchRecord, ScanRequest, SourceDocument};

/// Cooperative stop signal, checked between documents and between pages.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Sent to the observer after each document.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub file_name: String,
}

impl Progress {
    pub fn fraction(&self) -> f64 {
        self.completed as f64 / self.total.max(1) as f64
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanReport {
    pub records: Vec<MatchRecord>,
    pub errors: Vec<DocumentError>,
    pub documents_scanned: usize,
    pub pages_scanned: usize,
    pub cancelled: bool,
}

impl ScanReport {
    /// No matches. Not the same thing as a failure.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Runs `request` against `documents` in order.
///
/// A document that fails to open is recorded in `ScanReport::errors` and
/// skipped. A page that fails to extract counts as an empty page. The scan
/// itself never fails.
pub fn scan<E, F>(
    documents: &[SourceDocument],
    request: &ScanRequest,
    extractor: &E,
    cancel: &CancelFlag,
    mut on_progress: F,
) -> ScanReport
where
    E: TextExtractor + ?Sized,
    F: FnMut(&Progress),
{
    let matcher = SentenceMatcher::new(
        request.keyword(),
        request.max_fragment_length(),
        request.case_sensitive(),
    );
    let mut report = ScanReport::default();
    let total = documents.len();

    for (idx, document) in documents.iter().enumerate() {
        if cancel.is_cancelled() {
            info!("scan cancelled after {} of {} documents", idx, total);
            report.cancelled = true;
            break;
        }

        let start = Instant::now();
        let hits = scan_document(document, &matcher, extractor, cancel, &mut report);
        debug!(file = %document.name, hits, elapsed = ?start.elapsed(), "document scanned");

        on_progress(&Progress {
            completed: idx + 1,
            total,
            file_name: document.name.clone(),
        });
    }

    // a cancel landing mid-document is still a cancelled scan
    if cancel.is_cancelled() {
        report.cancelled = true;
    }
    report
}

fn scan_document<E>(
    document: &SourceDocument,
    matcher: &SentenceMatcher,
    extractor: &E,
    cancel: &CancelFlag,
    report: &mut ScanReport,
) -> usize
where
    E: TextExtractor + ?Sized,
{
    let pages = match extractor.open(document) {
        Ok(pages) => pages,
        Err(err) => {
            let message = match err {
                ChonkError::DocumentOpen { message, .. } => message,
                other => other.to_string(),
            };
            warn!("'{}' could not be read: {}", document.name, message);
            report.errors.push(DocumentError {
                file_name: document.name.clone(),
                message,
            });
            return 0;
        }
    };
    report.documents_scanned += 1;

    let mut hits = 0;
    for page_number in (1..).take(pages.page_count()) {
        if cancel.is_cancelled() {
            break;
        }
        report.pages_scanned += 1;

        let text = pages.page_text(page_number).unwrap_or_else(|err| {
            debug!(file = %document.name, "treating page as empty: {err}");
            String::new()
        });
        if text.is_empty() {
            continue;
        }

        for sentence in matcher.find_matches(&text) {
            report
                .records
                .push(MatchRecord::new(document.name.as_str(), page_number, sentence));
            hits += 1;
        }
    }
    hits
}
