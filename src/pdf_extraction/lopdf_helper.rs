// lopdf helper - Pure Rust PDF operations
use lopdf::Document;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    #[error(transparent)]
    Lopdf(#[from] lopdf::Error),

    #[error("PDF parser panicked: {0}")]
    Panicked(String),
}

thread_local! {
    static INSIDE_PARSER: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

/// Parse a PDF held in memory.
///
/// lopdf occasionally panics on malformed cross-reference tables, so the
/// parse is isolated and a panic comes back as [`PdfError::Panicked`].
pub fn load_pdf(bytes: &[u8]) -> Result<Document, PdfError> {
    isolated(|| Document::load_mem(bytes))
}

/// Execute an operation with a PDF document, with the same panic isolation as [`load_pdf`].
pub fn with_pdf<F, R>(document: &Document, f: F) -> Result<R, PdfError>
where
    F: FnOnce(&Document) -> Result<R, lopdf::Error>,
{
    isolated(|| f(document))
}

fn isolated<F, R>(f: F) -> Result<R, PdfError>
where
    F: FnOnce() -> Result<R, lopdf::Error>,
{
    install_quiet_hook();
    INSIDE_PARSER.with(|flag| flag.set(true));
    let outcome = panic::catch_unwind(AssertUnwindSafe(f));
    INSIDE_PARSER.with(|flag| flag.set(false));

    match outcome {
        Ok(result) => result.map_err(PdfError::from),
        Err(payload) => Err(PdfError::Panicked(panic_message(payload))),
    }
}

// Panics caught by `isolated` are reported as errors; only those skip the
// default "thread panicked" message. Other threads keep the previous hook.
fn install_quiet_hook() {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !INSIDE_PARSER.with(|flag| flag.get()) {
                previous(info);
            }
        }));
    });
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown cause".to_string()
    }
}
