// Input collection - turns CLI paths into loaded documents
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::types::{DocumentError, SourceDocument};

/// Documents read from the command line paths, plus the files that could not be read.
#[derive(Debug, Default)]
pub struct Inputs {
    pub documents: Vec<SourceDocument>,
    /// Each read failure with the number of documents that precede it.
    pub errors: Vec<(usize, DocumentError)>,
}

impl Inputs {
    /// Documents plus read failures.
    pub fn len(&self) -> usize {
        self.documents.len() + self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Expands directories to their `*.pdf` files (not recursive, sorted by name)
/// and reads every file. Unreadable files become errors instead of aborting.
pub fn collect_documents(paths: &[PathBuf]) -> Inputs {
    let mut documents = Vec::new();
    let mut errors = Vec::new();

    for path in paths {
        let files = if path.is_dir() {
            match find_pdfs_in_dir(path) {
                Ok(files) => files,
                Err(e) => {
                    errors.push((documents.len(), read_error(path, &e)));
                    continue;
                }
            }
        } else {
            vec![path.clone()]
        };

        for file in files {
            match SourceDocument::from_path(&file) {
                Ok(doc) => {
                    debug!(file = %file.display(), bytes = doc.bytes.len(), "loaded");
                    documents.push(doc);
                }
                Err(e) => {
                    warn!("cannot read {}: {}", file.display(), e);
                    errors.push((documents.len(), read_error(&file, &e)));
                }
            }
        }
    }

    Inputs { documents, errors }
}

/// Interleaves read failures with the failures reported by the scan so that
/// every error appears at its input position. `scan_errors` must follow the
/// order of `document_names`.
pub fn merge_errors(
    document_names: &[String],
    load_errors: Vec<(usize, DocumentError)>,
    scan_errors: Vec<DocumentError>,
) -> Vec<DocumentError> {
    let mut merged = Vec::with_capacity(load_errors.len() + scan_errors.len());
    let mut load = load_errors.into_iter().peekable();
    let mut scanned = scan_errors.into_iter().peekable();

    for (idx, name) in document_names.iter().enumerate() {
        while let Some((_, err)) = load.next_if(|(before, _)| *before <= idx) {
            merged.push(err);
        }
        if let Some(err) = scanned.next_if(|err| &err.file_name == name) {
            merged.push(err);
        }
    }
    merged.extend(load.map(|(_, err)| err));
    merged.extend(scanned);
    merged
}

fn find_pdfs_in_dir(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && is_pdf(p))
        .collect();
    files.sort();
    Ok(files)
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

fn read_error(path: &Path, err: &std::io::Error) -> DocumentError {
    DocumentError {
        file_name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
        message: err.to_string(),
    }
}
