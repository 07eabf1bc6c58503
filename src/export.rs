// Result export - CSV, text log and JSON renderings of the same record list
use std::fs;
use std::path::Path;

use crate::types::{ChonkError, MatchRecord, Result};

pub const CSV_HEADER: [&str; 3] = ["file", "page", "sentence"];

/// Stable sort by file name, then page. Order within a page is kept.
pub fn sort_records(records: &mut [MatchRecord]) {
    records.sort_by(|a, b| {
        a.file_name
            .cmp(&b.file_name)
            .then(a.page_number.cmp(&b.page_number))
    });
}

pub fn to_csv(records: &[MatchRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for record in records {
        let page = record.page_number.to_string();
        writer.write_record([record.file_name.as_str(), page.as_str(), record.sentence.as_str()])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ChonkError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ChonkError::Export(e.to_string()))
}

/// Reads a file produced by [`to_csv`] back into records.
pub fn from_csv(text: &str) -> Result<Vec<MatchRecord>> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

pub fn to_log(records: &[MatchRecord]) -> String {
    records
        .iter()
        .map(|r| format!("File: {} | Page: {} | Sentence: {}\n", r.file_name, r.page_number, r.sentence))
        .collect()
}

pub fn to_json(records: &[MatchRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

pub fn write_csv(path: &Path, records: &[MatchRecord]) -> Result<()> {
    fs::write(path, to_csv(records)?)?;
    Ok(())
}

pub fn write_log(path: &Path, records: &[MatchRecord]) -> Result<()> {
    fs::write(path, to_log(records))?;
    Ok(())
}
