// Terminal rendering of scan results
use crossterm::style::{style, Stylize};

use crate::matcher::SentenceMatcher;
use crate::scan::{Progress, ScanReport};
use crate::types::MatchRecord;

/// Summary table: file, page, sentence.
pub fn render_table(records: &[MatchRecord]) -> String {
    let file_width = records
        .iter()
        .map(|r| r.file_name.chars().count())
        .max()
        .unwrap_or(0)
        .max("FILE".len());
    let page_width = records
        .iter()
        .map(|r| r.page_number.to_string().len())
        .max()
        .unwrap_or(0)
        .max("PAGE".len());

    let mut out = format!("{:<file_width$}  {:>page_width$}  SENTENCE\n", "FILE", "PAGE");
    out.push_str(&format!("{}  {}  {}\n", "─".repeat(file_width), "─".repeat(page_width), "─".repeat(8)));
    for r in records {
        out.push_str(&format!(
            "{:<file_width$}  {:>page_width$}  {}\n",
            r.file_name, r.page_number, r.sentence
        ));
    }
    out
}

/// Per-match view with the keyword emphasized: ANSI bold when `styled`, `**` otherwise.
pub fn render_context(records: &[MatchRecord], matcher: &SentenceMatcher, styled: bool) -> String {
    let mut out = String::new();
    for r in records {
        out.push_str(&format!("File: {} • Page: {}\n", r.file_name, r.page_number));
        let sentence = if styled {
            matcher.highlight_with(&r.sentence, |hit| style(hit).bold().to_string())
        } else {
            matcher.highlight(&r.sentence, "**", "**")
        };
        out.push_str(&sentence);
        out.push_str("\n---\n");
    }
    out
}

/// One-line outcome: match count, or the distinct "no results" message.
pub fn render_summary(report: &ScanReport, keyword: &str) -> String {
    let mut line = if report.is_empty() {
        format!("⚠️  No results found for keyword '{}'.", keyword)
    } else {
        let n = report.records.len();
        format!("✅ {} {} found.", n, if n == 1 { "match" } else { "matches" })
    };
    if report.cancelled {
        line.push_str(" (scan cancelled, results are partial)");
    }
    line
}

pub fn render_progress(progress: &Progress) -> String {
    format!(
        "Scanning: {}/{} ({:.0}%) {}",
        progress.completed,
        progress.total,
        progress.fraction() * 100.0,
        progress.file_name
    )
}
