//! Sentence matching: split page text into sentence fragments and keep the
//! ones that mention the keyword.
//!
//! Page text is cut at blank lines, whitespace is collapsed, and each
//! paragraph is split after `.`, `!` or `?`. Sentences longer than the
//! configured limit are split again after `;`, `:`, `—` or `-`. A sentence
//! that cannot be split further is kept whole.
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use tracing::debug;

static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]\s+").unwrap());
static CLAUSE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[;:\u{2014}\-]\s+").unwrap());

// Compiled keyword patterns above this size fall back to plain containment.
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// Keyword search configured once per scan and reused for every page.
#[derive(Debug, Clone)]
pub struct SentenceMatcher {
    keyword: String,
    max_length: usize,
    pattern: Option<Regex>,
}

impl SentenceMatcher {
    pub fn new(keyword: &str, max_length: usize, case_sensitive: bool) -> Self {
        let pattern = RegexBuilder::new(&regex::escape(keyword))
            .case_insensitive(!case_sensitive)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build();

        let pattern = match pattern {
            Ok(re) => Some(re),
            Err(e) => {
                debug!("keyword pattern unavailable, using plain containment: {e}");
                None
            }
        };

        Self {
            keyword: keyword.to_string(),
            max_length,
            pattern,
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Every fragment of `text` that contains the keyword, trimmed, in page order.
    pub fn find_matches(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut matches = Vec::new();
        for paragraph in PARAGRAPH_BREAK.split(text) {
            let normalized = WHITESPACE.replace_all(paragraph, " ");
            for sentence in split_after(&normalized, &SENTENCE_END) {
                for candidate in self.candidates(sentence) {
                    let trimmed = candidate.trim();
                    if !trimmed.is_empty() && self.contains_keyword(trimmed) {
                        matches.push(trimmed.to_string());
                    }
                }
            }
        }
        matches
    }

    /// Wraps each keyword occurrence in `open`/`close`.
    pub fn highlight(&self, sentence: &str, open: &str, close: &str) -> String {
        self.highlight_with(sentence, |hit| format!("{open}{hit}{close}"))
    }

    /// Replaces each keyword occurrence with `style(occurrence)`.
    pub fn highlight_with<F>(&self, sentence: &str, mut style: F) -> String
    where
        F: FnMut(&str) -> String,
    {
        match &self.pattern {
            Some(re) => re
                .replace_all(sentence, |caps: &regex::Captures<'_>| style(&caps[0]))
                .into_owned(),
            None => sentence.replace(&self.keyword, &style(&self.keyword)),
        }
    }

    fn candidates<'a>(&self, sentence: &'a str) -> Vec<&'a str> {
        if sentence.chars().count() <= self.max_length {
            return vec![sentence];
        }
        let pieces = split_after(sentence, &CLAUSE_BREAK);
        if pieces.len() > 1 {
            pieces
        } else {
            vec![sentence]
        }
    }

    fn contains_keyword(&self, candidate: &str) -> bool {
        match &self.pattern {
            Some(re) => re.is_match(candidate),
            None => candidate.to_lowercase().contains(&self.keyword.to_lowercase()),
        }
    }
}

/// One-shot form of [`SentenceMatcher::find_matches`].
pub fn find_matches(text: &str, keyword: &str, max_length: usize, case_sensitive: bool) -> Vec<String> {
    SentenceMatcher::new(keyword, max_length, case_sensitive).find_matches(text)
}

// Split after the first character of each boundary match; the trailing
// whitespace is dropped, the punctuation stays with the left piece.
fn split_after<'a>(text: &'a str, boundary: &Regex) -> Vec<&'a str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for m in boundary.find_iter(text) {
        let punct_len = text[m.start()..].chars().next().map_or(0, char::len_utf8);
        pieces.push(&text[start..m.start() + punct_len]);
        start = m.end();
    }
    pieces.push(&text[start..]);
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_no_matches() {
        assert!(find_matches("", "mosfet", 500, false).is_empty());
    }

    #[test]
    fn case_insensitive_by_default() {
        assert_eq!(
            find_matches("The MOSFET is fast.", "mosfet", 500, false),
            vec!["The MOSFET is fast."]
        );
    }

    #[test]
    fn case_sensitive_rejects_other_case() {
        assert!(find_matches("The MOSFET is fast.", "mosfet", 500, true).is_empty());
        assert_eq!(
            find_matches("The MOSFET is fast.", "MOSFET", 500, true),
            vec!["The MOSFET is fast."]
        );
    }

    #[test]
    fn blank_line_ends_a_sentence() {
        assert_eq!(
            find_matches("Line1\n\nLine2 mosfet.", "mosfet", 500, false),
            vec!["Line2 mosfet."]
        );
    }

    #[test]
    fn single_newlines_collapse_to_spaces() {
        assert_eq!(
            find_matches("The gate\ndrives the\n  mosfet hard.", "mosfet", 500, false),
            vec!["The gate drives the mosfet hard."]
        );
    }

    #[test]
    fn splits_after_terminal_punctuation() {
        let text = "First line mentions ISO 9001. Second does not! Does ISO 9001 apply? Yes.";
        assert_eq!(
            find_matches(text, "iso 9001", 500, false),
            vec!["First line mentions ISO 9001.", "Does ISO 9001 apply?"]
        );
    }

    #[test]
    fn keyword_is_literal_not_a_pattern() {
        let text = "Use a.b here. Use axb there.";
        assert_eq!(find_matches(text, "a.b", 500, false), vec!["Use a.b here."]);
        assert_eq!(find_matches("nothing (here", "(", 500, false), vec!["nothing (here"]);
    }

    #[test]
    fn duplicates_are_kept() {
        let text = "Quality matters. Quality matters.";
        assert_eq!(find_matches(text, "quality", 500, false).len(), 2);
    }

    #[test]
    fn no_punctuation_means_one_candidate() {
        let text = "a page of text with no full stop mentioning kalite somewhere";
        assert_eq!(find_matches(text, "kalite", 500, false), vec![text]);
    }

    #[test]
    fn long_sentence_splits_on_semicolon() {
        let left = format!("{}mosfet;", "word ".repeat(59));
        let right = format!("{}gate", "item ".repeat(59));
        let text = format!("{left} {right}");
        assert!(text.chars().count() > 500);

        assert_eq!(find_matches(&text, "mosfet", 500, false), vec![left.clone()]);
        assert_eq!(find_matches(&text, "gate", 500, false), vec![right]);
        // under the limit the sentence stays whole
        assert_eq!(find_matches(&text, "mosfet", 1000, false), vec![text.clone()]);
    }

    #[test]
    fn oversized_sentence_without_clause_breaks_is_kept_whole() {
        let text = format!("{} mosfet", "a".repeat(900));
        let found = find_matches(&text, "mosfet", 100, false);
        assert_eq!(found, vec![text.clone()]);
        assert!(found[0].chars().count() > 100);
    }

    #[test]
    fn em_dash_and_colon_split_long_sentences() {
        let text = format!("{}\u{2014} {}: tail keyword", "x".repeat(60), "y".repeat(60));
        let found = find_matches(&text, "keyword", 80, false);
        assert_eq!(found, vec!["tail keyword"]);
    }

    #[test]
    fn spaced_hyphen_splits_long_sentences() {
        let left = format!("{} -", "x".repeat(60));
        let right = format!("{} keyword", "y".repeat(60));
        let text = format!("{left} {right}");
        assert!(text.chars().count() > 80);

        assert_eq!(find_matches(&text, "keyword", 80, false), vec![right]);
        assert_eq!(find_matches(&text, "xxx", 80, false), vec![left]);
        // a hyphen inside a word is not a clause break
        let joined = format!("{}-keyword", "z".repeat(100));
        assert_eq!(find_matches(&joined, "keyword", 80, false), vec![joined.clone()]);
    }

    #[test]
    fn oversized_keyword_falls_back_to_plain_containment() {
        let keyword = "ä".repeat(200_000);
        let matcher = SentenceMatcher::new(&keyword, 500, false);
        assert!(matcher.pattern.is_none());

        let text = format!("Before. {} after.", "Ä".repeat(200_000));
        let found = matcher.find_matches(&text);
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with(" after."));
        assert!(matcher.find_matches("Before. Nothing here.").is_empty());

        let sentence = format!("x {keyword} y");
        assert_eq!(
            matcher.highlight(&sentence, "[", "]"),
            format!("x [{keyword}] y")
        );
    }

    #[test]
    fn whitespace_only_text_never_matches() {
        assert!(find_matches("   \n\t ", " ", 500, false).is_empty());
    }

    #[test]
    fn non_ascii_case_folding() {
        assert_eq!(
            find_matches("Die GRÖSSE zählt. Sonst nichts.", "grösse", 500, false),
            vec!["Die GRÖSSE zählt."]
        );
    }

    #[test]
    fn highlight_wraps_every_occurrence_in_original_case() {
        let matcher = SentenceMatcher::new("mosfet", 500, false);
        assert_eq!(
            matcher.highlight("MOSFET vs mosfet", "**", "**"),
            "**MOSFET** vs **mosfet**"
        );
    }

    #[test]
    fn split_after_keeps_punctuation_left() {
        assert_eq!(split_after("a. b! c", &SENTENCE_END), vec!["a.", "b!", "c"]);
        assert_eq!(split_after("plain", &SENTENCE_END), vec!["plain"]);
    }
}
