//! Lexical Pattern Counter
//!
//! Counts call-site occurrences of vocabulary names in C++ source text and
//! decides whether a file is worth counting at all. Matching is line-based
//! and purely lexical; comments, string literals, and macros are not
//! interpreted. Both entry points are decode-safe: non-UTF-8 content yields
//! a zero contribution instead of an error.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use super::counts::AlgorithmCounts;
use super::vocabulary::VOCABULARY;

/// File extensions eligible for scanning
pub const SOURCE_EXTENSIONS: &[&str] = &["cpp", "hpp", "h", "hh", "c", "cc"];

// One call-site pattern per vocabulary entry, compiled once. Names are
// matched independently so nested names ("max" inside "minmax(") are each
// credited on their own.
static CALL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    VOCABULARY
        .iter()
        .map(|name| {
            Regex::new(&format!(r"{}\s*\(", name)).expect("vocabulary names are literal patterns")
        })
        .collect()
});

/// Count every vocabulary call site in `content`
pub fn count_algorithms(content: &str) -> AlgorithmCounts {
    let mut counts = AlgorithmCounts::new();
    for line in content.lines() {
        for (index, pattern) in CALL_PATTERNS.iter().enumerate() {
            let found = pattern.find_iter(line).count() as u64;
            if found > 0 {
                counts.increment(index, found);
            }
        }
    }
    counts
}

/// Relevance predicate: does the content pull in `<algorithm>` or `<numeric>`?
pub fn has_algorithm_header(content: &str) -> bool {
    content
        .lines()
        .any(|line| line.contains("<algorithm>") || line.contains("<numeric>"))
}

/// Count call sites in the file at `path`
///
/// Unreadable or non-UTF-8 files contribute the all-zero map.
pub fn count_file(path: &Path) -> AlgorithmCounts {
    match read_text(path) {
        Some(content) => count_algorithms(&content),
        None => AlgorithmCounts::new(),
    }
}

/// Relevance predicate applied to the file at `path`
///
/// Unreadable or non-UTF-8 files are never relevant.
pub fn is_relevant_file(path: &Path) -> bool {
    read_text(path).is_some_and(|content| has_algorithm_header(&content))
}

fn read_text(path: &Path) -> Option<String> {
    let bytes = std::fs::read(path).ok()?;
    String::from_utf8(bytes).ok()
}
