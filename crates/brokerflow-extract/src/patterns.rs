//! Generic entity patterns matched anywhere in a document.
//!
//! Each pattern runs independently over the whole text and reports the set
//! of distinct matches. Patterns are case-insensitive; a pattern that finds
//! nothing yields an empty set.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use brokerflow_core::{PatternKind, PatternMatches};
use regex::Regex;

/// Pattern table, compiled once and shared read-only across workers.
static PATTERNS: LazyLock<Vec<(PatternKind, Regex)>> = LazyLock::new(|| {
    PatternKind::ALL
        .iter()
        .map(|&kind| (kind, Regex::new(source(kind)).unwrap()))
        .collect()
});

fn source(kind: PatternKind) -> &'static str {
    match kind {
        PatternKind::Ssn => r"(?i)\b\d{3}-\d{2}-\d{4}\b",
        PatternKind::Phone => r"(?i)\b\d{3}[-.]?\d{3}[-.]?\d{4}\b",
        PatternKind::Email => r"(?i)\b[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}\b",
        PatternKind::Currency => r"(?i)\$[\d,]+\.?\d*",
        PatternKind::Percentage => r"(?i)\d+\.?\d*%",
        PatternKind::ZipCode => r"(?i)\b\d{5}(?:-\d{4})?\b",
        PatternKind::Date => r"(?i)\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b",
        PatternKind::CreditScore => r"(?i)\b[4-8]\d{2}\b",
    }
}

/// Run every pattern over `text`.
///
/// The result has one entry per [`PatternKind`], each holding the distinct
/// matched strings.
pub fn match_patterns(text: &str) -> PatternMatches {
    PATTERNS
        .iter()
        .map(|(kind, re)| {
            let found: BTreeSet<String> =
                re.find_iter(text).map(|m| m.as_str().to_string()).collect();
            (*kind, found)
        })
        .collect()
}
