//! Per-line pattern matching.
//!
//! Matching produces non-overlapping spans ordered left to right. When two
//! candidate spans start at the same offset the longest one wins, which is
//! why subvert variants are scanned longest-first with claimed ranges.

use crate::core::case::{self, CaseStyle};
use crate::core::query::Query;

/// A located occurrence of the query within a line, with the replacement
/// text already reconciled against the matched text's case style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Byte offset of the start of the match.
    pub start: usize,
    /// Byte offset one past the end of the match.
    pub end: usize,
    /// The matched substring.
    pub text: String,
    /// What the matched substring becomes.
    pub replacement: String,
}

/// Find all matches of `query` in `line`, earliest-start-first.
///
/// An empty result is not an error. Regex patterns are assumed to be
/// compiled already; compilation failures are reported once, up front,
/// by the query construction in the CLI layer.
pub fn find_matches(line: &str, query: &Query) -> Vec<Match> {
    match query {
        Query::Substring(old, new) => {
            let replacement = CaseStyle::detect(old).apply(new);
            find_occurrences(line, old)
                .into_iter()
                .map(|start| Match {
                    start,
                    end: start + old.len(),
                    text: old.clone(),
                    replacement: replacement.clone(),
                })
                .collect()
        }
        Query::Subvert(pattern, replacement) => {
            let mut pairs = case::variants(pattern, replacement);
            // Longest variant first, so claimed ranges block shorter overlaps
            pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

            let mut matches: Vec<Match> = Vec::new();
            for (from, to) in &pairs {
                for start in find_occurrences(line, from) {
                    let end = start + from.len();
                    if matches.iter().any(|m| start < m.end && end > m.start) {
                        continue;
                    }
                    matches.push(Match {
                        start,
                        end,
                        text: from.clone(),
                        replacement: to.clone(),
                    });
                }
            }
            matches.sort_by_key(|m| m.start);
            matches
        }
        Query::Regex(re, template) => {
            let mut matches = Vec::new();
            for caps in re.captures_iter(line) {
                let Some(m) = caps.get(0) else {
                    continue;
                };
                if m.start() == m.end() {
                    continue;
                }
                let mut expanded = String::new();
                caps.expand(template, &mut expanded);
                let replacement = CaseStyle::detect(m.as_str()).apply(&expanded);
                matches.push(Match {
                    start: m.start(),
                    end: m.end(),
                    text: m.as_str().to_string(),
                    replacement,
                });
            }
            matches
        }
    }
}

/// Splice replacements into `line`. `matches` must be sorted and
/// non-overlapping, as produced by [`find_matches`].
pub fn apply_matches(line: &str, matches: &[Match]) -> String {
    let mut out = String::with_capacity(line.len());
    let mut last = 0;
    for m in matches {
        out.push_str(&line[last..m.start]);
        out.push_str(&m.replacement);
        last = m.end;
    }
    out.push_str(&line[last..]);
    out
}

/// Replace all matches of `query` in `line`, or `None` when nothing changed.
pub fn patch_line(line: &str, query: &Query) -> Option<String> {
    let matches = find_matches(line, query);
    if matches.is_empty() {
        return None;
    }
    let new = apply_matches(line, &matches);
    if new == line {
        None
    } else {
        Some(new)
    }
}

/// Non-overlapping occurrences of `term` in `text`, left to right.
fn find_occurrences(text: &str, term: &str) -> Vec<usize> {
    let mut found = Vec::new();
    if term.is_empty() || term.len() > text.len() {
        return found;
    }
    let mut start = 0;
    while let Some(pos) = text[start..].find(term) {
        let abs = start + pos;
        found.push(abs);
        start = abs + term.len();
    }
    found
}
