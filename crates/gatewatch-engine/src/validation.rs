//! Edit-time validation of blocking pattern text.
//!
//! Advisory only: the engine tolerates bad patterns at evaluation time, so
//! a config saved through a path that skipped validation still cannot fault
//! the dispatch loop.

use crate::patterns::PatternSet;
use gatewatch_core::{Error, Result};

/// Check every non-blank line of the raw pattern text, reporting the first
/// line that is not a valid regular expression together with the regex
/// engine's own diagnostic. Blank or absent text is valid.
pub fn check_patterns(raw_text: &str) -> Result<()> {
    let patterns = PatternSet::compile(raw_text);
    match patterns.failures().next() {
        Some((pattern, reason)) => Err(Error::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

/// Collect every invalid line, for surfaces that report more than the
/// first.
pub fn check_patterns_all(raw_text: &str) -> Vec<Error> {
    let patterns = PatternSet::compile(raw_text);
    patterns
        .failures()
        .map(|(pattern, reason)| Error::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        })
        .collect()
}
