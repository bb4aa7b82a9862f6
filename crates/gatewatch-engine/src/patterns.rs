//! Compilation of blocking-name expressions.

use regex::Regex;
use tracing::warn;

enum Compiled {
    Ok(Regex),
    Failed(String),
}

/// One blocking-name expression, compiled from one non-blank line of
/// configuration text.
///
/// A line that fails to compile is kept with its error so the validation
/// layer can report it; at evaluation time it never matches.
pub struct CompiledPattern {
    raw: String,
    compiled: Compiled,
}

impl CompiledPattern {
    fn compile(raw: &str) -> Self {
        let compiled = match Regex::new(raw) {
            Ok(regex) => Compiled::Ok(regex),
            Err(err) => {
                warn!(pattern = raw, error = %err, "blocking pattern failed to compile");
                Compiled::Failed(err.to_string())
            }
        };
        Self {
            raw: raw.to_string(),
            compiled,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn error(&self) -> Option<&str> {
        match &self.compiled {
            Compiled::Ok(_) => None,
            Compiled::Failed(reason) => Some(reason),
        }
    }

    /// Find-semantics match against the full name: the expression may hit
    /// anywhere in the name, no whole-string anchoring.
    pub fn matches(&self, name: &str) -> bool {
        match &self.compiled {
            Compiled::Ok(regex) => regex.is_match(name),
            Compiled::Failed(_) => false,
        }
    }
}

impl std::fmt::Debug for CompiledPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledPattern")
            .field("raw", &self.raw)
            .field("valid", &self.error().is_none())
            .finish()
    }
}

/// Ordered set of blocking-name expressions for one job.
///
/// Pure transformation of the raw configuration text; safe to compile
/// repeatedly and cache against the text it was built from.
#[derive(Debug, Default)]
pub struct PatternSet {
    patterns: Vec<CompiledPattern>,
}

impl PatternSet {
    /// Compile newline-delimited pattern text, one matcher per non-blank
    /// line, insertion order preserved.
    ///
    /// One line failing to compile does not abort the others.
    pub fn compile(raw_text: &str) -> Self {
        let patterns = raw_text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(CompiledPattern::compile)
            .collect();
        Self { patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledPattern> {
        self.patterns.iter()
    }

    /// Lines that failed to compile, as `(pattern, reason)` in declared
    /// order.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.patterns
            .iter()
            .filter_map(|p| p.error().map(|reason| (p.as_str(), reason)))
    }

    /// True if any expression matches the name, tested in declared order.
    pub fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(name))
    }

    /// Raw text of the first expression matching the name.
    pub fn find_match(&self, name: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|p| p.matches(name))
            .map(|p| p.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_discarded() {
        let set = PatternSet::compile("deploy-.*\n\n   \nnightly\n");
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_empty_text_compiles_to_empty_set() {
        assert!(PatternSet::compile("").is_empty());
        assert!(PatternSet::compile("\n\n").is_empty());
    }

    #[test]
    fn test_find_semantics_not_whole_string() {
        let set = PatternSet::compile("deploy");
        assert!(set.matches("deploy-prod-1"));
        assert!(set.matches("pre-deploy"));
        assert!(!set.matches("release"));
    }

    #[test]
    fn test_anchors_still_honored() {
        let set = PatternSet::compile("^deploy$");
        assert!(set.matches("deploy"));
        assert!(!set.matches("deploy-prod"));
    }

    #[test]
    fn test_invalid_line_never_matches_and_is_reported() {
        let set = PatternSet::compile("[unclosed\nnightly");
        assert_eq!(set.len(), 2);
        assert!(!set.matches("[unclosed"));
        assert!(set.matches("nightly-build"));

        let failures: Vec<_> = set.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, "[unclosed");
    }

    #[test]
    fn test_first_match_follows_declared_order() {
        let set = PatternSet::compile("nightly\ndeploy-.*\n.*-prod");
        assert_eq!(set.find_match("deploy-prod"), Some("deploy-.*"));
    }
}
