//! Ordered rule tables.
//!
//! A table is a slice of [`Rule`]s evaluated top to bottom. The first rule
//! whose pattern matches builds the result; later rules are never tried.
//! Rules only describe a match, they never touch a profile.

use regex::{Captures, Regex};

pub(crate) struct Rule<T> {
    pattern: Regex,
    build: fn(&Captures<'_>) -> T,
}

impl<T> Rule<T> {
    /// Compile a built-in rule. Patterns are literals covered by tests.
    pub(crate) fn new(pattern: &str, build: fn(&Captures<'_>) -> T) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("built-in rule pattern must compile"),
            build,
        }
    }
}

/// Result of the first matching rule, if any.
pub(crate) fn first_match<T>(rules: &[Rule<T>], source: &str) -> Option<T> {
    rules
        .iter()
        .find_map(|rule| rule.pattern.captures(source).map(|caps| (rule.build)(&caps)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_wins() {
        let rules = vec![
            Rule::new(r"(?i)alpha", |_| "first"),
            Rule::new(r"(?i)alp", |_| "second"),
        ];
        assert_eq!(first_match(&rules, "ALPHA"), Some("first"));
        assert_eq!(first_match(&rules, "alp"), Some("second"));
        assert_eq!(first_match(&rules, "beta"), None);
    }

    #[test]
    fn test_build_reads_captures() {
        let rules = vec![Rule::new(r"v(\d+)", |c| c[1].to_string())];
        assert_eq!(first_match(&rules, "app v42").as_deref(), Some("42"));
    }
}
