//! Compiled pattern cache

use regex::Regex;
use std::collections::HashMap;

/// Memoizes compiled code-mapping patterns by their source text
///
/// A pattern must match the whole type name, so every pattern is compiled
/// anchored at both ends.
#[derive(Debug, Default)]
pub struct PatternCache {
    patterns: HashMap<String, Regex>,
}

impl PatternCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the compiled form of a pattern, compiling it on first use
    pub fn compile(&mut self, pattern: &str) -> Result<&Regex, regex::Error> {
        if !self.patterns.contains_key(pattern) {
            let regex = Regex::new(&format!("^(?:{})$", pattern))?;
            tracing::debug!(pattern, "Compiled code mapping pattern");
            self.patterns.insert(pattern.to_string(), regex);
        }
        Ok(&self.patterns[pattern])
    }

    /// Whether a pattern has been compiled already
    pub fn contains(&self, pattern: &str) -> bool {
        self.patterns.contains_key(pattern)
    }

    /// Number of distinct compiled patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether nothing has been compiled yet
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_match_semantics() {
        let mut cache = PatternCache::new();
        let regex = cache.compile("ui\\..*").unwrap();

        assert!(regex.is_match("ui.Button"));
        assert!(!regex.is_match("legacy.ui.Button"));
    }

    #[test]
    fn test_alternation_is_anchored_as_a_whole() {
        let mut cache = PatternCache::new();
        let regex = cache.compile("a|b").unwrap();

        assert!(regex.is_match("a"));
        assert!(regex.is_match("b"));
        assert!(!regex.is_match("ab"));
    }

    #[test]
    fn test_compiles_once() {
        let mut cache = PatternCache::new();
        cache.compile("x\\..*").unwrap();
        cache.compile("x\\..*").unwrap();
        cache.compile("y\\..*").unwrap();

        assert_eq!(cache.len(), 2);
        assert!(cache.contains("x\\..*"));
    }

    #[test]
    fn test_invalid_pattern() {
        let mut cache = PatternCache::new();
        assert!(cache.compile("ui\\.(").is_err());
        assert!(cache.is_empty());
    }
}
