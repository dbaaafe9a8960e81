//! Text normalization and token sets
//!
//! Every piece of text the engine compares (queries and catalog fields) goes
//! through the same normalization:
//!
//! 1. lower-case
//! 2. split on any run of whitespace (which also trims and collapses it)
//! 3. strip punctuation from both ends of each word
//! 4. drop words that become empty
//!
//! Punctuation *inside* a word is kept, so `node.js` and `front-end` survive while
//! `java,` becomes `java`.
//!
//! # Usage
//!
//! ```ignore
//! use shortlist_lib::text::{normalize, TokenSet};
//!
//! assert_eq!(normalize("  Java,   Developer! "), "java developer");
//!
//! let query = TokenSet::from_text("Java developer");
//! let entry = TokenSet::from_text("Java programming assessment");
//! assert_eq!(query.overlap(&entry), 0.5);
//! ```

use std::collections::BTreeSet;

/// Common English words that carry no signal for vector weighting.
///
/// Only the TF-IDF vocabulary uses this list; token sets keep every word.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "it", "in", "on", "of", "to", "and", "or", "for", "with", "this",
    "that", "be", "are", "was", "were", "been", "being", "have", "has", "had", "do", "does",
    "did", "will", "would", "could", "should", "may", "might", "can", "shall", "not", "no",
    "but", "if", "at", "by", "from", "as", "into", "about", "up", "out", "so", "its", "you",
    "your", "i", "my", "we", "our", "they", "them", "their", "he", "she", "his", "her", "who",
    "need", "needs", "well",
];

/// Split text into normalized words, in order, keeping repeats.
pub fn tokens(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Normalized form of `text`: its tokens joined by single spaces.
pub fn normalize(text: &str) -> String {
    tokens(text).join(" ")
}

/// Whether `word` (already normalized) is a stop word.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Deduplicated set of normalized words.
///
/// Backed by a `BTreeSet` so iteration order is stable run to run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet(BTreeSet<String>);

impl TokenSet {
    /// Build the token set of `text`.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self(tokens(text).into_iter().collect())
    }

    /// Number of distinct words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Fraction of `self`'s words that also appear in `other`:
    /// `|self ∩ other| / max(|self|, 1)`.
    ///
    /// `self` is the query side. Always in [0, 1]; an empty query yields 0.
    #[must_use]
    pub fn overlap(&self, other: &TokenSet) -> f32 {
        let shared = self.0.intersection(&other.0).count();
        shared as f32 / self.0.len().max(1) as f32
    }
}

impl FromIterator<String> for TokenSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_strip_boundary_punctuation() {
        assert_eq!(
            tokens("Java, (Spring) developer!"),
            vec!["java", "spring", "developer"]
        );
    }

    #[test]
    fn test_tokens_keep_inner_punctuation() {
        assert_eq!(tokens("Node.js and C#"), vec!["node.js", "and", "c"]);
        assert_eq!(tokens("front-end"), vec!["front-end"]);
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  Java \t\n  Developer  "), "java developer");
    }

    #[test]
    fn test_punctuation_only_words_dropped() {
        assert_eq!(tokens("java -- ... developer"), vec!["java", "developer"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(tokens("").is_empty());
        assert!(tokens("   \t ").is_empty());
        assert!(TokenSet::from_text("  ").is_empty());
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_token_set_deduplicates() {
        let set = TokenSet::from_text("java Java JAVA developer");
        assert_eq!(set.len(), 2);
        assert!(set.contains("java"));
        assert!(set.contains("developer"));
    }

    #[test]
    fn test_token_set_iteration_is_sorted() {
        let set = TokenSet::from_text("zeta alpha mu");
        let words: Vec<&str> = set.iter().collect();
        assert_eq!(words, vec!["alpha", "mu", "zeta"]);
    }

    #[test]
    fn test_overlap() {
        let query = TokenSet::from_text("java developer");
        let entry = TokenSet::from_text("java programming assessment");
        assert!((query.overlap(&entry) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_overlap_is_query_relative() {
        let query = TokenSet::from_text("java");
        let entry = TokenSet::from_text("java programming assessment");
        assert!((query.overlap(&entry) - 1.0).abs() < 1e-6);
        assert!((entry.overlap(&query) - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_overlap_empty_query_is_zero() {
        let query = TokenSet::default();
        let entry = TokenSet::from_text("java");
        assert_eq!(query.overlap(&entry), 0.0);
    }

    #[test]
    fn test_stop_words() {
        assert!(is_stop_word("the"));
        assert!(!is_stop_word("java"));
    }
}
