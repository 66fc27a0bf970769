//! Normalized lookup structures built from the caller's search terms.

use std::collections::HashSet;

use indexmap::IndexSet;
use regex::{Regex, RegexBuilder};

use crate::error::Result;

/// Minimum length (in characters) for a term to join the containment pattern.
///
/// Shorter terms match inside unrelated words far too often ("2" in "2016").
pub const MIN_CONTAINMENT_LEN: usize = 3;

/// Minimum length of a prefix stored for hyphenation matching.
pub const MIN_PREFIX_LEN: usize = 2;

/// Immutable, normalized view of a search-term list.
///
/// Built once per search: terms are lower-cased and trimmed, empty entries are
/// dropped, and the containment pattern is compiled from escaped terms.
#[derive(Debug, Clone)]
pub struct TermIndex {
    terms: IndexSet<String>,
    prefixes: HashSet<String>,
    containment: Option<Regex>,
}

impl TermIndex {
    /// Build an index from raw terms.
    ///
    /// Never fails for caller input: regex metacharacters are escaped before
    /// compiling. An empty or all-whitespace list yields an index that matches
    /// nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use region_locator::terms::TermIndex;
    ///
    /// let index = TermIndex::new(&["  Gianna ", "gianna", "", "Dr."]);
    /// assert_eq!(index.len(), 2);
    /// assert!(index.contains("gianna"));
    /// assert!(index.is_prefix("gian"));
    /// assert!(index.containment_matches("bei dr.gianna"));
    /// ```
    pub fn new<S: AsRef<str>>(raw_terms: &[S]) -> Self {
        // Escaped alternations always compile; fall back to an empty index
        // rather than surfacing an impossible error to callers.
        Self::try_new(raw_terms).unwrap_or_else(|err| {
            log::warn!("Failed to compile term pattern, index disabled: {}", err);
            Self::empty()
        })
    }

    /// Build an index, propagating a pattern compile failure.
    pub fn try_new<S: AsRef<str>>(raw_terms: &[S]) -> Result<Self> {
        let terms: IndexSet<String> = raw_terms
            .iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        let mut prefixes = HashSet::new();
        for term in &terms {
            let chars: Vec<char> = term.chars().collect();
            for len in MIN_PREFIX_LEN..chars.len() {
                prefixes.insert(chars[..len].iter().collect::<String>());
            }
        }

        let alternatives: Vec<String> = terms
            .iter()
            .filter(|t| t.chars().count() >= MIN_CONTAINMENT_LEN)
            .map(|t| regex::escape(t))
            .collect();

        let containment = if alternatives.is_empty() {
            None
        } else {
            Some(
                RegexBuilder::new(&alternatives.join("|"))
                    .case_insensitive(true)
                    .build()?,
            )
        };

        log::debug!(
            "Term index: {} terms, {} prefixes, {} containment alternatives",
            terms.len(),
            prefixes.len(),
            alternatives.len()
        );

        Ok(Self {
            terms,
            prefixes,
            containment,
        })
    }

    fn empty() -> Self {
        Self {
            terms: IndexSet::new(),
            prefixes: HashSet::new(),
            containment: None,
        }
    }

    /// Number of distinct normalized terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the index holds no terms at all.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Normalized terms in first-seen order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    /// Exact membership of an already-normalized string.
    pub fn contains(&self, normalized: &str) -> bool {
        self.terms.contains(normalized)
    }

    /// Whether `normalized` is a proper prefix (length ≥2) of some term.
    pub fn is_prefix(&self, normalized: &str) -> bool {
        self.prefixes.contains(normalized)
    }

    /// Whether some term of length ≥3 occurs inside `text`, ignoring case.
    pub fn containment_matches(&self, text: &str) -> bool {
        self.containment.as_ref().is_some_and(|re| re.is_match(text))
    }

    /// Whether `normalized` ends some term that is strictly longer than it.
    pub fn is_suffix_of_longer(&self, normalized: &str) -> bool {
        let len = normalized.chars().count();
        self.terms
            .iter()
            .any(|t| t.chars().count() > len && t.ends_with(normalized))
    }

    /// Whether `normalized` contains any term as a substring.
    pub fn contains_any_term(&self, normalized: &str) -> bool {
        self.terms.iter().any(|t| normalized.contains(t.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terms_are_normalized_and_unique() {
        let index = TermIndex::new(&["Gianna", " gianna", "GIANNA  ", "Rossi"]);
        let terms: Vec<&str> = index.terms().collect();
        assert_eq!(terms, vec!["gianna", "rossi"]);
    }

    #[test]
    fn test_blank_terms_dropped() {
        let index = TermIndex::new(&["", "   ", "\t\n"]);
        assert!(index.is_empty());
        assert!(!index.containment_matches("anything at all"));
        assert!(!index.is_prefix("an"));
    }

    #[test]
    fn test_prefixes_exclude_full_term_and_single_chars() {
        let index = TermIndex::new(&["gianna"]);
        for p in ["gi", "gia", "gian", "giann"] {
            assert!(index.is_prefix(p), "missing prefix {}", p);
        }
        assert!(!index.is_prefix("g"));
        assert!(!index.is_prefix("gianna"));
    }

    #[test]
    fn test_short_terms_excluded_from_containment() {
        let index = TermIndex::new(&["2", "ab"]);
        assert!(!index.containment_matches("2016"));
        assert!(!index.containment_matches("abc"));
    }

    #[test]
    fn test_metacharacters_are_escaped() {
        let index = TermIndex::new(&["c++", "(see", "a.b"]);
        assert!(index.containment_matches("written in C++ mostly"));
        assert!(index.containment_matches("(see note 4)"));
        assert!(!index.containment_matches("axb"));
    }

    #[test]
    fn test_suffix_of_longer() {
        let index = TermIndex::new(&["gianna"]);
        assert!(index.is_suffix_of_longer("na"));
        assert!(index.is_suffix_of_longer("anna"));
        assert!(!index.is_suffix_of_longer("gianna"));
        assert!(!index.is_suffix_of_longer("xna"));
    }

    #[test]
    fn test_non_ascii_prefixes() {
        let index = TermIndex::new(&["Müller"]);
        assert!(index.is_prefix("mü"));
        assert!(index.is_prefix("müll"));
        assert!(index.containment_matches("Frau MÜLLER"));
    }
}
