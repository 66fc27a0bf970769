//! Fragment scoring against a [`TermIndex`].
//!
//! Scores are small integers (0–10). The hierarchy is evaluated in order and
//! the first rule that applies wins:
//!
//! 1. exact term, weighted by length (≥6 → 10, 4–5 → 6, 2–3 → 3, 1 → 2)
//! 2. anything shorter than two characters → 0
//! 3. pre-hyphenation start of a term → 7
//! 4. a term fully contained in the fragment → 5
//! 5. a line ending in a hyphenated term start → 7
//! 6. post-hyphenation tail (≤4 chars) of a longer term, alone or leading a
//!    line → 3

use serde::{Deserialize, Serialize};

use super::TermIndex;

/// Score of an exact match of a term with six or more characters.
pub const EXACT_LONG_SCORE: u8 = 10;
/// Score of an exact match of a 4–5 character term.
pub const EXACT_MEDIUM_SCORE: u8 = 6;
/// Score of an exact match of a 2–3 character term.
pub const EXACT_SHORT_SCORE: u8 = 3;
/// Score of an exact match of a single character (footnote digits).
pub const EXACT_CHAR_SCORE: u8 = 2;
/// Score of a fragment that starts a hyphenated term.
pub const PREFIX_SCORE: u8 = 7;
/// Score of a fragment that contains a term.
pub const CONTAINMENT_SCORE: u8 = 5;
/// Score of a fragment that ends a hyphenated term.
pub const SUFFIX_SCORE: u8 = 3;
/// Longest fragment accepted as a hyphenation tail.
pub const MAX_SUFFIX_LEN: usize = 4;

/// How a fragment matched the term index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// The fragment is a term
    Exact,
    /// The fragment starts a term (text before a line-break hyphen)
    Prefix,
    /// A term occurs inside the fragment
    Contained,
    /// The fragment ends a longer term (text after a line-break hyphen)
    Suffix,
    /// No relation to any term
    None,
}

/// Result of scoring a single fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentScore {
    /// Integer score in 0..=10
    pub score: u8,
    /// Which rule produced the score
    pub kind: MatchKind,
}

impl FragmentScore {
    const NONE: FragmentScore = FragmentScore {
        score: 0,
        kind: MatchKind::None,
    };

    fn new(score: u8, kind: MatchKind) -> Self {
        Self { score, kind }
    }
}

/// Normalize fragment text for scoring: lower-case, drop one line-continuation
/// hyphen, trim.
pub fn normalize_fragment_text(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let stripped = lowered.strip_suffix('-').unwrap_or(&lowered);
    stripped.trim().to_string()
}

/// Scores fragment text against a term index.
#[derive(Debug, Clone, Copy)]
pub struct FragmentScorer<'a> {
    index: &'a TermIndex,
}

impl<'a> FragmentScorer<'a> {
    /// Create a scorer bound to `index`.
    pub fn new(index: &'a TermIndex) -> Self {
        Self { index }
    }

    /// Score raw fragment text.
    ///
    /// # Examples
    ///
    /// ```
    /// use region_locator::terms::{FragmentScorer, MatchKind, TermIndex};
    ///
    /// let index = TermIndex::new(&["gianna"]);
    /// let scorer = FragmentScorer::new(&index);
    ///
    /// assert_eq!(scorer.score("Gianna").score, 10);
    /// assert_eq!(scorer.score("Gian-").kind, MatchKind::Prefix);
    /// assert_eq!(scorer.score("Dr.Gianna").score, 5);
    /// assert_eq!(scorer.score("na").score, 3);
    /// assert_eq!(scorer.score("weather").score, 0);
    /// ```
    pub fn score(&self, text: &str) -> FragmentScore {
        let normalized = normalize_fragment_text(text);
        if normalized.is_empty() {
            return FragmentScore::NONE;
        }

        let len = normalized.chars().count();
        if self.index.contains(&normalized) {
            return FragmentScore::new(exact_score(len), MatchKind::Exact);
        }

        if len < 2 {
            return FragmentScore::NONE;
        }

        if self.index.is_prefix(&normalized) {
            return FragmentScore::new(PREFIX_SCORE, MatchKind::Prefix);
        }

        if self.index.containment_matches(&normalized) {
            return FragmentScore::new(CONTAINMENT_SCORE, MatchKind::Contained);
        }

        if self.trailing_prefix(text, &normalized) {
            return FragmentScore::new(PREFIX_SCORE, MatchKind::Prefix);
        }

        if self.is_tail(&normalized) || self.leading_tail(&normalized) {
            return FragmentScore::new(SUFFIX_SCORE, MatchKind::Suffix);
        }

        FragmentScore::NONE
    }

    /// Score only the integer value.
    pub fn score_value(&self, text: &str) -> u8 {
        self.score(text).score
    }

    fn is_tail(&self, candidate: &str) -> bool {
        let len = candidate.chars().count();
        len >= 2 && len <= MAX_SUFFIX_LEN && self.index.is_suffix_of_longer(candidate)
    }

    /// A line-level fragment such as "text by Gian-" ends with the start of a term.
    fn trailing_prefix(&self, raw: &str, normalized: &str) -> bool {
        if !raw.trim_end().ends_with('-') {
            return false;
        }
        match normalized.rsplit(char::is_whitespace).next() {
            Some(last) if last.len() < normalized.len() => self.index.is_prefix(last),
            _ => false,
        }
    }

    /// A line-level fragment such as "na accepted" starts with the tail of a term.
    fn leading_tail(&self, normalized: &str) -> bool {
        match normalized.split(char::is_whitespace).next() {
            Some(first) if first.len() < normalized.len() => self.is_tail(first),
            _ => false,
        }
    }
}

fn exact_score(len: usize) -> u8 {
    match len {
        0 => 0,
        1 => EXACT_CHAR_SCORE,
        2..=3 => EXACT_SHORT_SCORE,
        4..=5 => EXACT_MEDIUM_SCORE,
        _ => EXACT_LONG_SCORE,
    }
}
