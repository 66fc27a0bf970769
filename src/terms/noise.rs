//! Noise estimation: how much of a fragment is unrelated to the search terms.
//!
//! A fragment that happens to contain one matching word amid a full line of
//! ordinary text has a high noise ratio and is dropped before clustering.

use serde::{Deserialize, Serialize};

use super::TermIndex;

/// Minimum token length (in characters) considered by the estimator.
pub const MIN_TOKEN_LEN: usize = 2;

/// Token counts for one fragment.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NoiseEstimate {
    /// Tokens of length ≥2 after punctuation removal
    pub token_count: usize,
    /// Tokens related to some search term
    pub matched_count: usize,
    /// `(token_count - matched_count) / token_count`, 0 without tokens
    pub noise_ratio: f64,
}

/// Split text into lower-cased word tokens with punctuation removed.
///
/// Hyphens are removed rather than treated as separators, so "Gian-na" yields
/// the single token "gianna".
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .chars()
        .filter(|c| !is_noise_punctuation(*c))
        .collect::<String>()
        .to_lowercase();
    cleaned
        .split_whitespace()
        .filter(|t| t.chars().count() >= MIN_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}

fn is_noise_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(
            c,
            '\u{2018}' // ‘
                | '\u{2019}' // ’
                | '\u{201A}' // ‚
                | '\u{201C}' // “
                | '\u{201D}' // ”
                | '\u{201E}' // „
                | '\u{00AB}' // «
                | '\u{00BB}' // »
                | '\u{2039}' // ‹
                | '\u{203A}' // ›
                | '\u{2010}' // hyphen
                | '\u{2011}' // non-breaking hyphen
                | '\u{2013}' // en dash
                | '\u{2014}' // em dash
                | '\u{00AD}' // soft hyphen
                | '\u{2026}' // …
        )
}

/// Computes noise ratios for fragment text.
#[derive(Debug, Clone, Copy)]
pub struct NoiseEstimator<'a> {
    index: &'a TermIndex,
}

impl<'a> NoiseEstimator<'a> {
    /// Create an estimator bound to `index`.
    pub fn new(index: &'a TermIndex) -> Self {
        Self { index }
    }

    /// Estimate the noise of `text`.
    ///
    /// # Examples
    ///
    /// ```
    /// use region_locator::terms::{NoiseEstimator, TermIndex};
    ///
    /// let index = TermIndex::new(&["gianna"]);
    /// let noise = NoiseEstimator::new(&index).estimate("Gianna said that the weather was fine");
    /// assert_eq!(noise.token_count, 7);
    /// assert_eq!(noise.matched_count, 1);
    /// assert!(noise.noise_ratio > 0.8);
    /// ```
    pub fn estimate(&self, text: &str) -> NoiseEstimate {
        let tokens = tokenize(text);
        let token_count = tokens.len();
        if token_count == 0 {
            return NoiseEstimate::default();
        }

        let matched_count = tokens.iter().filter(|t| self.token_matches(t)).count();
        NoiseEstimate {
            token_count,
            matched_count,
            noise_ratio: (token_count - matched_count) as f64 / token_count as f64,
        }
    }

    fn token_matches(&self, token: &str) -> bool {
        self.index.contains(token)
            || self.index.is_prefix(token)
            || self.index.containment_matches(token)
            || self.index.is_suffix_of_longer(token)
            || self.index.contains_any_term(token)
    }
}
