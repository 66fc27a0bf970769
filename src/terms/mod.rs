//! Search-term handling: normalization, fragment scoring and noise estimation.
//!
//! - [`TermIndex`]: exact terms, hyphenation prefixes and the containment pattern
//! - [`FragmentScorer`]: 0–10 score for one fragment's text
//! - [`NoiseEstimator`]: share of a fragment's words unrelated to any term

mod index;
mod noise;
mod scorer;

pub use index::{TermIndex, MIN_CONTAINMENT_LEN, MIN_PREFIX_LEN};
pub use noise::{tokenize, NoiseEstimate, NoiseEstimator, MIN_TOKEN_LEN};
pub use scorer::{
    normalize_fragment_text, FragmentScore, FragmentScorer, MatchKind, CONTAINMENT_SCORE,
    EXACT_CHAR_SCORE, EXACT_LONG_SCORE, EXACT_MEDIUM_SCORE, EXACT_SHORT_SCORE, MAX_SUFFIX_LEN,
    PREFIX_SCORE, SUFFIX_SCORE,
};
