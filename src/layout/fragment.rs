//! Positioned text fragments as reported by a page's text layer.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::terms::{FragmentScore, MatchKind};

/// Number of characters kept in a fragment preview.
pub const PREVIEW_CHARS: usize = 50;

/// One positioned run of text on the page.
///
/// The rectangle is in page-local coordinates with any display scale already
/// resolved by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    /// Raw text as reported by the text layer
    pub text: String,
    /// Bounding rectangle in page-local coordinates
    pub rect: Rect,
}

impl TextFragment {
    /// Create a new fragment.
    pub fn new(text: impl Into<String>, rect: Rect) -> Self {
        Self {
            text: text.into(),
            rect,
        }
    }
}

/// A fragment with its match score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredFragment {
    /// Position of the fragment in the caller's collection
    pub index: usize,
    /// Raw text
    pub text: String,
    /// Bounding rectangle
    pub rect: Rect,
    /// Integer score 0..=10
    pub score: u8,
    /// Which scoring rule matched
    pub kind: MatchKind,
    /// First [`PREVIEW_CHARS`] characters of the text, for diagnostics
    pub preview: String,
}

impl ScoredFragment {
    /// Attach a score to the fragment at `index`.
    pub fn new(index: usize, fragment: &TextFragment, score: FragmentScore) -> Self {
        Self {
            index,
            text: fragment.text.clone(),
            rect: fragment.rect,
            score: score.score,
            kind: score.kind,
            preview: fragment.text.chars().take(PREVIEW_CHARS).collect(),
        }
    }
}

/// Join fragment texts in the given order into one lower-cased string.
///
/// A fragment ending in a hyphen is joined to the next one without the hyphen
/// and without a space, undoing line-break hyphenation.
pub fn join_fragment_texts<'a, I>(texts: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut joined = String::new();
    let mut glue_next = false;
    for text in texts {
        let piece = text.trim().to_lowercase();
        if piece.is_empty() {
            continue;
        }
        if !joined.is_empty() && !glue_next {
            joined.push(' ');
        }
        match piece.strip_suffix('-') {
            Some(head) if !head.is_empty() => {
                joined.push_str(head);
                glue_next = true;
            },
            _ => {
                joined.push_str(&piece);
                glue_next = false;
            },
        }
    }
    joined
}
