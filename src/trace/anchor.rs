//! Anchor candidate discovery.

use lazy_static::lazy_static;
use regex::Regex;

use crate::geometry::Rect;
use crate::layout::{reading_order_indices, TextFragment};

lazy_static! {
    /// Start of a footnote: a number followed by whitespace, or a bare number
    static ref RE_FOOTNOTE_START: Regex = Regex::new(r"^(\d+)(?:\s|$)").unwrap();
}

/// Vertical tolerance, in lines, for a follower on the anchor's own line.
const SAME_LINE_TOLERANCE: f32 = 0.7;
/// Maximum gap to the right of a bare anchor for a same-line follower.
const SAME_LINE_MAX_GAP: f32 = 100.0;
/// Maximum distance, in lines, down to a next-line follower.
const NEXT_LINE_MAX_DROP: f32 = 2.0;
/// Maximum horizontal offset, in lines, of a next-line follower.
const NEXT_LINE_MAX_SHIFT: f32 = 5.0;

/// A fragment where a trace may start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorCandidate {
    /// Index of the anchor fragment
    pub start: usize,
    /// For a bare anchor, the fragment carrying its text
    pub follower: Option<usize>,
}

/// Whether normalized text starts with `anchor` followed by a space or a letter.
///
/// A bare superscript reference ("4") carries no body text and does not
/// qualify; "4 Vgl." and "4Vgl." do.
///
/// # Examples
///
/// ```
/// use region_locator::trace::starts_with_anchor;
///
/// assert!(starts_with_anchor("4 vgl. schmidt 1990", "4"));
/// assert!(starts_with_anchor("4vgl.", "4"));
/// assert!(!starts_with_anchor("4", "4"));
/// assert!(!starts_with_anchor("42 ibid.", "4"));
/// ```
pub fn starts_with_anchor(normalized: &str, anchor: &str) -> bool {
    match normalized.strip_prefix(anchor) {
        Some(rest) => rest
            .chars()
            .next()
            .is_some_and(|c| c.is_whitespace() || c.is_alphabetic()),
        None => false,
    }
}

/// Footnote number at the start of `text`, if the text looks like a new
/// footnote ("12 See …" or a bare "12").
pub fn footnote_number(text: &str) -> Option<&str> {
    RE_FOOTNOTE_START
        .captures(text.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Whether the trimmed text begins with a letter.
pub fn begins_with_letter(text: &str) -> bool {
    text.trim_start().chars().next().is_some_and(char::is_alphabetic)
}

/// Find anchor candidates among `fragments`, in reading order.
///
/// Fragments starting with the anchor plus content come first. Only when none
/// exist are bare anchors considered, each paired with the nearest following
/// fragment; a bare anchor qualifies when that follower begins with a letter.
pub fn find_anchor_candidates(
    fragments: &[TextFragment],
    anchor: &str,
    line_height: f32,
) -> Vec<AnchorCandidate> {
    let rects: Vec<Rect> = fragments.iter().map(|f| f.rect).collect();
    let order = reading_order_indices(&rects);

    let direct: Vec<AnchorCandidate> = order
        .iter()
        .copied()
        .filter(|&i| starts_with_anchor(&fragments[i].text.trim().to_lowercase(), anchor))
        .map(|start| AnchorCandidate {
            start,
            follower: None,
        })
        .collect();
    if !direct.is_empty() {
        return direct;
    }

    order
        .iter()
        .copied()
        .filter(|&i| fragments[i].text.trim().to_lowercase() == anchor)
        .filter_map(|start| {
            let follower = nearest_follower(&order, &rects, start, line_height)?;
            if begins_with_letter(&fragments[follower].text) {
                Some(AnchorCandidate {
                    start,
                    follower: Some(follower),
                })
            } else {
                log::trace!(
                    "Bare anchor at fragment {} rejected: follower '{}' has no body text",
                    start,
                    fragments[follower].text
                );
                None
            }
        })
        .collect()
}

/// First fragment in reading order that continues the text after `start`.
fn nearest_follower(order: &[usize], rects: &[Rect], start: usize, line_height: f32) -> Option<usize> {
    let a = rects[start];
    order.iter().copied().find(|&j| {
        if j == start {
            return false;
        }
        let b = rects[j];
        let dy = b.top() - a.top();
        let same_line = dy.abs() < SAME_LINE_TOLERANCE * line_height
            && b.left() >= a.left()
            && b.left() - a.right() <= SAME_LINE_MAX_GAP;
        let next_line = dy >= SAME_LINE_TOLERANCE * line_height
            && dy <= NEXT_LINE_MAX_DROP * line_height
            && (b.left() - a.left()).abs() <= NEXT_LINE_MAX_SHIFT * line_height;
        same_line || next_line
    })
}
