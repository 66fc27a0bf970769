//! Directional tracing from an anchor fragment.

use serde::{Deserialize, Serialize};

use super::anchor::{find_anchor_candidates, footnote_number, AnchorCandidate};
use crate::geometry::Rect;
use crate::layout::clustering::{count_terms_in, coverage_ratio};
use crate::layout::{join_fragment_texts, reading_order_indices, ScoredFragment, TextFragment};
use crate::terms::{FragmentScorer, NoiseEstimator, TermIndex};

/// Points per distinct matched term in a trace score.
pub const TERM_WEIGHT: i64 = 20;

/// Vertical gap, in lines, that ends a trace.
const MAX_LINE_GAP: f32 = 2.0;
/// Offset, in lines, from the anchor's left edge tolerated on a new line.
const COLUMN_ALIGNMENT: f32 = 3.0;
/// Horizontal jump, in lines, that marks a same-line fragment as another column.
const MAX_SAME_LINE_JUMP: f32 = 5.0;

/// Fragments collected by following the text flow from an anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceResult {
    /// Fragments in trace order, anchor first
    pub fragments: Vec<ScoredFragment>,
    /// Heuristic score used to pick among candidate anchors
    pub total_score: i64,
    /// Bounding box over the fragments
    pub bounds: Rect,
    /// Distinct terms found along the trace
    pub unique_term_count: usize,
    /// `unique_term_count / number of terms`
    pub term_coverage: f64,
    /// Index of the anchor fragment in the caller's collection
    pub anchor_index: usize,
}

impl TraceResult {
    /// Number of fragments in the trace.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether the trace holds no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Rectangles of the fragments, for per-fragment highlighting.
    pub fn highlight_boxes(&self) -> Vec<Rect> {
        self.fragments.iter().map(|f| f.rect).collect()
    }
}

/// Follows text from anchor fragments and keeps the best trace.
#[derive(Debug, Clone)]
pub struct AnchorTracer<'a> {
    index: &'a TermIndex,
    anchor: String,
    line_height: f32,
    low_coverage_cutoff: f64,
}

impl<'a> AnchorTracer<'a> {
    /// Create a tracer for `anchor` (normalized internally).
    pub fn new(index: &'a TermIndex, anchor: &str, line_height: f32) -> Self {
        Self {
            index,
            anchor: anchor.trim().to_lowercase(),
            line_height,
            low_coverage_cutoff: 0.3,
        }
    }

    /// Set the coverage below which traces pay the noise penalty.
    pub fn with_low_coverage_cutoff(mut self, cutoff: f64) -> Self {
        self.low_coverage_cutoff = cutoff;
        self
    }

    /// Find anchors, trace each, and return the best trace.
    ///
    /// # Examples
    ///
    /// ```
    /// use region_locator::geometry::Rect;
    /// use region_locator::layout::TextFragment;
    /// use region_locator::terms::TermIndex;
    /// use region_locator::trace::AnchorTracer;
    ///
    /// let index = TermIndex::new(&["4"]);
    /// let fragments = vec![TextFragment::new("4 Vgl. Schmidt 1990", Rect::new(0.0, 0.0, 120.0, 12.0))];
    /// let trace = AnchorTracer::new(&index, "4", 12.0).locate(&fragments).unwrap();
    /// assert_eq!(trace.fragments[0].text, "4 Vgl. Schmidt 1990");
    /// ```
    pub fn locate(&self, fragments: &[TextFragment]) -> Option<TraceResult> {
        if self.anchor.is_empty() || fragments.is_empty() {
            return None;
        }

        let candidates = find_anchor_candidates(fragments, &self.anchor, self.line_height);
        log::debug!("Anchor '{}': {} candidates", self.anchor, candidates.len());

        let mut best: Option<TraceResult> = None;
        for candidate in candidates {
            let Some(trace) = self.trace(fragments, candidate) else {
                continue;
            };
            log::trace!(
                "Trace from fragment {}: {} fragments, score {}",
                candidate.start,
                trace.len(),
                trace.total_score
            );
            if best.as_ref().map_or(true, |b| trace.total_score > b.total_score) {
                best = Some(trace);
            }
        }

        if let Some(trace) = &best {
            log::debug!(
                "Best trace starts at fragment {} with {} fragments, score {}",
                trace.anchor_index,
                trace.len(),
                trace.total_score
            );
        }
        best
    }

    /// Trace the text flow from one candidate.
    ///
    /// Returns `None` when the trace holds nothing but a bare anchor.
    pub fn trace(&self, fragments: &[TextFragment], candidate: AnchorCandidate) -> Option<TraceResult> {
        let members = self.walk(fragments, candidate);
        if members.len() == 1 && fragments[members[0]].text.trim().to_lowercase() == self.anchor {
            return None;
        }
        Some(self.score(fragments, candidate.start, &members))
    }

    /// Indices of the fragments collected from `candidate`, in trace order.
    fn walk(&self, fragments: &[TextFragment], candidate: AnchorCandidate) -> Vec<usize> {
        let lh = self.line_height;
        let anchor_rect = fragments[candidate.start].rect;

        let mut accepted = vec![candidate.start];
        accepted.extend(candidate.follower);

        // Everything below the anchor, plus the rest of the anchor's own line.
        let rects: Vec<Rect> = fragments.iter().map(|f| f.rect).collect();
        let remaining: Vec<usize> = reading_order_indices(&rects)
            .into_iter()
            .filter(|i| !accepted.contains(i))
            .filter(|&i| {
                let r = rects[i];
                r.top() >= anchor_rect.top()
                    || ((r.top() - anchor_rect.top()).abs() < lh && r.left() >= anchor_rect.left())
            })
            .collect();

        let mut last = rects[*accepted.last().unwrap_or(&candidate.start)];
        let mut content_left = accepted
            .iter()
            .map(|&i| rects[i].left())
            .fold(f32::INFINITY, f32::min);

        for i in remaining {
            let r = rects[i];
            if r.top() - last.top() > MAX_LINE_GAP * lh {
                log::trace!("Trace ends at fragment {}: vertical gap", i);
                break;
            }

            let same_line = (r.top() - last.top()).abs() < lh;
            let in_column = if same_line {
                r.left() - last.right() <= MAX_SAME_LINE_JUMP * lh
            } else {
                (r.left() - anchor_rect.left()).abs() <= COLUMN_ALIGNMENT * lh
            };
            if !in_column {
                continue;
            }

            // Footnotes in a neighbouring column do not end this one.
            if footnote_number(&fragments[i].text).is_some_and(|n| n != self.anchor) {
                log::trace!("Trace ends at fragment {}: next footnote", i);
                break;
            }

            let clearly_left = same_line && r.right() < content_left;
            if !clearly_left {
                accepted.push(i);
                last = r;
                content_left = content_left.min(r.left());
            }
        }

        accepted
    }

    fn score(&self, fragments: &[TextFragment], anchor_index: usize, members: &[usize]) -> TraceResult {
        let scorer = FragmentScorer::new(self.index);
        let texts = members.iter().map(|&i| fragments[i].text.as_str());

        let unique_term_count = count_terms_in(texts.clone(), self.index);
        let term_coverage = coverage_ratio(unique_term_count, self.index.len());

        let scored: Vec<ScoredFragment> = members
            .iter()
            .map(|&i| ScoredFragment::new(i, &fragments[i], scorer.score(&fragments[i].text)))
            .collect();
        let score_sum: i64 = scored.iter().map(|f| i64::from(f.score)).sum();

        let noise_penalty = if term_coverage < self.low_coverage_cutoff {
            let noise = NoiseEstimator::new(self.index).estimate(&join_fragment_texts(texts));
            (10.0 * noise.noise_ratio).round() as i64
        } else {
            0
        };

        let bounds = Rect::enclosing(scored.iter().map(|f| &f.rect))
            .unwrap_or(fragments[anchor_index].rect);

        TraceResult {
            total_score: TERM_WEIGHT * unique_term_count as i64 + score_sum - noise_penalty,
            fragments: scored,
            bounds,
            unique_term_count,
            term_coverage,
            anchor_index,
        }
    }
}
