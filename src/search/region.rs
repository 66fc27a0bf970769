//! The located region handed to overlay and viewport consumers.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::layout::{Cluster, ScoredFragment};
use crate::trace::TraceResult;

/// A located region: either a spatial cluster or an anchor trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegionMatch {
    /// Found by clustering
    Cluster(Cluster),
    /// Found by following text from an anchor
    Trace(TraceResult),
}

impl RegionMatch {
    /// Bounding box of the whole region.
    pub fn bounds(&self) -> Rect {
        match self {
            RegionMatch::Cluster(c) => c.bounds,
            RegionMatch::Trace(t) => t.bounds,
        }
    }

    /// Member fragments in reading (or trace) order.
    pub fn fragments(&self) -> &[ScoredFragment] {
        match self {
            RegionMatch::Cluster(c) => &c.members,
            RegionMatch::Trace(t) => &t.fragments,
        }
    }

    /// Rectangles of the member fragments, for per-fragment highlights.
    pub fn highlight_boxes(&self) -> Vec<Rect> {
        self.fragments().iter().map(|f| f.rect).collect()
    }

    /// Score of the region.
    pub fn total_score(&self) -> i64 {
        match self {
            RegionMatch::Cluster(c) => i64::from(c.total_score),
            RegionMatch::Trace(t) => t.total_score,
        }
    }

    /// Distinct terms found, when known.
    pub fn unique_term_count(&self) -> Option<usize> {
        match self {
            RegionMatch::Cluster(c) => c.unique_term_count,
            RegionMatch::Trace(t) => Some(t.unique_term_count),
        }
    }

    /// Share of distinct terms found, when known.
    pub fn term_coverage(&self) -> Option<f64> {
        match self {
            RegionMatch::Cluster(c) => c.term_coverage,
            RegionMatch::Trace(t) => Some(t.term_coverage),
        }
    }

    /// Number of member fragments.
    pub fn len(&self) -> usize {
        self.fragments().len()
    }

    /// Whether the region holds no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments().is_empty()
    }

    /// Whether the region came from anchor tracing.
    pub fn is_trace(&self) -> bool {
        matches!(self, RegionMatch::Trace(_))
    }
}
