//! Spatial clustering of scored fragments.
//!
//! Fragments are connected when their centers are close on BOTH axes, the
//! connected components are found with a union-find, and each component is
//! then cut wherever consecutive members (in horizontal center order) are
//! further apart than the column gap. The cut keeps a chain of vertically
//! stacked fragments from bridging two physical columns.
//!
//! The pairwise proximity check is quadratic in the number of fragments. Page
//! text layers stay in the hundreds to low thousands of fragments, which keeps
//! this affordable.

use serde::{Deserialize, Serialize};

use super::fragment::{join_fragment_texts, ScoredFragment};
use super::metrics::ClusterThresholds;
use super::reading_order::compare_reading_order;
use super::union_find::UnionFind;
use crate::geometry::Rect;
use crate::terms::TermIndex;

/// Width beyond which clusters start paying the wide-cluster penalty.
pub const WIDE_CLUSTER_WIDTH: f32 = 200.0;

/// Width step of the wide-cluster penalty.
pub const WIDE_CLUSTER_STEP: f32 = 100.0;

/// A spatially contiguous group of scored fragments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Members in reading order; never empty
    pub members: Vec<ScoredFragment>,
    /// Sum of member scores
    pub total_score: u32,
    /// Bounding box over member rectangles
    pub bounds: Rect,
    /// Distinct terms found in the cluster (set by coverage ranking)
    pub unique_term_count: Option<usize>,
    /// `unique_term_count / number of terms` (set by coverage ranking)
    pub term_coverage: Option<f64>,
}

impl Cluster {
    /// Build a cluster from its members. Returns `None` for an empty set.
    pub fn from_members(mut members: Vec<ScoredFragment>) -> Option<Self> {
        members.sort_by(|a, b| compare_reading_order(&a.rect, &b.rect).then(a.index.cmp(&b.index)));
        let bounds = Rect::enclosing(members.iter().map(|m| &m.rect))?;
        let total_score = members.iter().map(|m| u32::from(m.score)).sum();
        Some(Self {
            members,
            total_score,
            bounds,
            unique_term_count: None,
            term_coverage: None,
        })
    }

    /// Number of member fragments.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false; clusters are never empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Rectangles of the members, for per-fragment highlighting.
    pub fn highlight_boxes(&self) -> Vec<Rect> {
        self.members.iter().map(|m| m.rect).collect()
    }

    /// Score per unit of area, minus a penalty for implausibly wide clusters.
    pub fn density(&self, wide_penalty_weight: f64) -> f64 {
        let area = f64::from(self.bounds.area()).max(1.0);
        let excess = (self.bounds.width - WIDE_CLUSTER_WIDTH).max(0.0) / WIDE_CLUSTER_STEP;
        f64::from(self.total_score) / area - wide_penalty_weight * f64::from(excess)
    }

    /// Number of distinct terms found in the members.
    ///
    /// A term counts when it occurs in a single member or in the members'
    /// text joined in reading order with line-end hyphens removed.
    pub fn count_unique_terms(&self, index: &TermIndex) -> usize {
        count_terms_in(self.members.iter().map(|m| m.text.as_str()), index)
    }

    /// Record term coverage for this cluster.
    pub fn annotate_coverage(&mut self, index: &TermIndex) {
        let unique = self.count_unique_terms(index);
        self.unique_term_count = Some(unique);
        self.term_coverage = Some(coverage_ratio(unique, index.len()));
    }
}

/// Count distinct terms across `texts` (individually and hyphen-joined).
pub(crate) fn count_terms_in<'a, I>(texts: I, index: &TermIndex) -> usize
where
    I: IntoIterator<Item = &'a str> + Clone,
{
    let lowered: Vec<String> = texts.clone().into_iter().map(str::to_lowercase).collect();
    let joined = join_fragment_texts(texts);
    index
        .terms()
        .filter(|term| joined.contains(term) || lowered.iter().any(|t| t.contains(term)))
        .count()
}

/// `unique / total`, 0 when there are no terms.
pub(crate) fn coverage_ratio(unique: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        unique as f64 / total as f64
    }
}

/// Group fragments into spatial clusters.
///
/// # Examples
///
/// ```
/// use region_locator::geometry::Rect;
/// use region_locator::layout::{cluster_by_proximity, ClusterThresholds, ScoredFragment, TextFragment};
/// use region_locator::terms::{FragmentScore, MatchKind};
///
/// let score = FragmentScore { score: 5, kind: MatchKind::Contained };
/// let fragments: Vec<ScoredFragment> = [0.0, 20.0, 400.0]
///     .iter()
///     .enumerate()
///     .map(|(i, y)| ScoredFragment::new(i, &TextFragment::new("x", Rect::new(0.0, *y, 50.0, 12.0)), score))
///     .collect();
///
/// let thresholds = ClusterThresholds { vertical: 56.0, horizontal: 210.0, column_gap: 120.0 };
/// let clusters = cluster_by_proximity(&fragments, &thresholds);
/// assert_eq!(clusters.len(), 2);
/// assert_eq!(clusters[0].len(), 2);
/// assert_eq!(clusters[0].total_score, 10);
/// ```
pub fn cluster_by_proximity(
    fragments: &[ScoredFragment],
    thresholds: &ClusterThresholds,
) -> Vec<Cluster> {
    if fragments.is_empty() {
        return vec![];
    }

    let centers: Vec<_> = fragments.iter().map(|f| f.rect.center()).collect();
    let mut sets = UnionFind::new(fragments.len());

    for i in 0..fragments.len() {
        for j in (i + 1)..fragments.len() {
            let dy = (centers[i].y - centers[j].y).abs();
            let dx = (centers[i].x - centers[j].x).abs();
            if dy <= thresholds.vertical && dx <= thresholds.horizontal {
                sets.union(i, j);
            }
        }
    }

    let raw_groups = sets.groups();
    log::trace!("Union-find produced {} raw clusters", raw_groups.len());

    let mut clusters = Vec::new();
    for mut group in raw_groups {
        group.sort_by(|&a, &b| centers[a].x.total_cmp(&centers[b].x).then(a.cmp(&b)));

        let mut segment: Vec<ScoredFragment> = Vec::new();
        let mut prev_x: Option<f32> = None;
        for idx in group {
            let x = centers[idx].x;
            if prev_x.is_some_and(|px| x - px > thresholds.column_gap) {
                clusters.extend(Cluster::from_members(std::mem::take(&mut segment)));
            }
            segment.push(fragments[idx].clone());
            prev_x = Some(x);
        }
        clusters.extend(Cluster::from_members(segment));
    }

    log::debug!(
        "Clustered {} fragments into {} clusters",
        fragments.len(),
        clusters.len()
    );
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::TextFragment;
    use crate::terms::{FragmentScore, MatchKind};

    fn scored(index: usize, text: &str, x: f32, y: f32, w: f32) -> ScoredFragment {
        ScoredFragment::new(
            index,
            &TextFragment::new(text, Rect::new(x, y, w, 12.0)),
            FragmentScore {
                score: 5,
                kind: MatchKind::Contained,
            },
        )
    }

    fn thresholds() -> ClusterThresholds {
        ClusterThresholds {
            vertical: 56.0,
            horizontal: 210.0,
            column_gap: 120.0,
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(cluster_by_proximity(&[], &thresholds()).is_empty());
    }

    #[test]
    fn test_singleton_bounds_equal_rect() {
        let f = scored(0, "a", 10.0, 20.0, 30.0);
        let clusters = cluster_by_proximity(std::slice::from_ref(&f), &thresholds());
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].bounds, f.rect);
        assert_eq!(clusters[0].total_score, 5);
    }

    #[test]
    fn test_both_axes_must_hold() {
        // vertically close but horizontally far
        let fragments = vec![scored(0, "a", 0.0, 0.0, 20.0), scored(1, "b", 400.0, 0.0, 20.0)];
        assert_eq!(cluster_by_proximity(&fragments, &thresholds()).len(), 2);
    }

    #[test]
    fn test_column_gap_splits_connected_chain() {
        let t = ClusterThresholds {
            vertical: 56.0,
            horizontal: 300.0,
            column_gap: 120.0,
        };
        let fragments = vec![
            scored(0, "left", 0.0, 0.0, 40.0),
            scored(1, "left", 0.0, 14.0, 40.0),
            scored(2, "right", 250.0, 7.0, 40.0),
        ];
        let clusters = cluster_by_proximity(&fragments, &t);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].members.iter().map(|m| m.index).collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(clusters[1].members[0].index, 2);
    }

    #[test]
    fn test_members_in_reading_order() {
        let fragments = vec![
            scored(0, "second", 0.0, 20.0, 40.0),
            scored(1, "first", 60.0, 0.0, 40.0),
        ];
        let clusters = cluster_by_proximity(&fragments, &thresholds());
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].members[0].index, 1);
        assert_eq!(clusters[0].bounds, Rect::new(0.0, 0.0, 100.0, 32.0));
    }

    #[test]
    fn test_density_penalizes_width() {
        let narrow = Cluster::from_members(vec![scored(0, "a", 0.0, 0.0, 100.0)]).unwrap();
        let wide = Cluster::from_members(vec![scored(0, "a", 0.0, 0.0, 500.0)]).unwrap();
        assert!(narrow.density(0.001) > wide.density(0.001));
        let expected = 5.0 / 6000.0 - 0.001 * 3.0;
        assert!((wide.density(0.001) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_coverage_joins_hyphenated_lines() {
        let index = TermIndex::new(&["gianna", "rossi"]);
        let mut cluster = Cluster::from_members(vec![
            scored(0, "Gian-", 0.0, 0.0, 40.0),
            scored(1, "na accepted", 0.0, 14.0, 80.0),
        ])
        .unwrap();
        cluster.annotate_coverage(&index);
        assert_eq!(cluster.unique_term_count, Some(1));
        assert_eq!(cluster.term_coverage, Some(0.5));
    }
}
