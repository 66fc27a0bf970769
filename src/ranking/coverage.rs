//! Term-coverage-aware cluster ranking.
//!
//! A cluster touching more of the distinct query terms beats one that merely
//! repeats a single term densely. Coverage only decides when the difference
//! exceeds the configured delta; closer clusters fall back to density.

use std::cmp::Ordering;

use super::{compare_density, ClusterRanking};
use crate::layout::Cluster;
use crate::terms::TermIndex;

/// Ranks clusters by term coverage, then density.
#[derive(Debug, Clone, Copy)]
pub struct CoverageRanking {
    coverage_delta: f64,
    wide_penalty_weight: f64,
}

impl CoverageRanking {
    /// Create a coverage ranking.
    pub fn new(coverage_delta: f64, wide_penalty_weight: f64) -> Self {
        Self {
            coverage_delta,
            wide_penalty_weight,
        }
    }

    fn compare(&self, a: &Cluster, b: &Cluster) -> Ordering {
        let ca = a.term_coverage.unwrap_or(0.0);
        let cb = b.term_coverage.unwrap_or(0.0);
        if (ca - cb).abs() > self.coverage_delta {
            cb.total_cmp(&ca)
        } else {
            compare_density(a, b, self.wide_penalty_weight)
        }
    }
}

impl ClusterRanking for CoverageRanking {
    fn rank(&self, mut clusters: Vec<Cluster>, index: &TermIndex) -> Vec<Cluster> {
        for cluster in clusters.iter_mut() {
            cluster.annotate_coverage(index);
        }

        // Start from the density order so equal-coverage runs are already
        // settled, then apply the coverage tolerance with a stable insertion
        // sort: the tolerance makes the comparison non-transitive, which
        // `sort_by` does not accept.
        clusters.sort_by(|a, b| compare_density(a, b, self.wide_penalty_weight));
        for i in 1..clusters.len() {
            let mut j = i;
            while j > 0 && self.compare(&clusters[j - 1], &clusters[j]) == Ordering::Greater {
                clusters.swap(j - 1, j);
                j -= 1;
            }
        }
        clusters
    }

    fn name(&self) -> &'static str {
        "term-coverage"
    }
}
