//! Density-only cluster ranking.

use std::cmp::Ordering;

use super::ClusterRanking;
use crate::layout::{compare_reading_order, Cluster};
use crate::terms::TermIndex;

/// Compare two clusters by density (higher first), then reading order.
pub fn compare_density(a: &Cluster, b: &Cluster, wide_penalty_weight: f64) -> Ordering {
    b.density(wide_penalty_weight)
        .total_cmp(&a.density(wide_penalty_weight))
        .then_with(|| compare_reading_order(&a.bounds, &b.bounds))
}

/// Ranks clusters by score density.
#[derive(Debug, Clone, Copy)]
pub struct DensityRanking {
    wide_penalty_weight: f64,
}

impl DensityRanking {
    /// Create a density ranking with the given wide-cluster penalty weight.
    pub fn new(wide_penalty_weight: f64) -> Self {
        Self {
            wide_penalty_weight,
        }
    }
}

impl ClusterRanking for DensityRanking {
    fn rank(&self, mut clusters: Vec<Cluster>, _index: &TermIndex) -> Vec<Cluster> {
        clusters.sort_by(|a, b| compare_density(a, b, self.wide_penalty_weight));
        clusters
    }

    fn name(&self) -> &'static str {
        "density"
    }
}
