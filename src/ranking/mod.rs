//! Cluster ranking strategies.
//!
//! Both strategies produce a deterministic order over the same clusters:
//!
//! - [`DensityRanking`]: score per unit area, wide clusters penalized, ties in
//!   reading order
//! - [`CoverageRanking`]: share of distinct terms present first, density as
//!   the fallback

mod coverage;
mod density;

pub use coverage::CoverageRanking;
pub use density::{compare_density, DensityRanking};

use crate::config::{LocatorConfig, RankingStrategyType};
use crate::layout::Cluster;
use crate::terms::TermIndex;

/// Trait for ordering candidate clusters, best first.
pub trait ClusterRanking: Send + Sync {
    /// Order `clusters` best first.
    ///
    /// Implementations may annotate clusters (term coverage) on the way.
    fn rank(&self, clusters: Vec<Cluster>, index: &TermIndex) -> Vec<Cluster>;

    /// Return the name of this strategy for debugging.
    fn name(&self) -> &'static str;
}

/// Create a ranking strategy based on configuration.
pub fn create_ranking(config: &LocatorConfig) -> Box<dyn ClusterRanking> {
    match config.ranking {
        RankingStrategyType::Density => {
            Box::new(DensityRanking::new(config.wide_cluster_penalty_weight))
        },
        RankingStrategyType::TermCoverage => Box::new(CoverageRanking::new(
            config.coverage_delta,
            config.wide_cluster_penalty_weight,
        )),
    }
}
