//! Configuration for locating terms on a page.
//!
//! Distances are expressed in lines and characters rather than page units;
//! [`crate::layout::PageMetrics`] converts them using the line height estimated
//! from the page's own fragments.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Which ordering ranks candidate clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingStrategyType {
    /// Score density only (score per unit area, wide clusters penalized)
    Density,
    /// Distinct-term coverage first, density as the tie-break
    #[default]
    TermCoverage,
}

/// Locator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// Minimum number of fragments for a cluster to be accepted outright.
    pub min_cluster_size: usize,

    /// Maximum accepted cluster height, in lines.
    pub max_lines: f32,

    /// Vertical clustering threshold, in lines.
    pub vertical_threshold_lines: f32,

    /// Horizontal clustering threshold and maximum cluster width, in characters.
    pub horizontal_threshold_chars: f32,

    /// Horizontal clustering threshold used when no anchor is given.
    ///
    /// The effective threshold is the smaller of this and
    /// `horizontal_threshold_chars`.
    pub anchor_free_horizontal_chars: f32,

    /// Optional anchor term (typically a footnote number).
    pub anchor_term: Option<String>,

    /// Fragments with at least two tokens and a higher noise ratio are dropped.
    pub noise_threshold: f64,

    /// Noise threshold used for anchor searches.
    pub anchor_noise_threshold: f64,

    /// Center-to-center horizontal distance that splits a cluster into columns.
    pub column_gap: f32,

    /// Coverage difference above which coverage alone decides the ranking.
    pub coverage_delta: f64,

    /// Traces covering fewer terms than this fraction pay the noise penalty.
    pub trace_low_coverage_cutoff: f64,

    /// Weight of the penalty for clusters wider than 200 units.
    pub wide_cluster_penalty_weight: f64,

    /// Ranking strategy for clusters.
    pub ranking: RankingStrategyType,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LocatorConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self {
            min_cluster_size: 5,
            max_lines: 8.0,
            vertical_threshold_lines: 4.0,
            horizontal_threshold_chars: 60.0,
            anchor_free_horizontal_chars: 25.0,
            anchor_term: None,
            noise_threshold: 0.7,
            anchor_noise_threshold: 0.8,
            column_gap: 120.0,
            coverage_delta: 0.1,
            trace_low_coverage_cutoff: 0.3,
            wide_cluster_penalty_weight: 0.001,
            ranking: RankingStrategyType::TermCoverage,
        }
    }

    /// Set the minimum cluster size.
    pub fn with_min_cluster_size(mut self, size: usize) -> Self {
        self.min_cluster_size = size;
        self
    }

    /// Set the maximum cluster height in lines.
    pub fn with_max_lines(mut self, lines: f32) -> Self {
        self.max_lines = lines;
        self
    }

    /// Set the vertical clustering threshold in lines.
    pub fn with_vertical_threshold_lines(mut self, lines: f32) -> Self {
        self.vertical_threshold_lines = lines;
        self
    }

    /// Set the horizontal clustering threshold in characters.
    pub fn with_horizontal_threshold_chars(mut self, chars: f32) -> Self {
        self.horizontal_threshold_chars = chars;
        self
    }

    /// Set the anchor term. Blank anchors are treated as absent.
    pub fn with_anchor_term(mut self, anchor: impl Into<String>) -> Self {
        let anchor = anchor.into();
        self.anchor_term = if anchor.trim().is_empty() {
            None
        } else {
            Some(anchor)
        };
        self
    }

    /// Set the column gap threshold.
    pub fn with_column_gap(mut self, gap: f32) -> Self {
        self.column_gap = gap;
        self
    }

    /// Set the ranking strategy.
    pub fn with_ranking(mut self, ranking: RankingStrategyType) -> Self {
        self.ranking = ranking;
        self
    }

    /// Normalized anchor (lower-cased, trimmed), if any.
    pub fn normalized_anchor(&self) -> Option<String> {
        self.anchor_term
            .as_deref()
            .map(|a| a.trim().to_lowercase())
            .filter(|a| !a.is_empty())
    }

    /// Noise threshold in effect for this configuration.
    pub fn effective_noise_threshold(&self) -> f64 {
        if self.normalized_anchor().is_some() {
            self.anchor_noise_threshold
        } else {
            self.noise_threshold
        }
    }

    /// Horizontal clustering threshold in characters, tightened without anchor.
    pub fn effective_horizontal_chars(&self) -> f32 {
        if self.normalized_anchor().is_some() {
            self.horizontal_threshold_chars
        } else {
            self.horizontal_threshold_chars
                .min(self.anchor_free_horizontal_chars)
        }
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> Result<()> {
        if self.min_cluster_size == 0 {
            return Err(Error::InvalidConfig(
                "min_cluster_size must be at least 1".to_string(),
            ));
        }

        let positive = [
            ("max_lines", self.max_lines),
            ("vertical_threshold_lines", self.vertical_threshold_lines),
            ("horizontal_threshold_chars", self.horizontal_threshold_chars),
            ("anchor_free_horizontal_chars", self.anchor_free_horizontal_chars),
            ("column_gap", self.column_gap),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        let ratios = [
            ("noise_threshold", self.noise_threshold),
            ("anchor_noise_threshold", self.anchor_noise_threshold),
            ("coverage_delta", self.coverage_delta),
            ("trace_low_coverage_cutoff", self.trace_low_coverage_cutoff),
        ];
        for (name, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be within 0..=1, got {}",
                    name, value
                )));
            }
        }

        if !self.wide_cluster_penalty_weight.is_finite() || self.wide_cluster_penalty_weight < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "wide_cluster_penalty_weight must be non-negative, got {}",
                self.wide_cluster_penalty_weight
            )));
        }

        Ok(())
    }
}
