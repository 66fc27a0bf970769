//! Resolution-independent page metrics.
//!
//! Every distance threshold is derived from the line height estimated from
//! the fragments themselves, so the same configuration works at any zoom.

use serde::{Deserialize, Serialize};

use super::TextFragment;
use crate::config::LocatorConfig;

/// Line height assumed when the page has no usable fragments.
pub const DEFAULT_LINE_HEIGHT: f32 = 14.0;

/// Number of fragments sampled for the line height estimate.
pub const LINE_HEIGHT_SAMPLE: usize = 10;

/// Average character width as a fraction of line height.
pub const CHAR_WIDTH_RATIO: f32 = 0.6;

/// Distance thresholds for the clusterer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterThresholds {
    /// Maximum |Δ center.y| for two fragments to connect
    pub vertical: f32,
    /// Maximum |Δ center.x| for two fragments to connect
    pub horizontal: f32,
    /// Center-to-center horizontal distance that splits columns
    pub column_gap: f32,
}

/// Metrics derived from a page's fragments and a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageMetrics {
    /// Estimated average line height
    pub line_height: f32,
    /// Estimated average character width
    pub char_width: f32,
    /// Clustering thresholds
    pub thresholds: ClusterThresholds,
    /// Maximum accepted cluster width
    pub max_width: f32,
    /// Maximum accepted cluster height
    pub max_height: f32,
}

impl PageMetrics {
    /// Derive metrics for `fragments` under `config`.
    ///
    /// # Examples
    ///
    /// ```
    /// use region_locator::config::LocatorConfig;
    /// use region_locator::layout::PageMetrics;
    ///
    /// let metrics = PageMetrics::derive(&[], &LocatorConfig::default());
    /// assert_eq!(metrics.line_height, 14.0);
    /// assert_eq!(metrics.thresholds.vertical, 56.0);
    /// ```
    pub fn derive(fragments: &[TextFragment], config: &LocatorConfig) -> Self {
        let line_height = estimate_line_height(fragments);
        let char_width = line_height * CHAR_WIDTH_RATIO;
        let metrics = Self {
            line_height,
            char_width,
            thresholds: ClusterThresholds {
                vertical: line_height * config.vertical_threshold_lines,
                horizontal: char_width * config.effective_horizontal_chars(),
                column_gap: config.column_gap,
            },
            max_width: char_width * config.horizontal_threshold_chars,
            max_height: line_height * config.max_lines,
        };
        log::debug!(
            "Page metrics: line_height={:.1} char_width={:.1} vertical={:.1} horizontal={:.1} max={:.1}x{:.1}",
            metrics.line_height,
            metrics.char_width,
            metrics.thresholds.vertical,
            metrics.thresholds.horizontal,
            metrics.max_width,
            metrics.max_height
        );
        metrics
    }
}

/// Average height of the first [`LINE_HEIGHT_SAMPLE`] fragments with a
/// positive, finite height.
pub fn estimate_line_height(fragments: &[TextFragment]) -> f32 {
    let sample: Vec<f32> = fragments
        .iter()
        .map(|f| f.rect.height)
        .filter(|h| h.is_finite() && *h > 0.0)
        .take(LINE_HEIGHT_SAMPLE)
        .collect();

    if sample.is_empty() {
        DEFAULT_LINE_HEIGHT
    } else {
        sample.iter().sum::<f32>() / sample.len() as f32
    }
}
