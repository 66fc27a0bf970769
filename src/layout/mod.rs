//! Layout analysis over a page's positioned text fragments.
//!
//! This module provides:
//! - Fragment types ([`TextFragment`], [`ScoredFragment`])
//! - Resolution-independent page metrics (line height, character width)
//! - Reading order
//! - Union-find clustering with column-gap splitting

pub mod clustering;
pub mod fragment;
pub mod metrics;
pub mod reading_order;
pub mod union_find;

// Re-export main types
pub use clustering::{cluster_by_proximity, Cluster};
pub use fragment::{join_fragment_texts, ScoredFragment, TextFragment, PREVIEW_CHARS};
pub use metrics::{estimate_line_height, ClusterThresholds, PageMetrics, DEFAULT_LINE_HEIGHT};
pub use reading_order::{compare_reading_order, reading_order_indices};
pub use union_find::UnionFind;
