// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::needless_range_loop)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # Region Locator
//!
//! Finds where a set of search terms sits on a rendered page, working from the
//! page's text layer: positioned text fragments with bounding rectangles.
//! Terms need not appear verbatim. Words split by line-break hyphenation,
//! fragmented by OCR, or scattered across a multi-column layout are still
//! located.
//!
//! ## Pipeline
//!
//! - **Term index**: normalized terms, hyphenation prefixes and an escaped
//!   containment pattern
//! - **Fragment scoring**: 0–10 per fragment (exact, prefix, containment, suffix)
//! - **Noise filtering**: drops fragments that are mostly unrelated words
//! - **Spatial clustering**: union-find over nearby fragments, split at column gaps
//! - **Ranking**: term coverage first, then score density
//! - **Acceptance ladder**: progressively relaxed size/height/width limits
//! - **Anchor tracing**: when a footnote number is given, follow the text flow
//!   from it instead of clustering
//!
//! ## Quick Start
//!
//! ```
//! use region_locator::config::LocatorConfig;
//! use region_locator::geometry::Rect;
//! use region_locator::layout::TextFragment;
//! use region_locator::search::RegionLocator;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let fragments = vec![
//!     TextFragment::new("4 Vgl. Schmidt,", Rect::new(40.0, 700.0, 90.0, 10.0)),
//!     TextFragment::new("Handbuch (1990), S. 12.", Rect::new(40.0, 712.0, 140.0, 10.0)),
//! ];
//!
//! let locator = RegionLocator::with_config(LocatorConfig::new().with_anchor_term("4"))?;
//! let found = locator.locate(&["Schmidt", "1990"], &fragments).expect("footnote 4");
//! assert!(found.is_trace());
//! assert_eq!(found.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Geometry and layout analysis
pub mod geometry;
pub mod layout;

// Term matching
pub mod terms;

// Ranking, tracing and selection
pub mod ranking;
pub mod search;
pub mod trace;

// Re-exports
pub use config::{LocatorConfig, RankingStrategyType};
pub use error::{Error, Result};
pub use geometry::Rect;
pub use layout::{Cluster, ScoredFragment, TextFragment};
pub use search::{locate_region, RegionLocator, RegionMatch};
pub use terms::TermIndex;
pub use trace::TraceResult;
