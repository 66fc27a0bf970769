//! Locating search terms on a page.
//!
//! This module ties the pipeline together: anchor tracing when an anchor is
//! given, otherwise scoring, noise filtering, clustering and ranking, followed
//! by a relaxation ladder of acceptance criteria.
//!
//! ## Example
//!
//! ```
//! use region_locator::geometry::Rect;
//! use region_locator::layout::TextFragment;
//! use region_locator::search::RegionLocator;
//!
//! let fragments = vec![
//!     TextFragment::new("Dr. Gian-", Rect::new(40.0, 100.0, 60.0, 12.0)),
//!     TextFragment::new("na Rossi", Rect::new(40.0, 114.0, 55.0, 12.0)),
//!     TextFragment::new("Unrelated heading", Rect::new(40.0, 600.0, 140.0, 12.0)),
//! ];
//!
//! let locator = RegionLocator::new();
//! match locator.locate(&["Gianna", "Rossi"], &fragments) {
//!     Some(found) => println!("highlight {:?}", found.bounds()),
//!     None => println!("not on this page"),
//! }
//! ```

mod region;
mod selector;

pub use region::RegionMatch;
pub use selector::{locate_region, score_fragments, RegionLocator};
