//! Anchor-driven tracing.
//!
//! When the caller knows where the passage starts (typically a footnote
//! number), the text is followed in reading order from that anchor instead of
//! being clustered. The tracer runs in three stages:
//!
//! 1. find candidate anchor fragments
//! 2. trace the flow of text from each candidate
//! 3. keep the best-scoring trace

mod anchor;
mod tracer;

pub use anchor::{
    begins_with_letter, find_anchor_candidates, footnote_number, starts_with_anchor,
    AnchorCandidate,
};
pub use tracer::{AnchorTracer, TraceResult};
