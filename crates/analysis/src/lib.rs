//! # Analysis
//!
//! Sends one conversation's aggregated text to the analysis model and returns the report.
//!
//! - [`ConversationAnalyzer`]: the entry point; one call per conversation.
//! - [`AnalysisPolicy`]: timeout, retry and segmentation knobs.
//! - [`split_segments`]: line-boundary splitting with overlap for oversized conversations.
//! - [`AnalysisFailure`]: the only error a caller sees; it never aborts other conversations.

mod analyzer;
mod error;
mod policy;
mod segment;

pub use analyzer::ConversationAnalyzer;
pub use error::AnalysisFailure;
pub use policy::{
    AnalysisPolicy, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_BACKOFF_MS, DEFAULT_SEGMENT_MAX_CHARS,
    DEFAULT_SEGMENT_OVERLAP_CHARS, DEFAULT_TIMEOUT_SECS, MAX_RETRY_BACKOFF,
};
pub use segment::split_segments;
