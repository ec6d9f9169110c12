//! Presentation helpers
//!
//! Turns an [`AnalysisResult`](crate::analysis::AnalysisResult) into text for
//! a terminal: the summary block, the filtered quote tables, and sampled curve
//! data for external plotting tools.

pub mod plot;
pub mod summary;

pub use plot::*;
pub use summary::*;
