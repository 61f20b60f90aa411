//! Serializable diagnostics returned alongside pipeline results.
//!
//! `ReportSummary` is the compact, JSON-friendly view of a
//! [`StereoReport`](crate::pipeline::StereoReport); `TimingBreakdown`
//! records how long every stage took.

pub mod summary;
pub mod timing;

pub use summary::{PhaseStageSummary, ReportSummary};
pub use timing::{elapsed_ms, Stage, StageTiming, TimingBreakdown};
