//! A/B scenario comparison.
//!
//! [`compare_scenarios`] is the pure per-stage delta computation;
//! [`Comparator`] wraps it with the inputs, metadata and a summary for reports.

pub mod comparator;
pub mod types;

pub use comparator::{compare_scenarios, percent_change, Comparator};
pub use types::{
    ComparisonMetadata, ComparisonResult, ComparisonSummary, DeltaReport, MrrTrend,
    ScenarioSnapshot, StageDelta,
};
