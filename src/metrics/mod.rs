//! Funnel metrics calculation.
//!
//! Turns a [`ScenarioInput`] into stage counts and MRR. The arithmetic order is
//! fixed so results are reproducible bit for bit; every step divides by the
//! literal 100 only, so there is no divide-by-zero path.

use crate::core::{MrrResult, ScenarioInput, ScenarioMetrics, StageValues};

/// Compute stage counts and MRR for one scenario.
///
/// Any numeric input produces a numeric result, including negative or
/// out-of-range rates. Domain checks live in [`crate::validation`].
///
/// # Example
///
/// ```rust
/// use bowtie::core::ScenarioInput;
/// use bowtie::metrics::compute_metrics;
///
/// let (stages, mrr) = compute_metrics(&ScenarioInput::default());
/// assert_eq!(stages[1], 250.0);
/// assert_eq!(mrr.mrr, 87.890625);
/// ```
pub fn compute_metrics(input: &ScenarioInput) -> (StageValues, MrrResult) {
    let [cr1, cr2, cr3, cr4] = input.conversion_rates;

    let prospects = input.lead_count;
    let mql = prospects * cr1 / 100.0;
    let sql = mql * cr2 / 100.0;
    let opportunities = sql * cr3 / 100.0;
    let won = opportunities * cr4 / 100.0;
    let retained = won * (1.0 - input.churn_or_upsell_rate / 100.0);
    let mrr = retained * input.monthly_fee;

    (
        StageValues::new([prospects, mql, sql, opportunities, won, retained]),
        MrrResult { mrr },
    )
}

/// Same as [`compute_metrics`], bundled for callers that keep both halves together.
pub fn compute_scenario(input: &ScenarioInput) -> ScenarioMetrics {
    let (stages, mrr) = compute_metrics(input);
    ScenarioMetrics { stages, mrr }
}
