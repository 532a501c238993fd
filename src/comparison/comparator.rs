use crate::comparison::types::*;
use crate::core::{ScenarioInput, ScenarioMetrics, Stage, StageValues};
use crate::metrics::compute_scenario;

/// Compute per-stage deltas of B against A.
///
/// `fee_b` is scenario B's monthly fee, used for the dollar impact at the
/// Retained stage. Percent deltas against a zero baseline are `None`.
pub fn compare_scenarios(a: &ScenarioMetrics, b: &ScenarioMetrics, fee_b: f64) -> DeltaReport {
    let stages = Stage::ALL.map(|stage| stage_delta(stage, &a.stages, &b.stages, fee_b));

    DeltaReport {
        stages,
        mrr_delta: b.mrr.mrr - a.mrr.mrr,
    }
}

fn stage_delta(stage: Stage, a: &StageValues, b: &StageValues, fee_b: f64) -> StageDelta {
    let baseline = a[stage];
    let absolute_delta = b[stage] - baseline;

    StageDelta {
        stage,
        absolute_delta,
        percent_delta: percent_change(absolute_delta, baseline),
        dollar_delta: (stage == Stage::Retained).then(|| absolute_delta * fee_b),
    }
}

/// `100 * delta / baseline`, or `None` when the baseline is zero.
pub fn percent_change(delta: f64, baseline: f64) -> Option<f64> {
    if baseline == 0.0 {
        None
    } else {
        Some(100.0 * delta / baseline)
    }
}

/// Compares two scenario inputs end to end.
pub struct Comparator {
    a: ScenarioSnapshot,
    b: ScenarioSnapshot,
}

impl Comparator {
    pub fn new(a: ScenarioInput, b: ScenarioInput) -> Self {
        Self {
            a: ScenarioSnapshot {
                input: a,
                metrics: compute_scenario(&a),
            },
            b: ScenarioSnapshot {
                input: b,
                metrics: compute_scenario(&b),
            },
        }
    }

    /// Perform full comparison
    pub fn compare(&self) -> ComparisonResult {
        let deltas = compare_scenarios(&self.a.metrics, &self.b.metrics, self.b.input.monthly_fee);
        let summary = self.generate_summary(&deltas);

        ComparisonResult {
            metadata: self.build_metadata(),
            scenario_a: self.a,
            scenario_b: self.b,
            deltas,
            summary,
        }
    }

    fn generate_summary(&self, deltas: &DeltaReport) -> ComparisonSummary {
        let largest_relative_change = deltas
            .stages
            .iter()
            .filter_map(|d| d.percent_delta.map(|pct| (d.stage, pct.abs())))
            .filter(|(_, pct)| *pct > 0.0)
            .fold(None, |best: Option<(Stage, f64)>, (stage, pct)| match best {
                Some((_, best_pct)) if best_pct >= pct => best,
                _ => Some((stage, pct)),
            })
            .map(|(stage, _)| stage);

        let undefined_percent_stages = deltas
            .stages
            .iter()
            .filter(|d| d.percent_delta.is_none())
            .map(|d| d.stage)
            .collect();

        ComparisonSummary {
            mrr_trend: deltas.mrr_trend(),
            largest_relative_change,
            undefined_percent_stages,
        }
    }

    fn build_metadata(&self) -> ComparisonMetadata {
        ComparisonMetadata {
            comparison_date: chrono::Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
