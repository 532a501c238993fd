use serde::{Deserialize, Serialize};

use crate::core::{ScenarioInput, ScenarioMetrics, Stage, STAGE_COUNT};

/// Difference between scenario B and scenario A at one funnel stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageDelta {
    pub stage: Stage,
    /// `b - a`
    pub absolute_delta: f64,
    /// `100 * (b - a) / a`; `None` when the baseline is zero.
    pub percent_delta: Option<f64>,
    /// Dollar impact, present only on the Retained stage.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dollar_delta: Option<f64>,
}

/// Per-stage deltas plus the MRR difference between two scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeltaReport {
    pub stages: [StageDelta; STAGE_COUNT],
    pub mrr_delta: f64,
}

impl DeltaReport {
    pub fn get(&self, stage: Stage) -> &StageDelta {
        &self.stages[stage.index()]
    }

    /// Dollar impact at the Retained stage.
    pub fn retained_dollar_delta(&self) -> f64 {
        self.get(Stage::Retained).dollar_delta.unwrap_or(0.0)
    }

    pub fn mrr_trend(&self) -> MrrTrend {
        MrrTrend::from_delta(self.mrr_delta)
    }

    /// True when every stage and the MRR are unchanged.
    pub fn is_unchanged(&self) -> bool {
        self.mrr_delta == 0.0 && self.stages.iter().all(|d| d.absolute_delta == 0.0)
    }
}

/// Direction of the MRR change from A to B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MrrTrend {
    Growing,
    Shrinking,
    Flat,
}

impl MrrTrend {
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            MrrTrend::Growing
        } else if delta < 0.0 {
            MrrTrend::Shrinking
        } else {
            MrrTrend::Flat
        }
    }
}

/// One side of a comparison: what went in and what came out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSnapshot {
    pub input: ScenarioInput,
    pub metrics: ScenarioMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonMetadata {
    pub comparison_date: String,
    pub tool_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub mrr_trend: MrrTrend,
    /// Stage with the largest relative change, ignoring zero baselines.
    pub largest_relative_change: Option<Stage>,
    /// Stages whose percent delta is undefined because A is zero there.
    pub undefined_percent_stages: Vec<Stage>,
}

/// Full A/B comparison, as emitted by the `compare` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub metadata: ComparisonMetadata,
    pub scenario_a: ScenarioSnapshot,
    pub scenario_b: ScenarioSnapshot,
    pub deltas: DeltaReport,
    pub summary: ComparisonSummary,
}
