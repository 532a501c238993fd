//! Core funnel types shared by the engine, the comparison reporter and the views.
//!
//! The bowtie funnel always has six stages in a fixed order. Stage counts are
//! carried as [`StageValues`], indexed either by position or by [`Stage`].

pub mod errors;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

pub use errors::{Error, Result};

/// Number of funnel stages.
pub const STAGE_COUNT: usize = 6;

/// Number of sequential conversion rates (prospect -> won).
pub const CONVERSION_RATE_COUNT: usize = 4;

/// Default lead count used to bootstrap both scenarios.
pub const DEFAULT_LEAD_COUNT: f64 = 1000.0;
/// Default value for every conversion rate (percent).
pub const DEFAULT_CONVERSION_RATE: f64 = 25.0;
/// Default churn rate (percent).
pub const DEFAULT_CHURN_RATE: f64 = 25.0;
/// Default monthly fee per retained customer.
pub const DEFAULT_MONTHLY_FEE: f64 = 30.0;

/// A stage of the bowtie funnel, in funnel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Prospects,
    Mql,
    Sql,
    Opportunities,
    Won,
    Retained,
}

impl Stage {
    /// All stages in funnel order.
    pub const ALL: [Stage; STAGE_COUNT] = [
        Stage::Prospects,
        Stage::Mql,
        Stage::Sql,
        Stage::Opportunities,
        Stage::Won,
        Stage::Retained,
    ];

    /// Position of the stage in the funnel (0 = Prospects).
    pub const fn index(self) -> usize {
        match self {
            Stage::Prospects => 0,
            Stage::Mql => 1,
            Stage::Sql => 2,
            Stage::Opportunities => 3,
            Stage::Won => 4,
            Stage::Retained => 5,
        }
    }

    pub fn from_index(index: usize) -> Option<Stage> {
        Self::ALL.get(index).copied()
    }

    /// Short label used on charts and in delta lines.
    pub const fn label(self) -> &'static str {
        match self {
            Stage::Prospects => "Prospects/Leads",
            Stage::Mql => "MQL",
            Stage::Sql => "SQL",
            Stage::Opportunities => "Opportunities",
            Stage::Won => "Won",
            Stage::Retained => "Retained",
        }
    }

    /// Longer description shown as a tooltip next to the focused input.
    pub const fn tooltip(self) -> &'static str {
        match self {
            Stage::Prospects => "Raw prospects or leads entering the top of the funnel",
            Stage::Mql => "Marketing Qualified Leads: prospects marketing deems worth pursuing",
            Stage::Sql => "Sales Qualified Leads: MQLs accepted by sales for active follow-up",
            Stage::Opportunities => "SQLs that showed up and were handed off as real deals",
            Stage::Won => "Opportunities closed as paying customers",
            Stage::Retained => "Won customers remaining after onboarding churn or upsell",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifies one of the two side-by-side scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioId {
    A,
    B,
}

impl ScenarioId {
    /// The scenario on the other side of the comparison.
    pub const fn other(self) -> ScenarioId {
        match self {
            ScenarioId::A => ScenarioId::B,
            ScenarioId::B => ScenarioId::A,
        }
    }

    /// Panel side name, as shown in MRR labels.
    pub const fn side(self) -> &'static str {
        match self {
            ScenarioId::A => "Left",
            ScenarioId::B => "Right",
        }
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioId::A => f.write_str("A"),
            ScenarioId::B => f.write_str("B"),
        }
    }
}

/// Input parameters of one scenario.
///
/// Rates are percentages. Nothing here is range-checked; see
/// [`crate::validation`] for the optional domain checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    pub lead_count: f64,
    pub conversion_rates: [f64; CONVERSION_RATE_COUNT],
    /// Positive values are churn, negative values are upsell/expansion.
    pub churn_or_upsell_rate: f64,
    pub monthly_fee: f64,
}

impl ScenarioInput {
    pub fn new(
        lead_count: f64,
        conversion_rates: [f64; CONVERSION_RATE_COUNT],
        churn_or_upsell_rate: f64,
        monthly_fee: f64,
    ) -> Self {
        Self {
            lead_count,
            conversion_rates,
            churn_or_upsell_rate,
            monthly_fee,
        }
    }

    /// Copy of this input with one conversion rate replaced.
    #[must_use]
    pub fn with_rate(mut self, index: usize, rate: f64) -> Self {
        if let Some(slot) = self.conversion_rates.get_mut(index) {
            *slot = rate;
        }
        self
    }
}

impl Default for ScenarioInput {
    fn default() -> Self {
        Self {
            lead_count: DEFAULT_LEAD_COUNT,
            conversion_rates: [DEFAULT_CONVERSION_RATE; CONVERSION_RATE_COUNT],
            churn_or_upsell_rate: DEFAULT_CHURN_RATE,
            monthly_fee: DEFAULT_MONTHLY_FEE,
        }
    }
}

/// Stage counts in funnel order: Prospects, MQL, SQL, Opportunities, Won, Retained.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageValues([f64; STAGE_COUNT]);

impl StageValues {
    pub const fn new(values: [f64; STAGE_COUNT]) -> Self {
        Self(values)
    }

    pub const fn zero() -> Self {
        Self([0.0; STAGE_COUNT])
    }

    pub fn get(&self, stage: Stage) -> f64 {
        self.0[stage.index()]
    }

    pub fn as_array(&self) -> &[f64; STAGE_COUNT] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// Stages paired with their values, in funnel order.
    pub fn stages(&self) -> impl Iterator<Item = (Stage, f64)> + '_ {
        Stage::ALL.iter().copied().zip(self.iter())
    }

    /// Value of the first stage (Prospects).
    pub fn first(&self) -> f64 {
        self.0[0]
    }

    /// Largest stage value. NaN entries are ignored.
    pub fn max(&self) -> f64 {
        self.0.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// True when every stage is no larger than the one before it.
    pub fn is_non_increasing(&self) -> bool {
        self.0.windows(2).all(|pair| pair[1] <= pair[0])
    }
}

impl Index<usize> for StageValues {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl Index<Stage> for StageValues {
    type Output = f64;

    fn index(&self, stage: Stage) -> &f64 {
        &self.0[stage.index()]
    }
}

impl From<[f64; STAGE_COUNT]> for StageValues {
    fn from(values: [f64; STAGE_COUNT]) -> Self {
        Self(values)
    }
}

/// Monthly recurring revenue of a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MrrResult {
    pub mrr: f64,
}

/// Everything the engine derives from one [`ScenarioInput`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenarioMetrics {
    pub stages: StageValues,
    pub mrr: MrrResult,
}
