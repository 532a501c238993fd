//! Optional domain checks for scenario inputs.
//!
//! The metrics engine accepts any number. This layer flags inputs whose results
//! are arithmetically valid but meaningless (a rate above 100%, churn beyond
//! -100..100, a negative fee) without ever blocking the computation. All issues
//! are accumulated with stillwater's `Validation` so a user sees every problem
//! of a scenario at once.
//!
//! # Example
//!
//! ```rust
//! use bowtie::core::ScenarioInput;
//! use bowtie::validation::validate_input;
//!
//! let input = ScenarioInput::default().with_rate(0, 120.0);
//! assert!(validate_input(&input).is_failure());
//! ```

use serde::{Deserialize, Serialize};
use stillwater::{NonEmptyVec, Validation};

use crate::core::{ScenarioId, ScenarioInput};

pub const RATE_RANGE: (f64, f64) = (0.0, 100.0);
pub const CHURN_RANGE: (f64, f64) = (-100.0, 100.0);

/// A domain assumption an input breaks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainWarning {
    pub field: String,
    pub message: String,
    pub value: f64,
}

impl DomainWarning {
    fn new(field: impl Into<String>, message: impl Into<String>, value: f64) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value,
        }
    }
}

impl std::fmt::Display for DomainWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} (got {})", self.field, self.message, self.value)
    }
}

pub type InputValidation = Validation<ScenarioInput, NonEmptyVec<DomainWarning>>;

/// Check every field of a scenario, collecting all warnings.
pub fn validate_input(input: &ScenarioInput) -> InputValidation {
    let warnings: Vec<DomainWarning> = check_non_negative("lead_count", input.lead_count)
        .into_iter()
        .chain(
            input
                .conversion_rates
                .iter()
                .enumerate()
                .filter_map(|(i, &rate)| check_range(&format!("cr{}", i + 1), rate, RATE_RANGE)),
        )
        .chain(check_range(
            "churn_or_upsell_rate",
            input.churn_or_upsell_rate,
            CHURN_RANGE,
        ))
        .chain(check_non_negative("monthly_fee", input.monthly_fee))
        .collect();

    match NonEmptyVec::from_vec(warnings) {
        Some(warnings) => Validation::Failure(warnings),
        None => Validation::Success(*input),
    }
}

/// Warnings as a plain list; empty when the input is within its domain.
pub fn domain_warnings(input: &ScenarioInput) -> Vec<DomainWarning> {
    match validate_input(input) {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(warnings) => warnings.into_iter().collect(),
    }
}

fn check_non_negative(field: &str, value: f64) -> Option<DomainWarning> {
    if !value.is_finite() {
        Some(DomainWarning::new(field, "must be a finite number", value))
    } else if value < 0.0 {
        Some(DomainWarning::new(field, "expected a non-negative value", value))
    } else {
        None
    }
}

fn check_range(field: &str, value: f64, (min, max): (f64, f64)) -> Option<DomainWarning> {
    if !value.is_finite() {
        Some(DomainWarning::new(field, "must be a finite number", value))
    } else if value < min || value > max {
        Some(DomainWarning::new(
            field,
            format!("outside expected range {min}..{max}"),
            value,
        ))
    } else {
        None
    }
}

/// Validation outcome for both sides of a comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub scenario_a: Vec<DomainWarning>,
    pub scenario_b: Vec<DomainWarning>,
}

impl ValidationReport {
    pub fn for_scenarios(a: &ScenarioInput, b: &ScenarioInput) -> Self {
        Self {
            scenario_a: domain_warnings(a),
            scenario_b: domain_warnings(b),
        }
    }

    pub fn warnings(&self, scenario: ScenarioId) -> &[DomainWarning] {
        match scenario {
            ScenarioId::A => &self.scenario_a,
            ScenarioId::B => &self.scenario_b,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.scenario_a.is_empty() && self.scenario_b.is_empty()
    }

    pub fn total(&self) -> usize {
        self.scenario_a.len() + self.scenario_b.len()
    }
}
