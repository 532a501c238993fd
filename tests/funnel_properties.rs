//! Property-based tests for the funnel engine and comparison
//!
//! These tests verify invariants that should hold for all inputs:
//! - Stages never grow along the funnel for in-domain inputs
//! - Computation is deterministic
//! - MRR is exactly Retained times the monthly fee
//! - Comparing a scenario with itself yields no change
//! - Only the Retained stage carries a dollar delta
//! - Bar widths stay within [0, 1]

use bowtie::comparison::compare_scenarios;
use bowtie::core::{ScenarioInput, Stage};
use bowtie::metrics::{compute_metrics, compute_scenario};
use bowtie::view::derive_render_state;
use proptest::prelude::*;

/// Inputs inside the expected domain, churn restricted to [0, 100]
fn in_domain_input() -> impl Strategy<Value = ScenarioInput> {
    (
        0.0f64..1_000_000.0,
        prop::array::uniform4(0.0f64..99.0),
        0.0f64..=100.0,
        0.0f64..10_000.0,
    )
        .prop_map(|(leads, rates, churn, fee)| ScenarioInput::new(leads, rates, churn, fee))
}

/// Any finite input, including out-of-domain values
fn any_finite_input() -> impl Strategy<Value = ScenarioInput> {
    (
        -1_000_000.0f64..1_000_000.0,
        prop::array::uniform4(-200.0f64..200.0),
        -200.0f64..200.0,
        -10_000.0f64..10_000.0,
    )
        .prop_map(|(leads, rates, churn, fee)| ScenarioInput::new(leads, rates, churn, fee))
}

proptest! {
    #[test]
    fn prop_stages_are_non_increasing(input in in_domain_input()) {
        let (stages, _) = compute_metrics(&input);
        prop_assert!(stages.is_non_increasing(), "stages grew: {:?}", stages);
        prop_assert!(stages.iter().all(|v| v >= 0.0));
    }

    #[test]
    fn prop_computation_is_deterministic(input in any_finite_input()) {
        let first = compute_metrics(&input);
        let second = compute_metrics(&input);
        for (a, b) in first.0.iter().zip(second.0.iter()) {
            prop_assert_eq!(a.to_bits(), b.to_bits());
        }
        prop_assert_eq!(first.1.mrr.to_bits(), second.1.mrr.to_bits());
    }

    #[test]
    fn prop_mrr_is_retained_times_fee(input in any_finite_input()) {
        let (stages, mrr) = compute_metrics(&input);
        prop_assert_eq!(mrr.mrr, stages[Stage::Retained] * input.monthly_fee);
    }

    #[test]
    fn prop_self_comparison_is_zero(input in any_finite_input()) {
        let metrics = compute_scenario(&input);
        let report = compare_scenarios(&metrics, &metrics, input.monthly_fee);

        prop_assert_eq!(report.mrr_delta, 0.0);
        for delta in &report.stages {
            prop_assert_eq!(delta.absolute_delta, 0.0);
        }
    }

    #[test]
    fn prop_dollar_delta_only_on_retained(a in any_finite_input(), b in any_finite_input()) {
        let report = compare_scenarios(&compute_scenario(&a), &compute_scenario(&b), b.monthly_fee);

        for delta in &report.stages[..5] {
            prop_assert!(delta.dollar_delta.is_none());
        }
        let retained = report.get(Stage::Retained);
        prop_assert_eq!(retained.dollar_delta, Some(retained.absolute_delta * b.monthly_fee));
    }

    #[test]
    fn prop_percent_delta_undefined_only_on_zero_baseline(a in any_finite_input(), b in any_finite_input()) {
        let ma = compute_scenario(&a);
        let report = compare_scenarios(&ma, &compute_scenario(&b), b.monthly_fee);

        for delta in &report.stages {
            let baseline = ma.stages[delta.stage];
            prop_assert_eq!(delta.percent_delta.is_none(), baseline == 0.0);
        }
    }

    #[test]
    fn prop_widths_are_normalized(input in any_finite_input()) {
        let render = derive_render_state(&compute_scenario(&input).stages);
        for width in render.widths() {
            prop_assert!((0.0..=1.0).contains(&width));
        }
    }
}
