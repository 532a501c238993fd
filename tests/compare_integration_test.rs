use bowtie::comparison::{compare_scenarios, Comparator, MrrTrend};
use bowtie::core::{ScenarioId, ScenarioInput, Stage};
use bowtie::metrics::{compute_metrics, compute_scenario};
use bowtie::session::ComparisonSession;
use pretty_assertions::assert_eq;

#[test]
fn test_default_scenario_end_to_end() {
    let (stages, mrr) = compute_metrics(&ScenarioInput::default());

    assert_eq!(
        stages.as_array(),
        &[1000.0, 250.0, 62.5, 15.625, 3.90625, 2.9296875]
    );
    assert_eq!(mrr.mrr, 87.890625);
}

#[test]
fn test_identical_scenarios_compare_to_zero() {
    let result = Comparator::new(ScenarioInput::default(), ScenarioInput::default()).compare();

    assert!(result.deltas.is_unchanged());
    assert_eq!(result.summary.mrr_trend, MrrTrend::Flat);
    assert_eq!(result.deltas.get(Stage::Retained).dollar_delta, Some(0.0));
    for delta in &result.deltas.stages {
        assert_eq!(delta.percent_delta, Some(0.0));
    }
}

#[test]
fn test_zero_baseline_against_nonzero_scenario() {
    let a = ScenarioInput {
        lead_count: 0.0,
        ..ScenarioInput::default()
    };
    let b = ScenarioInput {
        lead_count: 500.0,
        ..ScenarioInput::default()
    };

    let report = compare_scenarios(&compute_scenario(&a), &compute_scenario(&b), b.monthly_fee);

    let prospects = report.get(Stage::Prospects);
    assert_eq!(prospects.absolute_delta, 500.0);
    assert_eq!(prospects.percent_delta, None);
    assert_eq!(report.get(Stage::Mql).absolute_delta, 125.0);
    assert!(report.stages.iter().all(|d| d.percent_delta.is_none()));
    assert_eq!(report.mrr_trend(), MrrTrend::Growing);
}

#[test]
fn test_higher_fee_on_b_moves_only_mrr_delta() {
    let b = ScenarioInput {
        monthly_fee: 40.0,
        ..ScenarioInput::default()
    };
    let report = compare_scenarios(
        &compute_scenario(&ScenarioInput::default()),
        &compute_scenario(&b),
        b.monthly_fee,
    );

    assert!(report.stages.iter().all(|d| d.absolute_delta == 0.0));
    assert_eq!(report.retained_dollar_delta(), 0.0);
    assert_eq!(report.mrr_delta, 117.1875 - 87.890625);
}

#[test]
fn test_session_edits_match_direct_comparison() {
    let mut session = ComparisonSession::new(ScenarioInput::default(), ScenarioInput::default());
    let edited = ScenarioInput::default().with_rate(0, 50.0);

    let update = session.on_input_changed(ScenarioId::B, edited);

    let direct = compare_scenarios(
        &compute_scenario(&ScenarioInput::default()),
        &compute_scenario(&edited),
        edited.monthly_fee,
    );
    assert_eq!(update.deltas, direct);
    assert_eq!(update.mrr.mrr, 175.78125);
    assert_eq!(session.scenario(ScenarioId::A).metrics().mrr.mrr, 87.890625);
}

#[test]
fn test_comparison_serializes_null_for_undefined_percent() {
    let a = ScenarioInput {
        lead_count: 0.0,
        ..ScenarioInput::default()
    };
    let result = Comparator::new(a, ScenarioInput::default()).compare();
    let json = serde_json::to_value(&result).unwrap();

    let first = &json["deltas"]["stages"][0];
    assert_eq!(first["stage"], "prospects");
    assert!(first["percent_delta"].is_null());
    assert!(first.get("dollar_delta").is_none());
}
