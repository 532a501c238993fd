use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};

use super::{Report, ScenarioReport};
use crate::comparison::{ComparisonResult, MrrTrend, StageDelta};
use crate::core::{ScenarioId, Stage};
use crate::formatting::{
    format_count, format_currency, format_mrr_difference, format_mrr_line, format_percent,
    formatter_for, FormattingConfig, OutputFormatter,
};
use crate::validation::{DomainWarning, ValidationReport};

pub fn render(report: Report<'_>, config: &FormattingConfig) -> String {
    let formatter = formatter_for(config);
    match report {
        Report::Scenario(r) => render_scenario(r, config, formatter.as_ref()),
        Report::Comparison(r) => render_comparison(r, config, formatter.as_ref()),
        Report::Validation(r) => render_validation(r, formatter.as_ref()),
    }
}

fn new_table(config: &FormattingConfig) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    if config.color.should_use_color() {
        table.enforce_styling();
    } else {
        table.force_no_tty();
    }
    table
}

fn right(text: impl ToString) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

fn signed_cell(value: f64, text: String) -> Cell {
    let cell = right(text);
    if value > 0.0 {
        cell.fg(Color::Green)
    } else if value < 0.0 {
        cell.fg(Color::Red)
    } else {
        cell
    }
}

fn render_scenario(
    report: &ScenarioReport,
    config: &FormattingConfig,
    formatter: &dyn OutputFormatter,
) -> String {
    let mut table = new_table(config);
    table.set_header(vec!["Stage", "Count", "% of Prospects"]);
    for bar in &report.funnel.bars {
        table.add_row(vec![
            Cell::new(bar.stage.label()),
            right(format_count(bar.value)),
            right(format_percent(bar.percent_of_first)),
        ]);
    }

    let mut out = String::new();
    out.push_str(&formatter.header("Bowtie Funnel"));
    out.push('\n');
    out.push_str(&table.to_string());
    out.push('\n');
    out.push_str(&formatter.bold(&format!(
        "MRR: {}",
        format_currency(report.metrics.mrr.mrr, &config.currency_symbol)
    )));
    out.push('\n');

    if !report.warnings.is_empty() {
        out.push('\n');
        push_warnings(&mut out, "Input warnings", &report.warnings, formatter);
    }
    out
}

fn delta_cells(delta: &StageDelta, symbol: &str) -> [Cell; 3] {
    let dollars = match delta.dollar_delta {
        Some(d) => signed_cell(d, format_currency(d, symbol)),
        None => right(""),
    };
    [
        signed_cell(delta.absolute_delta, format_count(delta.absolute_delta)),
        signed_cell(
            delta.percent_delta.unwrap_or(0.0),
            format_percent(delta.percent_delta),
        ),
        dollars,
    ]
}

fn render_comparison(
    result: &ComparisonResult,
    config: &FormattingConfig,
    formatter: &dyn OutputFormatter,
) -> String {
    let symbol = &config.currency_symbol;
    let a = &result.scenario_a.metrics;
    let b = &result.scenario_b.metrics;

    let mut table = new_table(config);
    table.set_header(vec!["Stage", "A", "B", "Δ", "Δ%", "Δ$"]);
    for stage in Stage::ALL {
        let [abs, pct, dollars] = delta_cells(result.deltas.get(stage), symbol);
        table.add_row(vec![
            Cell::new(stage.label()),
            right(format_count(a.stages[stage])),
            right(format_count(b.stages[stage])),
            abs,
            pct,
            dollars,
        ]);
    }

    let mrr_delta = result.deltas.mrr_delta;
    let trend = match result.summary.mrr_trend {
        MrrTrend::Growing => formatter.success("growing"),
        MrrTrend::Shrinking => formatter.error("shrinking"),
        MrrTrend::Flat => formatter.dim("flat"),
    };

    let mut lines = vec![
        formatter.header("Scenario Comparison (B vs A)"),
        table.to_string(),
        format_mrr_line(ScenarioId::A, a.mrr.mrr, symbol),
        format_mrr_line(ScenarioId::B, b.mrr.mrr, symbol),
        formatter.signed(mrr_delta, &format_mrr_difference(mrr_delta, symbol)),
        format!("MRR trend: {trend}"),
    ];

    if let Some(stage) = result.summary.largest_relative_change {
        lines.push(format!("Largest relative change: {}", formatter.bold(stage.label())));
    }
    if !result.summary.undefined_percent_stages.is_empty() {
        let stages: Vec<&str> = result
            .summary
            .undefined_percent_stages
            .iter()
            .map(|s| s.label())
            .collect();
        lines.push(formatter.dim(&format!(
            "Percent change undefined (A is zero): {}",
            stages.join(", ")
        )));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn push_warnings(
    out: &mut String,
    title: &str,
    warnings: &[DomainWarning],
    formatter: &dyn OutputFormatter,
) {
    out.push_str(&formatter.warning(&format!("{title} ({}):", warnings.len())));
    out.push('\n');
    for warning in warnings {
        out.push_str(&format!("  - {warning}\n"));
    }
}

fn render_validation(report: &ValidationReport, formatter: &dyn OutputFormatter) -> String {
    let mut out = String::new();
    out.push_str(&formatter.header("Input Validation"));
    out.push('\n');

    for id in [ScenarioId::A, ScenarioId::B] {
        let warnings = report.warnings(id);
        if warnings.is_empty() {
            out.push_str(&formatter.success(&format!("Scenario {id}: ok")));
            out.push('\n');
        } else {
            push_warnings(&mut out, &format!("Scenario {id}"), warnings, formatter);
        }
    }

    if report.is_clean() {
        out.push_str("All inputs are within expected ranges.\n");
    } else {
        out.push_str(&formatter.warning(&format!("{} warning(s) found.", report.total())));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::Comparator;
    use crate::core::ScenarioInput;

    #[test]
    fn test_scenario_table_lists_every_stage() {
        let report = ScenarioReport::new(ScenarioInput::default());
        let text = render(Report::Scenario(&report), &FormattingConfig::plain());

        for stage in Stage::ALL {
            assert!(text.contains(stage.label()), "missing {stage}");
        }
        assert!(text.contains("250"));
        assert!(text.contains("MRR: $87.89"));
        assert!(!text.contains("\u{1b}["));
    }

    #[test]
    fn test_comparison_lists_mrr_lines() {
        let b = ScenarioInput {
            monthly_fee: 40.0,
            ..ScenarioInput::default()
        };
        let result = Comparator::new(ScenarioInput::default(), b).compare();
        let text = render(Report::Comparison(&result), &FormattingConfig::plain());

        assert!(text.contains("MRR (Left): $87.89"));
        assert!(text.contains("MRR (Right): $117.19"));
        assert!(text.contains("MRR Difference: $29.30"));
        assert!(text.contains("MRR trend: growing"));
    }

    #[test]
    fn test_comparison_notes_zero_baseline() {
        let a = ScenarioInput {
            lead_count: 0.0,
            ..ScenarioInput::default()
        };
        let result = Comparator::new(a, ScenarioInput::default()).compare();
        let text = render(Report::Comparison(&result), &FormattingConfig::plain());

        assert!(text.contains("n/a"));
        assert!(text.contains("Percent change undefined (A is zero): Prospects/Leads, MQL"));
    }

    #[test]
    fn test_validation_summary() {
        let clean = ValidationReport::default();
        let text = render(Report::Validation(&clean), &FormattingConfig::plain());
        assert!(text.contains("Scenario A: ok"));
        assert!(text.contains("All inputs are within expected ranges."));

        let dirty = ValidationReport::for_scenarios(
            &ScenarioInput::default(),
            &ScenarioInput {
                monthly_fee: -5.0,
                ..ScenarioInput::default()
            },
        );
        let text = render(Report::Validation(&dirty), &FormattingConfig::plain());
        assert!(text.contains("Scenario B (1):"));
        assert!(text.contains("monthly_fee: expected a non-negative value (got -5)"));
        assert!(text.contains("1 warning(s) found."));
    }
}
