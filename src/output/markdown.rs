use std::fmt::Write;

use super::{Report, ScenarioReport};
use crate::comparison::ComparisonResult;
use crate::core::{ScenarioId, Stage};
use crate::formatting::{
    format_count, format_currency, format_mrr_difference, format_mrr_line, format_percent,
    FormattingConfig,
};
use crate::validation::ValidationReport;

pub fn render(report: Report<'_>, config: &FormattingConfig) -> String {
    match report {
        Report::Scenario(r) => render_scenario(r, config),
        Report::Comparison(r) => render_comparison(r, config),
        Report::Validation(r) => render_validation(r),
    }
}

fn render_scenario(report: &ScenarioReport, config: &FormattingConfig) -> String {
    let mut out = String::from("# Bowtie Funnel\n\n");
    out.push_str("| Stage | Count | % of Prospects |\n");
    out.push_str("|-------|------:|---------------:|\n");
    for bar in &report.funnel.bars {
        let _ = writeln!(
            out,
            "| {} | {} | {} |",
            bar.stage.label(),
            format_count(bar.value),
            format_percent(bar.percent_of_first)
        );
    }
    let _ = writeln!(
        out,
        "\n**MRR:** {}",
        format_currency(report.metrics.mrr.mrr, &config.currency_symbol)
    );

    if !report.warnings.is_empty() {
        out.push_str("\n## Input warnings\n\n");
        for warning in &report.warnings {
            let _ = writeln!(out, "- `{}`: {} (got {})", warning.field, warning.message, warning.value);
        }
    }
    out
}

fn render_comparison(result: &ComparisonResult, config: &FormattingConfig) -> String {
    let symbol = &config.currency_symbol;
    let a = &result.scenario_a.metrics;
    let b = &result.scenario_b.metrics;

    let mut out = String::from("# Scenario Comparison (B vs A)\n\n");
    let _ = writeln!(
        out,
        "_Generated {} by bowtie {}_\n",
        result.metadata.comparison_date, result.metadata.tool_version
    );
    out.push_str("| Stage | A | B | Δ | Δ% | Δ$ |\n");
    out.push_str("|-------|--:|--:|--:|---:|---:|\n");
    for stage in Stage::ALL {
        let delta = result.deltas.get(stage);
        let dollars = delta
            .dollar_delta
            .map(|d| format_currency(d, symbol))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} |",
            stage.label(),
            format_count(a.stages[stage]),
            format_count(b.stages[stage]),
            format_count(delta.absolute_delta),
            format_percent(delta.percent_delta),
            dollars
        );
    }

    out.push('\n');
    let _ = writeln!(out, "- {}", format_mrr_line(ScenarioId::A, a.mrr.mrr, symbol));
    let _ = writeln!(out, "- {}", format_mrr_line(ScenarioId::B, b.mrr.mrr, symbol));
    let _ = writeln!(
        out,
        "- **{}**",
        format_mrr_difference(result.deltas.mrr_delta, symbol)
    );
    out
}

fn render_validation(report: &ValidationReport) -> String {
    let mut out = String::from("# Input Validation\n");
    for id in [ScenarioId::A, ScenarioId::B] {
        let _ = writeln!(out, "\n## Scenario {id}\n");
        let warnings = report.warnings(id);
        if warnings.is_empty() {
            out.push_str("No warnings.\n");
        }
        for warning in warnings {
            let _ = writeln!(out, "- `{}`: {} (got {})", warning.field, warning.message, warning.value);
        }
    }
    out
}
