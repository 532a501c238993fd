use anyhow::Result;
use std::path::PathBuf;

use super::CommandContext;
use crate::cli::{OutputFormat, ScenarioArgs};
use crate::comparison::{Comparator, ComparisonResult};
use crate::core::ScenarioId;
use crate::observability::{set_phase, Phase};
use crate::output::{self, Report};

pub struct CompareConfig {
    pub a: ScenarioArgs,
    pub b: ScenarioArgs,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

pub fn build_comparison(ctx: &CommandContext, config: &CompareConfig) -> Result<ComparisonResult> {
    let a = config
        .a
        .to_overrides()?
        .apply_to(ctx.config.scenario_input(ScenarioId::A));
    let b = config
        .b
        .to_overrides()?
        .apply_to(ctx.config.scenario_input(ScenarioId::B));

    let _phase = set_phase(Phase::Comparing);
    let result = Comparator::new(a, b).compare();
    log::info!(
        "Compared scenarios: MRR delta {:.2} ({:?})",
        result.deltas.mrr_delta,
        result.summary.mrr_trend
    );
    Ok(result)
}

pub fn run_compare(ctx: &CommandContext, config: CompareConfig) -> Result<()> {
    let result = build_comparison(ctx, &config)?;

    let _phase = set_phase(Phase::OutputGeneration);
    output::write_report(
        Report::Comparison(&result),
        config.format,
        config.output.as_deref(),
        &ctx.formatting,
    )?;
    Ok(())
}
