use anyhow::Result;
use std::path::PathBuf;

use super::CommandContext;
use crate::cli::{OutputFormat, ScenarioArgs};
use crate::core::{ScenarioId, ScenarioInput};
use crate::observability::{set_phase, Phase};
use crate::output::{self, Report, ScenarioReport};

pub struct ComputeConfig {
    pub scenario: ScenarioArgs,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

/// Configured scenario A with command-line overrides applied.
pub fn resolve_input(ctx: &CommandContext, args: &ScenarioArgs) -> Result<ScenarioInput> {
    let base = ctx.config.scenario_input(ScenarioId::A);
    Ok(args.to_overrides()?.apply_to(base))
}

pub fn build_report(ctx: &CommandContext, args: &ScenarioArgs) -> Result<ScenarioReport> {
    let input = resolve_input(ctx, args)?;
    let _phase = set_phase(Phase::Computing);
    let report = ScenarioReport::new(input);
    log::info!(
        "Computed scenario: {} leads -> {:.2} retained, MRR {:.2}",
        input.lead_count,
        report.metrics.stages.as_array()[5],
        report.metrics.mrr.mrr
    );
    Ok(report)
}

pub fn run_compute(ctx: &CommandContext, config: ComputeConfig) -> Result<()> {
    let report = build_report(ctx, &config.scenario)?;

    let _phase = set_phase(Phase::OutputGeneration);
    output::write_report(
        Report::Scenario(&report),
        config.format,
        config.output.as_deref(),
        &ctx.formatting,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BowtieConfig, ScenarioConfig};
    use crate::formatting::FormattingConfig;

    fn context(config: BowtieConfig) -> CommandContext {
        CommandContext::new(config, FormattingConfig::plain())
    }

    #[test]
    fn test_flags_override_configured_scenario() {
        let ctx = context(BowtieConfig {
            scenario_a: Some(ScenarioConfig {
                lead_count: Some(400.0),
                monthly_fee: Some(50.0),
                ..Default::default()
            }),
            ..Default::default()
        });
        let args = ScenarioArgs {
            fee: Some(10.0),
            ..Default::default()
        };

        let input = resolve_input(&ctx, &args).unwrap();
        assert_eq!(input.lead_count, 400.0);
        assert_eq!(input.monthly_fee, 10.0);
        assert_eq!(input.conversion_rates, [25.0; 4]);
    }

    #[test]
    fn test_report_for_defaults() {
        let report = build_report(&context(BowtieConfig::default()), &ScenarioArgs::default()).unwrap();
        assert_eq!(report.metrics.mrr.mrr, 87.890625);
    }
}
