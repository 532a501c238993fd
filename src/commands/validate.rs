use anyhow::Result;
use std::path::PathBuf;

use super::CommandContext;
use crate::cli::OutputFormat;
use crate::core::ScenarioId;
use crate::observability::{set_phase, Phase};
use crate::output::{self, Report};
use crate::validation::ValidationReport;

pub struct ValidateConfig {
    /// `--strict` on the command line; `[validation] strict` also enables it
    pub strict: bool,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

pub fn build_validation(ctx: &CommandContext) -> ValidationReport {
    let _phase = set_phase(Phase::Validating);
    let report = ValidationReport::for_scenarios(
        &ctx.config.scenario_input(ScenarioId::A),
        &ctx.config.scenario_input(ScenarioId::B),
    );
    for id in [ScenarioId::A, ScenarioId::B] {
        for warning in report.warnings(id) {
            log::debug!("Scenario {}: {}", id, warning);
        }
    }
    report
}

/// Whether a report fails the run.
pub fn is_failure(report: &ValidationReport, strict: bool) -> bool {
    strict && !report.is_clean()
}

pub fn run_validate(ctx: &CommandContext, config: ValidateConfig) -> Result<()> {
    let report = build_validation(ctx);

    {
        let _phase = set_phase(Phase::OutputGeneration);
        output::write_report(
            Report::Validation(&report),
            config.format,
            config.output.as_deref(),
            &ctx.formatting,
        )?;
    }

    let strict = config.strict || ctx.config.is_strict();
    if is_failure(&report, strict) {
        anyhow::bail!(
            "Validation failed: {} domain warning(s) in strict mode",
            report.total()
        );
    }
    Ok(())
}
