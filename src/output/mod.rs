pub mod json;
pub mod markdown;
pub mod terminal;

use serde::Serialize;
use std::path::Path;

use crate::cli::OutputFormat;
use crate::comparison::ComparisonResult;
use crate::core::{errors::Error, ScenarioInput, ScenarioMetrics};
use crate::formatting::FormattingConfig;
use crate::io::{destination_for, OutputDestination};
use crate::metrics::compute_scenario;
use crate::validation::{domain_warnings, DomainWarning, ValidationReport};
use crate::view::{derive_render_state, FunnelRenderState};

/// Result of the `compute` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioReport {
    pub input: ScenarioInput,
    pub metrics: ScenarioMetrics,
    pub funnel: FunnelRenderState,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<DomainWarning>,
}

impl ScenarioReport {
    pub fn new(input: ScenarioInput) -> Self {
        let metrics = compute_scenario(&input);
        Self {
            input,
            metrics,
            funnel: derive_render_state(&metrics.stages),
            warnings: domain_warnings(&input),
        }
    }
}

/// Any report a command can emit.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum Report<'a> {
    Scenario(&'a ScenarioReport),
    Comparison(&'a ComparisonResult),
    Validation(&'a ValidationReport),
}

/// Render a report to text in the requested format.
pub fn render(report: Report<'_>, format: OutputFormat, config: &FormattingConfig) -> Result<String, Error> {
    match format {
        OutputFormat::Json => json::to_json(&report),
        OutputFormat::Yaml => json::to_yaml(&report),
        OutputFormat::Markdown => Ok(markdown::render(report, config)),
        OutputFormat::Terminal => Ok(terminal::render(report, config)),
    }
}

/// Render and write to `dest`.
pub fn write_to(
    report: Report<'_>,
    format: OutputFormat,
    config: &FormattingConfig,
    dest: &dyn OutputDestination,
) -> Result<(), Error> {
    let mut content = render(report, format, config)?;
    if !content.ends_with('\n') {
        content.push('\n');
    }
    log::debug!("Writing {:?} report to {}", format, dest.description());
    dest.write_str(&content)
}

/// Render and write to stdout, or to `output` when given.
pub fn write_report(
    report: Report<'_>,
    format: OutputFormat,
    output: Option<&Path>,
    config: &FormattingConfig,
) -> Result<(), Error> {
    // Colour codes never belong in a file
    let file_config;
    let config = if output.is_some() {
        file_config = FormattingConfig::plain().with_currency_symbol(config.currency_symbol.clone());
        &file_config
    } else {
        config
    };
    write_to(report, format, config, destination_for(output).as_ref())
}
