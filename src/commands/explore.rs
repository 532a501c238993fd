use anyhow::Result;

use super::CommandContext;
use crate::core::ScenarioId;
use crate::observability::{set_phase, Phase};
use crate::tui::{app::App, ComparisonExplorer};

pub struct ExploreConfig {
    pub no_animation: bool,
}

/// Build the explorer state from configuration, without touching the terminal.
pub fn build_app(ctx: &CommandContext, config: &ExploreConfig) -> App {
    let mut display = ctx.config.display();
    if config.no_animation {
        display.animate = false;
    }
    App::new(
        ctx.config.scenario_input(ScenarioId::A),
        ctx.config.scenario_input(ScenarioId::B),
        &display,
    )
}

pub fn run_explore(ctx: &CommandContext, config: ExploreConfig) -> Result<()> {
    let app = build_app(ctx, &config);
    let _phase = set_phase(Phase::Interactive);

    log::info!("Starting interactive explorer");
    let mut explorer = ComparisonExplorer::new(app, ctx.formatting.currency_symbol.clone())?;
    explorer.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BowtieConfig, ScenarioConfig};
    use crate::formatting::FormattingConfig;

    #[test]
    fn test_app_starts_from_configured_scenarios() {
        let ctx = CommandContext::new(
            BowtieConfig {
                scenario_b: Some(ScenarioConfig {
                    monthly_fee: Some(99.0),
                    ..Default::default()
                }),
                ..Default::default()
            },
            FormattingConfig::plain(),
        );
        let app = build_app(&ctx, &ExploreConfig { no_animation: true });

        assert_eq!(app.panel(ScenarioId::B).form.monthly_fee, "99");
        assert_eq!(app.panel(ScenarioId::A).form.monthly_fee, "30");
        assert!(!app.is_animating());
    }
}
