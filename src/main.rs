use anyhow::Result;
use bowtie::cli::{Cli, Commands};
use bowtie::commands::{
    self, CommandContext, CompareConfig, ComputeConfig, ExploreConfig, ValidateConfig,
};
use bowtie::observability::{init_tracing, install_panic_hook};
use clap::Parser;

// Main orchestrator function
fn main() -> Result<()> {
    install_panic_hook();
    let cli = Cli::parse();
    init_tracing(cli.verbosity);

    if let Commands::Init { force } = cli.command {
        return commands::init_config(force);
    }

    let ctx = CommandContext::load(cli.config.as_deref(), cli.plain)?;

    match cli.command {
        Commands::Compute { scenario, output } => commands::run_compute(
            &ctx,
            ComputeConfig {
                scenario,
                format: output.format,
                output: output.output,
            },
        ),
        Commands::Compare { a, b, output } => commands::run_compare(
            &ctx,
            CompareConfig {
                a: a.into(),
                b: b.into(),
                format: output.format,
                output: output.output,
            },
        ),
        Commands::Explore { no_animation } => {
            commands::run_explore(&ctx, ExploreConfig { no_animation })
        }
        Commands::Validate { strict, output } => commands::run_validate(
            &ctx,
            ValidateConfig {
                strict,
                format: output.format,
                output: output.output,
            },
        ),
        Commands::Init { force } => commands::init_config(force),
    }
}
