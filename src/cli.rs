use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::ScenarioConfig;
use crate::core::{Error, CONVERSION_RATE_COUNT};

#[derive(Parser, Debug)]
#[command(name = "bowtie")]
#[command(about = "Bowtie funnel and MRR scenario calculator", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to the nearest .bowtie.toml)
    #[arg(long, global = true, env = "BOWTIE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub plain: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the funnel and MRR of one scenario
    Compute {
        #[command(flatten)]
        scenario: ScenarioArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Compare scenario B against scenario A
    Compare {
        #[command(flatten)]
        a: ScenarioAArgs,

        #[command(flatten)]
        b: ScenarioBArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Explore both scenarios side by side in an interactive terminal UI
    Explore {
        /// Disable bar animations
        #[arg(long = "no-animation")]
        no_animation: bool,
    },

    /// Check both configured scenarios against domain assumptions
    Validate {
        /// Exit with an error when any warning is reported
        #[arg(long)]
        strict: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

/// Report destination and format.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Scenario overrides for `compute`.
#[derive(Args, Debug, Clone, Default)]
pub struct ScenarioArgs {
    /// Prospects entering the funnel
    #[arg(long)]
    pub leads: Option<f64>,

    /// The four conversion rates in percent, comma-separated
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub rates: Option<Vec<f64>>,

    /// Churn (positive) or upsell (negative) rate in percent
    #[arg(long, allow_negative_numbers = true)]
    pub churn: Option<f64>,

    /// Monthly fee per retained customer
    #[arg(long, allow_negative_numbers = true)]
    pub fee: Option<f64>,
}

/// Scenario A overrides for `compare`.
#[derive(Args, Debug, Clone, Default)]
pub struct ScenarioAArgs {
    #[arg(id = "a_leads", long = "a-leads")]
    pub leads: Option<f64>,

    #[arg(id = "a_rates", long = "a-rates", value_delimiter = ',', allow_negative_numbers = true)]
    pub rates: Option<Vec<f64>>,

    #[arg(id = "a_churn", long = "a-churn", allow_negative_numbers = true)]
    pub churn: Option<f64>,

    #[arg(id = "a_fee", long = "a-fee", allow_negative_numbers = true)]
    pub fee: Option<f64>,
}

/// Scenario B overrides for `compare`.
#[derive(Args, Debug, Clone, Default)]
pub struct ScenarioBArgs {
    #[arg(id = "b_leads", long = "b-leads")]
    pub leads: Option<f64>,

    #[arg(id = "b_rates", long = "b-rates", value_delimiter = ',', allow_negative_numbers = true)]
    pub rates: Option<Vec<f64>>,

    #[arg(id = "b_churn", long = "b-churn", allow_negative_numbers = true)]
    pub churn: Option<f64>,

    #[arg(id = "b_fee", long = "b-fee", allow_negative_numbers = true)]
    pub fee: Option<f64>,
}

impl From<ScenarioAArgs> for ScenarioArgs {
    fn from(args: ScenarioAArgs) -> Self {
        Self {
            leads: args.leads,
            rates: args.rates,
            churn: args.churn,
            fee: args.fee,
        }
    }
}

impl From<ScenarioBArgs> for ScenarioArgs {
    fn from(args: ScenarioBArgs) -> Self {
        Self {
            leads: args.leads,
            rates: args.rates,
            churn: args.churn,
            fee: args.fee,
        }
    }
}

impl ScenarioArgs {
    /// Convert the flags into a config overlay.
    ///
    /// `--rates` must carry exactly four values.
    pub fn to_overrides(&self) -> Result<ScenarioConfig, Error> {
        let conversion_rates = match &self.rates {
            Some(rates) => Some(
                <[f64; CONVERSION_RATE_COUNT]>::try_from(rates.as_slice()).map_err(|_| {
                    Error::Configuration(format!(
                        "--rates expects {} comma-separated values, got {}",
                        CONVERSION_RATE_COUNT,
                        rates.len()
                    ))
                })?,
            ),
            None => None,
        };

        Ok(ScenarioConfig {
            lead_count: self.leads,
            conversion_rates,
            churn_or_upsell_rate: self.churn,
            monthly_fee: self.fee,
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
    Yaml,
    Markdown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_compute_flags_parse() {
        let cli = Cli::try_parse_from([
            "bowtie", "compute", "--leads", "500", "--rates", "10,20,30,40", "--churn", "-10",
            "-f", "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Compute { scenario, output } => {
                let overrides = scenario.to_overrides().unwrap();
                assert_eq!(overrides.lead_count, Some(500.0));
                assert_eq!(overrides.conversion_rates, Some([10.0, 20.0, 30.0, 40.0]));
                assert_eq!(overrides.churn_or_upsell_rate, Some(-10.0));
                assert_eq!(overrides.monthly_fee, None);
                assert_eq!(output.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_wrong_rate_count_is_rejected() {
        let args = ScenarioArgs {
            rates: Some(vec![10.0, 20.0]),
            ..Default::default()
        };
        let err = args.to_overrides().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().contains("got 2"));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["bowtie", "validate", "--strict", "-vv", "--plain"]).unwrap();
        assert_eq!(cli.verbosity, 2);
        assert!(cli.plain);
        assert!(matches!(cli.command, Commands::Validate { strict: true, .. }));
    }

    #[test]
    fn test_compare_side_flags() {
        let cli =
            Cli::try_parse_from(["bowtie", "compare", "--a-leads", "0", "--b-leads", "500"])
                .unwrap();
        match cli.command {
            Commands::Compare { a, b, .. } => {
                assert_eq!(ScenarioArgs::from(a).leads, Some(0.0));
                assert_eq!(ScenarioArgs::from(b).leads, Some(500.0));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
