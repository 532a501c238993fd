//! CLI command implementations for bowtie.
//!
//! Available commands:
//! - **compute**: Funnel and MRR of a single scenario
//! - **compare**: Per-stage deltas of scenario B against scenario A
//! - **explore**: Interactive side-by-side explorer
//! - **validate**: Domain checks on both configured scenarios
//! - **init**: Write a default `.bowtie.toml`

pub mod compare;
pub mod compute;
pub mod explore;
pub mod init;
pub mod validate;

pub use compare::{run_compare, CompareConfig};
pub use compute::{run_compute, ComputeConfig};
pub use explore::{run_explore, ExploreConfig};
pub use init::{init_config, init_config_in};
pub use validate::{run_validate, ValidateConfig};

use anyhow::Result;
use std::path::Path;

use crate::config::{resolve_config, BowtieConfig};
use crate::formatting::{ColorMode, FormattingConfig};
use crate::observability::{set_phase, Phase};

/// Settings every command starts from.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: BowtieConfig,
    pub formatting: FormattingConfig,
}

impl CommandContext {
    /// Load configuration and derive output formatting.
    pub fn load(config_path: Option<&Path>, plain: bool) -> Result<Self> {
        let _phase = set_phase(Phase::ConfigLoading);
        let config = resolve_config(config_path)?;
        let formatting = create_formatting_config(plain, &config);
        Ok(Self { config, formatting })
    }

    pub fn new(config: BowtieConfig, formatting: FormattingConfig) -> Self {
        Self { config, formatting }
    }
}

// Pure function to create formatting configuration
fn create_formatting_config(plain: bool, config: &BowtieConfig) -> FormattingConfig {
    let base = if plain {
        FormattingConfig::new(ColorMode::Never, "")
    } else {
        FormattingConfig::from_env()
    };
    base.with_currency_symbol(config.display().currency_symbol)
}
