use serde::{Deserialize, Serialize};

use crate::core::{ScenarioId, ScenarioInput, CONVERSION_RATE_COUNT};
use crate::formatting::DEFAULT_CURRENCY_SYMBOL;

/// Root configuration structure for bowtie
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BowtieConfig {
    /// Bootstrap values for the left-hand scenario
    #[serde(default)]
    pub scenario_a: Option<ScenarioConfig>,

    /// Bootstrap values for the right-hand scenario
    #[serde(default)]
    pub scenario_b: Option<ScenarioConfig>,

    /// Display configuration for output formatting and the explorer
    #[serde(default)]
    pub display: Option<DisplayConfig>,

    /// Domain validation behaviour
    #[serde(default)]
    pub validation: Option<ValidationConfig>,
}

/// Scenario values; any field left out falls back to the bootstrap scenario.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub lead_count: Option<f64>,

    #[serde(default)]
    pub conversion_rates: Option<[f64; CONVERSION_RATE_COUNT]>,

    #[serde(default)]
    pub churn_or_upsell_rate: Option<f64>,

    #[serde(default)]
    pub monthly_fee: Option<f64>,
}

impl ScenarioConfig {
    /// Overlay these values on `base`.
    pub fn apply_to(&self, base: ScenarioInput) -> ScenarioInput {
        ScenarioInput {
            lead_count: self.lead_count.unwrap_or(base.lead_count),
            conversion_rates: self.conversion_rates.unwrap_or(base.conversion_rates),
            churn_or_upsell_rate: self
                .churn_or_upsell_rate
                .unwrap_or(base.churn_or_upsell_rate),
            monthly_fee: self.monthly_fee.unwrap_or(base.monthly_fee),
        }
    }

    pub fn to_input(&self) -> ScenarioInput {
        self.apply_to(ScenarioInput::default())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Animate funnel bars between snapshots in the explorer
    #[serde(default = "default_animate")]
    pub animate: bool,

    /// Frames one bar transition takes
    #[serde(default = "default_animation_frames")]
    pub animation_frames: u16,

    #[serde(default = "default_fps")]
    pub fps: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            animate: default_animate(),
            animation_frames: default_animation_frames(),
            fps: default_fps(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Treat domain warnings as failures in `bowtie validate`
    #[serde(default)]
    pub strict: bool,
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}
fn default_animate() -> bool {
    true
}
fn default_animation_frames() -> u16 {
    12
}
fn default_fps() -> u16 {
    30
}

impl BowtieConfig {
    /// Scenario input configured for one side, bootstrap defaults filled in.
    pub fn scenario_input(&self, scenario: ScenarioId) -> ScenarioInput {
        let configured = match scenario {
            ScenarioId::A => self.scenario_a.as_ref(),
            ScenarioId::B => self.scenario_b.as_ref(),
        };
        configured
            .map(ScenarioConfig::to_input)
            .unwrap_or_default()
    }

    pub fn display(&self) -> DisplayConfig {
        self.display.clone().unwrap_or_default()
    }

    pub fn is_strict(&self) -> bool {
        self.validation.map(|v| v.strict).unwrap_or(false)
    }
}
