use colored::*;
use std::env;
use std::io::IsTerminal;

use crate::comparison::StageDelta;
use crate::core::{ScenarioId, Stage};

/// Text shown in place of a scenario's numbers when one of its fields fails to parse.
pub const INVALID_INPUT: &str = "Invalid input";

/// Shown where a percentage has no defined value (zero baseline).
pub const UNDEFINED_PERCENT: &str = "n/a";

pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,   // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattingConfig {
    pub color: ColorMode,
    pub currency_symbol: String,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl FormattingConfig {
    pub fn new(color: ColorMode, currency_symbol: impl Into<String>) -> Self {
        Self {
            color,
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Check NO_COLOR environment variable (per no-color.org standard)
        if env::var("NO_COLOR").is_ok() {
            config.color = ColorMode::Never;
        }

        // Check CLICOLOR environment variable
        if let Ok(val) = env::var("CLICOLOR") {
            if val == "0" {
                config.color = ColorMode::Never;
            }
        }

        // Check CLICOLOR_FORCE environment variable
        if let Ok(val) = env::var("CLICOLOR_FORCE") {
            if val == "1" {
                config.color = ColorMode::Always;
            }
        }

        config
    }

    /// Create a plain output configuration (no colors)
    pub fn plain() -> Self {
        Self {
            color: ColorMode::Never,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }
}

pub trait OutputFormatter {
    fn success(&self, text: &str) -> String;
    fn error(&self, text: &str) -> String;
    fn warning(&self, text: &str) -> String;
    fn header(&self, text: &str) -> String;
    fn bold(&self, text: &str) -> String;
    fn dim(&self, text: &str) -> String;

    /// Colour a delta by its sign: growth green, decline red.
    fn signed(&self, value: f64, text: &str) -> String {
        if value > 0.0 {
            self.success(text)
        } else if value < 0.0 {
            self.error(text)
        } else {
            text.to_string()
        }
    }
}

pub struct ColoredFormatter {
    config: FormattingConfig,
}

impl ColoredFormatter {
    pub fn new(config: FormattingConfig) -> Self {
        // Set colored control based on configuration
        if config.color.should_use_color() {
            colored::control::set_override(true);
        } else {
            colored::control::set_override(false);
        }

        Self { config }
    }

    fn paint(&self, text: &str, paint: impl FnOnce(&str) -> ColoredString) -> String {
        if self.config.color.should_use_color() {
            paint(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for ColoredFormatter {
    fn success(&self, text: &str) -> String {
        self.paint(text, |t| t.green())
    }

    fn error(&self, text: &str) -> String {
        self.paint(text, |t| t.red())
    }

    fn warning(&self, text: &str) -> String {
        self.paint(text, |t| t.yellow())
    }

    fn header(&self, text: &str) -> String {
        self.paint(text, |t| t.blue().bold())
    }

    fn bold(&self, text: &str) -> String {
        self.paint(text, |t| t.bold())
    }

    fn dim(&self, text: &str) -> String {
        self.paint(text, |t| t.dimmed())
    }
}

pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn success(&self, text: &str) -> String {
        text.to_string()
    }

    fn error(&self, text: &str) -> String {
        text.to_string()
    }

    fn warning(&self, text: &str) -> String {
        text.to_string()
    }

    fn header(&self, text: &str) -> String {
        text.to_string()
    }

    fn bold(&self, text: &str) -> String {
        text.to_string()
    }

    fn dim(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Pick a formatter for the configuration
pub fn formatter_for(config: &FormattingConfig) -> Box<dyn OutputFormatter> {
    if config.color.should_use_color() {
        Box::new(ColoredFormatter::new(config.clone()))
    } else {
        Box::new(PlainFormatter)
    }
}

fn detect_color_support() -> bool {
    // Check if we're in a dumb terminal
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    // Check if stdout is a TTY
    std::io::stdout().is_terminal()
}

// Display rounding: currency 2 places, counts 0, percentages 1, slider labels 0.

pub fn format_currency(value: f64, symbol: &str) -> String {
    format!("{symbol}{value:.2}")
}

pub fn format_count(value: f64) -> String {
    format!("{value:.0}")
}

pub fn format_percent(percent: Option<f64>) -> String {
    match percent {
        Some(p) => format!("{p:.1}%"),
        None => UNDEFINED_PERCENT.to_string(),
    }
}

pub fn format_slider_percent(value: f64) -> String {
    format!("{value:.0}%")
}

/// Chart annotation: `"MQL: 250 (25.0%)"`.
pub fn format_bar_label(stage: Stage, value: f64, percent_of_first: Option<f64>) -> String {
    format!(
        "{}: {} ({})",
        stage.label(),
        format_count(value),
        format_percent(percent_of_first)
    )
}

/// Delta line: `"Won Δ: 4, 100.0%"`, with `", Δ$: 117.19"` on the Retained stage.
pub fn format_stage_delta(delta: &StageDelta) -> String {
    let mut text = format!(
        "{} Δ: {}, {}",
        delta.stage.label(),
        format_count(delta.absolute_delta),
        format_percent(delta.percent_delta)
    );
    if let Some(dollars) = delta.dollar_delta {
        text.push_str(&format!(", Δ$: {dollars:.2}"));
    }
    text
}

/// `"MRR (Left): $87.89"`
pub fn format_mrr_line(scenario: ScenarioId, mrr: f64, symbol: &str) -> String {
    format!("MRR ({}): {}", scenario.side(), format_currency(mrr, symbol))
}

/// `"MRR Difference: $0.00"`
pub fn format_mrr_difference(delta: f64, symbol: &str) -> String {
    format!("MRR Difference: {}", format_currency(delta, symbol))
}
