//! Raw scenario input as a user edits it.
//!
//! Prospects and the monthly fee are free text; the four conversion rates and
//! the churn/upsell rate are sliders with fixed ranges. [`ScenarioForm::parse`]
//! is the only place text becomes numbers, so the core never sees malformed
//! input.

use crate::core::{errors::Error, ScenarioInput, Stage, CONVERSION_RATE_COUNT};

/// Editable fields of a scenario panel, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    LeadCount,
    ConversionRate(usize),
    ChurnOrUpsell,
    MonthlyFee,
}

/// How a field is edited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    Slider { min: f64, max: f64 },
}

pub const RATE_SLIDER: FieldKind = FieldKind::Slider {
    min: 0.0,
    max: 100.0,
};
pub const CHURN_SLIDER: FieldKind = FieldKind::Slider {
    min: -100.0,
    max: 100.0,
};

impl Field {
    pub const ALL: [Field; 7] = [
        Field::LeadCount,
        Field::ConversionRate(0),
        Field::ConversionRate(1),
        Field::ConversionRate(2),
        Field::ConversionRate(3),
        Field::ChurnOrUpsell,
        Field::MonthlyFee,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::LeadCount => "Prospects",
            Field::ConversionRate(0) => "CR1 (Prospect to MQL)",
            Field::ConversionRate(1) => "CR2 (MQL to SQL)",
            Field::ConversionRate(2) => "CR3 (Show Rate & Hand-off)",
            Field::ConversionRate(_) => "CR4/WR (Win Rate)",
            Field::ChurnOrUpsell => "CR5 (Churn/Upsell rate during Onboarding)",
            Field::MonthlyFee => "ACV/Monthly ($)",
        }
    }

    /// Config/CLI key of the field, used in parse errors.
    pub fn key(self) -> String {
        match self {
            Field::LeadCount => "lead_count".to_string(),
            Field::ConversionRate(i) => format!("cr{}", i + 1),
            Field::ChurnOrUpsell => "churn_or_upsell_rate".to_string(),
            Field::MonthlyFee => "monthly_fee".to_string(),
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::LeadCount | Field::MonthlyFee => FieldKind::Text,
            Field::ConversionRate(_) => RATE_SLIDER,
            Field::ChurnOrUpsell => CHURN_SLIDER,
        }
    }

    /// Funnel stage a field feeds, for tooltips.
    pub fn stage(self) -> Option<Stage> {
        match self {
            Field::LeadCount => Some(Stage::Prospects),
            Field::ConversionRate(i) => Stage::from_index(i + 1),
            Field::ChurnOrUpsell => Some(Stage::Retained),
            Field::MonthlyFee => None,
        }
    }

    pub fn tooltip(self) -> &'static str {
        match self.stage() {
            Some(stage) => stage.tooltip(),
            None => "Contract value collected per retained customer each month",
        }
    }

    pub fn position(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }
}

/// The values behind one scenario panel, before parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioForm {
    pub lead_count: String,
    pub conversion_rates: [f64; CONVERSION_RATE_COUNT],
    pub churn_or_upsell_rate: f64,
    pub monthly_fee: String,
}

impl ScenarioForm {
    pub fn from_input(input: &ScenarioInput) -> Self {
        Self {
            lead_count: format_number(input.lead_count),
            conversion_rates: input.conversion_rates.map(|r| clamp_slider(RATE_SLIDER, r)),
            churn_or_upsell_rate: clamp_slider(CHURN_SLIDER, input.churn_or_upsell_rate),
            monthly_fee: format_number(input.monthly_fee),
        }
    }

    /// Build a fresh [`ScenarioInput`]; fails on the first unreadable text field.
    pub fn parse(&self) -> Result<ScenarioInput, Error> {
        Ok(ScenarioInput {
            lead_count: parse_number(Field::LeadCount, &self.lead_count)?,
            conversion_rates: self.conversion_rates,
            churn_or_upsell_rate: self.churn_or_upsell_rate,
            monthly_fee: parse_number(Field::MonthlyFee, &self.monthly_fee)?,
        })
    }

    pub fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::LeadCount => Some(&mut self.lead_count),
            Field::MonthlyFee => Some(&mut self.monthly_fee),
            _ => None,
        }
    }

    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::LeadCount => Some(&self.lead_count),
            Field::MonthlyFee => Some(&self.monthly_fee),
            _ => None,
        }
    }

    pub fn slider(&self, field: Field) -> Option<f64> {
        match field {
            Field::ConversionRate(i) => self.conversion_rates.get(i).copied(),
            Field::ChurnOrUpsell => Some(self.churn_or_upsell_rate),
            _ => None,
        }
    }

    /// Move a slider by `step`, staying inside its range. Returns true if it moved.
    pub fn nudge(&mut self, field: Field, step: f64) -> bool {
        let kind = field.kind();
        let slot = match field {
            Field::ConversionRate(i) => match self.conversion_rates.get_mut(i) {
                Some(slot) => slot,
                None => return false,
            },
            Field::ChurnOrUpsell => &mut self.churn_or_upsell_rate,
            _ => return false,
        };
        let next = clamp_slider(kind, *slot + step);
        let moved = next != *slot;
        *slot = next;
        moved
    }

    /// Append a typed character to a text field. Only number characters are kept.
    pub fn push_char(&mut self, field: Field, c: char) -> bool {
        if !(c.is_ascii_digit() || matches!(c, '.' | '-' | 'e' | 'E')) {
            return false;
        }
        match self.text_mut(field) {
            Some(text) => {
                text.push(c);
                true
            }
            None => false,
        }
    }

    pub fn backspace(&mut self, field: Field) -> bool {
        self.text_mut(field).and_then(|text| text.pop()).is_some()
    }
}

impl Default for ScenarioForm {
    fn default() -> Self {
        Self::from_input(&ScenarioInput::default())
    }
}

/// Parse a text field the way a user would expect: surrounding blanks ignored.
pub fn parse_number(field: Field, raw: &str) -> Result<f64, Error> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| Error::parse(field.key(), raw))
}

fn clamp_slider(kind: FieldKind, value: f64) -> f64 {
    match kind {
        FieldKind::Slider { min, max } if value.is_finite() => value.clamp(min, max),
        FieldKind::Slider { min, .. } => min,
        FieldKind::Text => value,
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
