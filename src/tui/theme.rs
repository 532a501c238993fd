//! Color themes and styling for TUI components.

use ratatui::style::{Color, Modifier, Style};

/// Color scheme for the scenario explorer
pub struct Theme {
    /// Primary accent color (cyan for the focused panel and field)
    pub primary: Color,
    /// Growth color (green for positive deltas)
    pub positive: Color,
    /// Decline color (red for negative deltas)
    pub negative: Color,
    /// Muted color (dark gray for inactive elements)
    pub muted: Color,
    /// Text color (white for normal text)
    pub text: Color,
    /// Funnel bar color
    pub bar: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            primary: Color::Cyan,
            positive: Color::Green,
            negative: Color::Red,
            muted: Color::DarkGray,
            text: Color::White,
            bar: Color::Blue,
        }
    }

    /// Warning color (yellow for invalid input)
    pub fn warning(&self) -> Color {
        Color::Yellow
    }

    /// Border style of a scenario panel
    pub fn panel_border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.primary)
        } else {
            Style::default().fg(self.muted)
        }
    }

    /// Style for input labels
    pub fn field_label_style(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(self.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.text)
        }
    }

    pub fn field_value_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.primary)
        } else {
            Style::default().fg(self.text)
        }
    }

    pub fn mrr_style(&self) -> Style {
        Style::default().fg(self.text).add_modifier(Modifier::BOLD)
    }

    pub fn invalid_style(&self) -> Style {
        Style::default()
            .fg(self.warning())
            .add_modifier(Modifier::BOLD)
    }

    /// Style for funnel bars; stale bars of an invalid panel are muted
    pub fn bar_style(&self, stale: bool) -> Style {
        if stale {
            Style::default().fg(self.muted)
        } else {
            Style::default().fg(self.bar)
        }
    }

    /// Style for a delta, coloured by its sign
    pub fn delta_style(&self, value: f64) -> Style {
        if value > 0.0 {
            Style::default().fg(self.positive)
        } else if value < 0.0 {
            Style::default().fg(self.negative)
        } else {
            Style::default().fg(self.text)
        }
    }

    /// Style for hints and tooltips
    pub fn hint_style(&self) -> Style {
        Style::default().fg(self.muted)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
