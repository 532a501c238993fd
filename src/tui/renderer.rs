//! Core rendering logic for TUI components.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::animation::{render_bar, render_slider};
use super::app::App;
use super::layout::{calculate_layout, centered_rect};
use super::theme::Theme;
use crate::core::{ScenarioId, Stage};
use crate::formatting::{
    format_mrr_difference, format_mrr_line, format_slider_percent, format_stage_delta,
    INVALID_INPUT,
};
use crate::input::{Field, FieldKind};

/// Widest input label ("CR5 (Churn/Upsell rate during Onboarding)").
const LABEL_WIDTH: usize = 42;
/// Width reserved for funnel annotations such as "Prospects/Leads: 1000 (100.0%)".
const BAR_LABEL_WIDTH: usize = 32;
const SLIDER_CELLS: usize = 21;

/// Render the full explorer
pub fn render_ui(frame: &mut Frame, app: &App, currency_symbol: &str) {
    let theme = Theme::default_theme();
    let layout = calculate_layout(frame.area());

    for id in [ScenarioId::A, ScenarioId::B] {
        render_panel(frame, app, id, &theme, currency_symbol, layout.panels[slot(id)]);
    }
    render_deltas(frame, app, &theme, currency_symbol, layout.deltas);
    render_footer(frame, app, &theme, layout.footer);

    if app.show_help() {
        render_help(frame, &theme);
    }
}

fn slot(id: ScenarioId) -> usize {
    match id {
        ScenarioId::A => 0,
        ScenarioId::B => 1,
    }
}

fn render_panel(
    frame: &mut Frame,
    app: &App,
    id: ScenarioId,
    theme: &Theme,
    currency_symbol: &str,
    area: Rect,
) {
    let focused = app.focused_scenario() == id;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Scenario {id} ({}) ", id.side()))
        .border_style(theme.panel_border_style(focused));

    let mut lines = input_lines(app, id, theme);
    lines.push(Line::default());
    lines.push(mrr_line(app, id, theme, currency_symbol));
    lines.push(Line::default());
    lines.extend(funnel_lines(app, id, theme, area.width.saturating_sub(2) as usize));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn input_lines(app: &App, id: ScenarioId, theme: &Theme) -> Vec<Line<'static>> {
    let panel = app.panel(id);
    let panel_focused = app.focused_scenario() == id;

    Field::ALL
        .iter()
        .map(|&field| {
            let focused = panel_focused && app.focused_field() == field;
            let marker = if focused { "▸ " } else { "  " };
            let value = match field.kind() {
                FieldKind::Text => {
                    let text = panel.form.text(field).unwrap_or_default();
                    let cursor = if focused {
                        app.animation().cursor_char()
                    } else {
                        ""
                    };
                    format!("{text}{cursor}")
                }
                FieldKind::Slider { min, max } => {
                    let value = panel.form.slider(field).unwrap_or(min);
                    format!(
                        "{} {:>5}",
                        render_slider(value, min, max, SLIDER_CELLS),
                        format_slider_percent(value)
                    )
                }
            };

            Line::from(vec![
                Span::styled(marker, theme.field_label_style(focused)),
                Span::styled(
                    format!("{:<width$}", field.label(), width = LABEL_WIDTH),
                    theme.field_label_style(focused),
                ),
                Span::styled(value, theme.field_value_style(focused)),
            ])
        })
        .collect()
}

/// Both MRR lines switch to the invalid marker while either form fails to parse.
fn mrr_line(app: &App, id: ScenarioId, theme: &Theme, currency_symbol: &str) -> Line<'static> {
    if app.has_invalid_input() {
        return Line::from(Span::styled(INVALID_INPUT, theme.invalid_style()));
    }
    let mrr = app.session().scenario(id).metrics().mrr.mrr;
    Line::from(Span::styled(
        format_mrr_line(id, mrr, currency_symbol),
        theme.mrr_style(),
    ))
}

/// One horizontal bar per stage. An invalid panel keeps its last bars, muted.
fn funnel_lines(app: &App, id: ScenarioId, theme: &Theme, inner_width: usize) -> Vec<Line<'static>> {
    let render = app.session().scenario(id).view().render_state();
    let widths = app.displayed_widths(id);
    let stale = app.panel(id).is_invalid();
    let cells = inner_width.saturating_sub(BAR_LABEL_WIDTH + 1);

    Stage::ALL
        .iter()
        .map(|&stage| {
            let bar = render.bar(stage);
            Line::from(vec![
                Span::styled(
                    format!("{:<width$} ", bar.label, width = BAR_LABEL_WIDTH),
                    theme.field_label_style(false),
                ),
                Span::styled(
                    render_bar(widths[stage.index()], cells),
                    theme.bar_style(stale),
                ),
            ])
        })
        .collect()
}

fn render_deltas(frame: &mut Frame, app: &App, theme: &Theme, currency_symbol: &str, area: Rect) {
    let deltas = app.session().deltas();

    let mut lines: Vec<Line> = deltas
        .stages
        .iter()
        .map(|delta| {
            Line::from(Span::styled(
                format_stage_delta(delta),
                theme.delta_style(delta.absolute_delta),
            ))
        })
        .collect();
    lines.push(Line::from(Span::styled(
        format_mrr_difference(deltas.mrr_delta, currency_symbol),
        theme.delta_style(deltas.mrr_delta).add_modifier(ratatui::style::Modifier::BOLD),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Comparison (B vs A) ")
        .border_style(theme.panel_border_style(false));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_footer(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let field = app.focused_field();
    let lines = vec![
        Line::from(Span::styled(
            format!("{}: {}", field.label(), field.tooltip()),
            theme.hint_style(),
        )),
        Line::from(Span::styled(
            "Tab panel  ↑↓ field  ←→ slider (Shift ×10)  r reset  ? help  q quit",
            theme.hint_style(),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

const HELP_LINES: [(&str, &str); 9] = [
    ("Tab / Shift-Tab", "Switch between scenario A and B"),
    ("↑ / ↓", "Previous / next input"),
    ("← / →", "Move slider by 1"),
    ("Shift + ← / →", "Move slider by 10"),
    ("0-9 . - e", "Edit Prospects or monthly fee"),
    ("Backspace", "Delete last character"),
    ("r", "Reset the focused scenario"),
    ("?", "Toggle this help"),
    ("q / Esc / Ctrl-C", "Quit"),
];

fn render_help(frame: &mut Frame, theme: &Theme) {
    let area = centered_rect(60, HELP_LINES.len() as u16 + 2, frame.area());
    let lines: Vec<Line> = HELP_LINES
        .iter()
        .map(|(keys, what)| {
            Line::from(vec![
                Span::styled(format!("{keys:<18}"), theme.field_label_style(true)),
                Span::raw(*what),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Keys ")
        .border_style(theme.panel_border_style(true));
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayConfig;
    use crate::core::ScenarioInput;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> App {
        App::new(
            ScenarioInput::default(),
            ScenarioInput {
                monthly_fee: 40.0,
                ..ScenarioInput::default()
            },
            &DisplayConfig {
                animate: false,
                ..DisplayConfig::default()
            },
        )
    }

    fn draw(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render_ui(f, app, "$")).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_both_mrr_lines_and_difference() {
        let screen = draw(&app(), 160, 40);

        assert!(screen.contains("MRR (Left): $87.89"));
        assert!(screen.contains("MRR (Right): $117.19"));
        assert!(screen.contains("MRR Difference: $29.30"));
        assert!(screen.contains("Retained Δ: 0, 0.0%, Δ$: 0.00"));
        assert!(screen.contains("MQL: 250 (25.0%)"));
    }

    #[test]
    fn test_invalid_input_marks_both_mrr_lines() {
        let mut app = app();
        let before = draw(&app, 160, 40);
        // Switch to B and clear its Prospects field
        app.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        for _ in 0..4 {
            app.handle_key(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE));
        }
        let screen = draw(&app, 160, 40);

        assert_eq!(screen.matches(INVALID_INPUT).count(), 2);
        assert!(!screen.contains("MRR (Left)"));
        assert!(!screen.contains("MRR (Right)"));
        // Deltas and scenario A's bars keep their last valid state
        assert!(screen.contains("MRR Difference: $29.30"));
        assert!(screen.contains("MQL: 250 (25.0%)"));
        assert!(before.contains("MRR Difference: $29.30"));
    }

    #[test]
    fn test_narrow_terminal_still_renders() {
        let screen = draw(&app(), 80, 60);
        assert!(screen.contains("Scenario A (Left)"));
        assert!(screen.contains("Scenario B (Right)"));
    }

    #[test]
    fn test_help_overlay() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE));
        let screen = draw(&app, 160, 40);
        assert!(screen.contains("Keys"));
        assert!(screen.contains("Switch between scenario A and B"));
    }

    #[test]
    fn test_footer_shows_focused_tooltip() {
        let screen = draw(&app(), 160, 40);
        assert!(screen.contains(Stage::Prospects.tooltip()));
    }
}
