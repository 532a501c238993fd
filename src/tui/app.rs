//! Explorer application state.
//!
//! [`App`] owns the comparison session, the raw form behind each panel and
//! the bar animations. Every edit parses the edited panel's form and, when it
//! parses, feeds the new input through `ComparisonSession::on_input_changed`.

use crossterm::event::KeyEvent;

use super::actions::{determine_action, Action, ActionContext};
use super::animation::{AnimationController, BarTransition};
use crate::config::DisplayConfig;
use crate::core::{ScenarioId, ScenarioInput};
use crate::input::{Field, ScenarioForm};
use crate::observability::set_scenario;
use crate::session::{ComparisonSession, SessionUpdate};

/// Per-panel UI state.
#[derive(Debug, Clone)]
pub struct PanelState {
    pub form: ScenarioForm,
    /// Input the panel was opened with; `r` restores it.
    pub initial: ScenarioInput,
    /// Parse error of the current form, if any.
    pub error: Option<String>,
    pub bars: BarTransition,
}

impl PanelState {
    fn new(input: ScenarioInput, widths: [f64; 6], frames: u16) -> Self {
        Self {
            form: ScenarioForm::from_input(&input),
            initial: input,
            error: None,
            bars: BarTransition::settled(widths, frames),
        }
    }

    pub fn is_invalid(&self) -> bool {
        self.error.is_some()
    }
}

pub struct App {
    session: ComparisonSession,
    panels: [PanelState; 2],
    focused_scenario: ScenarioId,
    focused_field: Field,
    show_help: bool,
    animate: bool,
    animation: AnimationController,
}

fn slot(id: ScenarioId) -> usize {
    match id {
        ScenarioId::A => 0,
        ScenarioId::B => 1,
    }
}

impl App {
    pub fn new(a: ScenarioInput, b: ScenarioInput, display: &DisplayConfig) -> Self {
        let a = editable_input(ScenarioId::A, a);
        let b = editable_input(ScenarioId::B, b);
        let session = ComparisonSession::new(a, b);
        let frames = if display.animate {
            display.animation_frames
        } else {
            0
        };
        let widths = |id: ScenarioId| session.scenario(id).view().render_state().widths();
        let panels = [
            PanelState::new(a, widths(ScenarioId::A), frames),
            PanelState::new(b, widths(ScenarioId::B), frames),
        ];

        Self {
            session,
            panels,
            focused_scenario: ScenarioId::A,
            focused_field: Field::LeadCount,
            show_help: false,
            animate: display.animate,
            animation: AnimationController::new(usize::from(display.fps)),
        }
    }

    pub fn session(&self) -> &ComparisonSession {
        &self.session
    }

    pub fn panel(&self, id: ScenarioId) -> &PanelState {
        &self.panels[slot(id)]
    }

    fn panel_mut(&mut self, id: ScenarioId) -> &mut PanelState {
        &mut self.panels[slot(id)]
    }

    pub fn focused_scenario(&self) -> ScenarioId {
        self.focused_scenario
    }

    pub fn focused_field(&self) -> Field {
        self.focused_field
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn animation(&self) -> &AnimationController {
        &self.animation
    }

    /// Whether either panel holds text that does not parse.
    pub fn has_invalid_input(&self) -> bool {
        self.panels.iter().any(PanelState::is_invalid)
    }

    /// Bar widths to draw for a panel this frame.
    pub fn displayed_widths(&self, id: ScenarioId) -> [f64; 6] {
        self.panel(id).bars.current()
    }

    pub fn is_animating(&self) -> bool {
        self.animate && self.panels.iter().any(|p| !p.bars.is_done())
    }

    /// Advance animations by one frame.
    pub fn tick(&mut self) {
        self.animation.tick();
        for panel in &mut self.panels {
            panel.bars.step();
        }
    }

    pub fn action_context(&self) -> ActionContext {
        ActionContext {
            focused_kind: self.focused_field.kind(),
            help_visible: self.show_help,
        }
    }

    /// Handle a key press. Returns true when the explorer should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match determine_action(key, self.action_context()) {
            Some(action) => self.apply_action(action),
            None => false,
        }
    }

    /// Execute an action. Returns true when the explorer should exit.
    pub fn apply_action(&mut self, action: Action) -> bool {
        let id = self.focused_scenario;
        let field = self.focused_field;

        match action {
            Action::Quit => return true,
            Action::NextPanel | Action::PrevPanel => {
                self.focused_scenario = id.other();
            }
            Action::NextField => self.focused_field = step_field(field, 1),
            Action::PrevField => self.focused_field = step_field(field, -1),
            Action::Nudge(step) => {
                if self.panel_mut(id).form.nudge(field, step) {
                    self.recompute(id);
                }
            }
            Action::Type(c) => {
                if self.panel_mut(id).form.push_char(field, c) {
                    self.recompute(id);
                }
            }
            Action::Backspace => {
                if self.panel_mut(id).form.backspace(field) {
                    self.recompute(id);
                }
            }
            Action::ResetPanel => {
                let panel = self.panel_mut(id);
                panel.form = ScenarioForm::from_input(&panel.initial);
                self.recompute(id);
            }
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::CloseHelp => self.show_help = false,
        }
        false
    }

    /// Parse a panel's form and push the result through the session.
    ///
    /// A parse failure marks that panel invalid and leaves the session alone:
    /// the other panel's bars and the delta report keep their last valid state.
    pub fn recompute(&mut self, id: ScenarioId) -> Option<SessionUpdate> {
        let _scenario = set_scenario(id);
        match self.panel(id).form.parse() {
            Ok(input) => {
                let update = self.session.on_input_changed(id, input);
                let panel = self.panel_mut(id);
                panel.error = None;
                panel.bars.retarget(update.render.widths());
                Some(update)
            }
            Err(e) => {
                tracing::debug!(scenario = %id, error = %e, "input rejected");
                self.panel_mut(id).error = Some(e.to_string());
                None
            }
        }
    }
}

/// The input as the panel's form can hold it, sliders clamped to their range.
fn editable_input(id: ScenarioId, input: ScenarioInput) -> ScenarioInput {
    let editable = ScenarioForm::from_input(&input).parse().unwrap_or(input);
    if editable != input {
        tracing::warn!(scenario = %id, "rates outside the slider ranges clamped for the explorer");
    }
    editable
}

fn step_field(field: Field, delta: isize) -> Field {
    let len = Field::ALL.len() as isize;
    let next = (field.position() as isize + delta).rem_euclid(len);
    Field::ALL[next as usize]
}
