//! Pure action determination for explorer keyboard handling.
//!
//! `determine_action` maps a key plus a little context to an [`Action`];
//! `App::apply_action` performs the mutation. Keeping the mapping pure lets
//! the key table be tested without building an app.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::input::FieldKind;

/// Slider step for Left/Right.
pub const SLIDER_STEP: f64 = 1.0;
/// Slider step for Shift+Left/Right.
pub const SLIDER_BIG_STEP: f64 = 10.0;

/// Every user intent the explorer understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    NextPanel,
    PrevPanel,
    NextField,
    PrevField,
    /// Move the focused slider by this many percentage points.
    Nudge(f64),
    /// Type a character into the focused text field.
    Type(char),
    Backspace,
    /// Restore the focused panel to its starting values.
    ResetPanel,
    ToggleHelp,
    CloseHelp,
}

/// State the key mapping depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionContext {
    pub focused_kind: FieldKind,
    pub help_visible: bool,
}

impl ActionContext {
    pub fn text() -> Self {
        Self {
            focused_kind: FieldKind::Text,
            help_visible: false,
        }
    }

    pub fn slider() -> Self {
        Self {
            focused_kind: crate::input::RATE_SLIDER,
            help_visible: false,
        }
    }

    fn on_text(&self) -> bool {
        self.focused_kind == FieldKind::Text
    }
}

/// Pure function: determine which action a key triggers.
///
/// Returns `None` for keys that mean nothing in the current context.
pub fn determine_action(key: KeyEvent, ctx: ActionContext) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
        SLIDER_BIG_STEP
    } else {
        SLIDER_STEP
    };

    match key.code {
        KeyCode::Esc if ctx.help_visible => Some(Action::CloseHelp),
        KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),

        // Panels
        KeyCode::Tab => Some(Action::NextPanel),
        KeyCode::BackTab => Some(Action::PrevPanel),

        // Fields
        KeyCode::Up => Some(Action::PrevField),
        KeyCode::Down | KeyCode::Enter => Some(Action::NextField),

        // Sliders
        KeyCode::Left if !ctx.on_text() => Some(Action::Nudge(-step)),
        KeyCode::Right if !ctx.on_text() => Some(Action::Nudge(step)),

        // Text fields
        KeyCode::Backspace if ctx.on_text() => Some(Action::Backspace),
        KeyCode::Char(c)
            if ctx.on_text() && (c.is_ascii_digit() || matches!(c, '.' | '-' | 'e' | 'E')) =>
        {
            Some(Action::Type(c))
        }

        KeyCode::Char('r') => Some(Action::ResetPanel),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn shift(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::SHIFT)
    }

    #[test]
    fn quit_keys() {
        for ctx in [ActionContext::text(), ActionContext::slider()] {
            assert_eq!(determine_action(key(KeyCode::Char('q')), ctx), Some(Action::Quit));
            assert_eq!(determine_action(key(KeyCode::Esc), ctx), Some(Action::Quit));
            assert_eq!(
                determine_action(
                    KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                    ctx
                ),
                Some(Action::Quit)
            );
        }
    }

    #[test]
    fn esc_closes_help_first() {
        let ctx = ActionContext {
            help_visible: true,
            ..ActionContext::text()
        };
        assert_eq!(determine_action(key(KeyCode::Esc), ctx), Some(Action::CloseHelp));
    }

    #[test]
    fn tab_switches_panels() {
        let ctx = ActionContext::slider();
        assert_eq!(determine_action(key(KeyCode::Tab), ctx), Some(Action::NextPanel));
        assert_eq!(
            determine_action(shift(KeyCode::BackTab), ctx),
            Some(Action::PrevPanel)
        );
    }

    #[test]
    fn arrows_move_sliders_only_on_sliders() {
        let slider = ActionContext::slider();
        assert_eq!(
            determine_action(key(KeyCode::Right), slider),
            Some(Action::Nudge(1.0))
        );
        assert_eq!(
            determine_action(shift(KeyCode::Left), slider),
            Some(Action::Nudge(-10.0))
        );
        assert_eq!(determine_action(key(KeyCode::Right), ActionContext::text()), None);
    }

    #[test]
    fn typing_only_on_text_fields() {
        let text = ActionContext::text();
        assert_eq!(
            determine_action(key(KeyCode::Char('7')), text),
            Some(Action::Type('7'))
        );
        assert_eq!(
            determine_action(key(KeyCode::Char('.')), text),
            Some(Action::Type('.'))
        );
        assert_eq!(determine_action(key(KeyCode::Backspace), text), Some(Action::Backspace));

        let slider = ActionContext::slider();
        assert_eq!(determine_action(key(KeyCode::Char('7')), slider), None);
        assert_eq!(determine_action(key(KeyCode::Backspace), slider), None);
    }

    #[test]
    fn reset_and_help() {
        let ctx = ActionContext::text();
        assert_eq!(
            determine_action(key(KeyCode::Char('r')), ctx),
            Some(Action::ResetPanel)
        );
        assert_eq!(
            determine_action(key(KeyCode::Char('?')), ctx),
            Some(Action::ToggleHelp)
        );
        assert_eq!(determine_action(key(KeyCode::Char('x')), ctx), None);
    }
}
