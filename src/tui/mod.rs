//! Terminal User Interface (TUI) for exploring two funnel scenarios.
//!
//! Scenario A sits on the left, scenario B on the right (stacked on narrow
//! terminals). Every edit recomputes the edited scenario and the comparison
//! below both panels; funnel bars animate towards each new snapshot.
//!
//! # Usage
//!
//! ```rust,no_run
//! use bowtie::config::DisplayConfig;
//! use bowtie::core::ScenarioInput;
//! use bowtie::tui::{app::App, ComparisonExplorer};
//!
//! let app = App::new(ScenarioInput::default(), ScenarioInput::default(), &DisplayConfig::default());
//! let mut explorer = ComparisonExplorer::new(app, "$")?;
//! explorer.run()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod actions;
pub mod animation;
pub mod app;
pub mod layout;
pub mod renderer;
pub mod theme;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

use crate::observability::set_tui_active;
use app::App;
use renderer::render_ui;

/// Poll interval while nothing is animating
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Interactive side-by-side scenario explorer
pub struct ComparisonExplorer {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app: App,
    currency_symbol: String,
}

impl ComparisonExplorer {
    /// Take over the terminal and create the explorer
    pub fn new(app: App, currency_symbol: impl Into<String>) -> Result<Self> {
        enable_raw_mode()?;
        set_tui_active(true);
        let terminal = restore_on_error(enter_alternate_screen, restore_terminal)?;

        Ok(Self {
            terminal,
            app,
            currency_symbol: currency_symbol.into(),
        })
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Run the interactive TUI event loop
    pub fn run(&mut self) -> Result<()> {
        loop {
            let symbol = &self.currency_symbol;
            let app = &self.app;
            self.terminal.draw(|f| render_ui(f, app, symbol))?;

            let timeout = if self.app.is_animating() {
                self.app.animation().frame_duration()
            } else {
                IDLE_POLL
            };

            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.app.handle_key(key) {
                        break; // Exit requested
                    }
                }
            }

            self.app.tick();
        }

        self.cleanup()?;
        Ok(())
    }

    /// Clean up and restore terminal
    fn cleanup(&mut self) -> Result<()> {
        set_tui_active(false);
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

fn enter_alternate_screen() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Undo a partial setup; `Drop` only runs once the explorer exists.
fn restore_terminal() {
    set_tui_active(false);
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Run `setup`, calling `restore` if it fails.
fn restore_on_error<T>(setup: impl FnOnce() -> Result<T>, restore: impl FnOnce()) -> Result<T> {
    setup().inspect_err(|_| restore())
}

impl Drop for ComparisonExplorer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
