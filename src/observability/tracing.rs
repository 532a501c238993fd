//! Tracing subscriber setup.
//!
//! Log output goes to stderr, except while the explorer owns the terminal:
//! writing there would tear the alternate screen, so records are dropped.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing_subscriber::EnvFilter;

/// Environment variable overriding the verbosity-derived filter.
pub const LOG_ENV_VAR: &str = "BOWTIE_LOG";

static TUI_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Mark whether the TUI currently owns the terminal.
pub fn set_tui_active(active: bool) {
    TUI_ACTIVE.store(active, Ordering::SeqCst);
}

pub fn is_tui_active() -> bool {
    TUI_ACTIVE.load(Ordering::SeqCst)
}

/// Filter directive for a `-v` count.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(TuiAwareWriter::new)
        .try_init();

    if let Err(e) = result {
        // Already configured (tests, embedding); keep the existing one
        tracing::debug!("tracing subscriber already installed: {}", e);
    }
}

/// Stderr unless the TUI is active.
pub enum TuiAwareWriter {
    Stderr(io::Stderr),
    Sink(io::Sink),
}

impl TuiAwareWriter {
    pub fn new() -> Self {
        if is_tui_active() {
            Self::Sink(io::sink())
        } else {
            Self::Stderr(io::stderr())
        }
    }
}

impl Default for TuiAwareWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for TuiAwareWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stderr(w) => w.write(buf),
            Self::Sink(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stderr(w) => w.flush(),
            Self::Sink(w) => w.flush(),
        }
    }
}
