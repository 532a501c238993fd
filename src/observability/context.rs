//! Thread-local context tracking for crash reports.
//!
//! Records which command phase is running and which scenario is being worked
//! on, so a crash report can say what bowtie was doing. Context guards use RAII
//! to restore the previous context on drop.

use std::cell::RefCell;

use crate::core::ScenarioId;

thread_local! {
    static CURRENT_CONTEXT: RefCell<OperationContext> = const { RefCell::new(OperationContext::new()) };
}

/// Context snapshot for the current operation.
#[derive(Debug, Clone, Default)]
pub struct OperationContext {
    /// Current command phase
    pub phase: Option<Phase>,
    /// Scenario being recomputed, if any
    pub scenario: Option<ScenarioId>,
}

impl OperationContext {
    /// Create a new empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: None,
            scenario: None,
        }
    }
}

/// Phases a bowtie command goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Locating and parsing .bowtie.toml
    ConfigLoading,
    /// Running the metrics engine
    Computing,
    /// Computing A/B deltas
    Comparing,
    /// Checking domain assumptions
    Validating,
    /// Writing a report
    OutputGeneration,
    /// Running the interactive explorer
    Interactive,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigLoading => write!(f, "config_loading"),
            Self::Computing => write!(f, "computing"),
            Self::Comparing => write!(f, "comparing"),
            Self::Validating => write!(f, "validating"),
            Self::OutputGeneration => write!(f, "output_generation"),
            Self::Interactive => write!(f, "interactive"),
        }
    }
}

/// RAII guard for restoring operation context on drop.
pub struct ContextGuard {
    previous: OperationContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = self.previous.clone();
        });
    }
}

/// Set the current phase.
///
/// Returns a guard that restores the previous phase on drop.
#[must_use]
pub fn set_phase(phase: Phase) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        ctx.borrow_mut().phase = Some(phase);
        ContextGuard { previous }
    })
}

/// Set the scenario being recomputed.
#[must_use]
pub fn set_scenario(scenario: ScenarioId) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        ctx.borrow_mut().scenario = Some(scenario);
        ContextGuard { previous }
    })
}

/// Get the current context snapshot.
///
/// Called by the panic hook to include context in crash reports.
#[must_use]
pub fn get_current_context() -> OperationContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// Reset the current thread's context to empty.
pub fn reset_context() {
    CURRENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = OperationContext::new();
    });
}
