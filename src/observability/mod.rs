//! Observability infrastructure for crash reports and debugging.
//!
//! ## Features
//!
//! - **Tracing**: `tracing-subscriber` setup driven by `-v` and `BOWTIE_LOG`
//! - **Panic Hook**: Produces structured crash reports with context
//! - **Context Tracking**: Thread-local command phase and scenario tracking
//!
//! ## Usage
//!
//! ```ignore
//! use bowtie::observability::{init_tracing, install_panic_hook, set_phase, Phase};
//!
//! fn main() {
//!     install_panic_hook();
//!     init_tracing(0);
//!     let _phase = set_phase(Phase::Computing);
//!     // If a panic occurs here, the crash report shows the phase
//! }
//! ```

pub mod context;
pub mod panic_hook;
pub mod tracing;

pub use context::{
    get_current_context, reset_context, set_phase, set_scenario, ContextGuard, OperationContext,
    Phase,
};
pub use panic_hook::install_panic_hook;
pub use tracing::{init_tracing, is_tui_active, level_for_verbosity, set_tui_active, LOG_ENV_VAR};
