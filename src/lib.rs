// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod comparison;
pub mod config;
pub mod core;
pub mod formatting;
pub mod input;
pub mod io;
pub mod metrics;
pub mod observability;
pub mod output;
pub mod session;
pub mod tui;
pub mod validation;
pub mod view;

// Re-export commonly used types
pub use crate::core::{
    Error, MrrResult, Result, ScenarioId, ScenarioInput, ScenarioMetrics, Stage, StageValues,
};

pub use crate::metrics::{compute_metrics, compute_scenario};

pub use crate::comparison::{
    compare_scenarios, Comparator, ComparisonResult, DeltaReport, MrrTrend, StageDelta,
};

pub use crate::view::{derive_render_state, FunnelRenderState, FunnelViewState, StageBar};

pub use crate::session::{ComparisonSession, ScenarioContext, SessionUpdate};

pub use crate::validation::{validate_input, DomainWarning, ValidationReport};
