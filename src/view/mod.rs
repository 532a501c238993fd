//! Per-scenario funnel view state.
//!
//! [`FunnelViewState`] keeps the last stage values a scenario panel rendered and
//! turns new values into the geometry a renderer needs: bar widths normalized to
//! the largest stage and labels relative to the first stage. It owns no drawing
//! primitives; the TUI and report writers consume [`FunnelRenderState`].

use serde::{Deserialize, Serialize};

use crate::core::{Stage, StageValues};
use crate::formatting::format_bar_label;

/// Geometry and annotation for one funnel stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageBar {
    pub stage: Stage,
    pub value: f64,
    /// `value / max(values)`, within `[0, 1]`.
    pub normalized_width: f64,
    /// `100 * value / values[0]`; `None` when the first stage is zero.
    pub percent_of_first: Option<f64>,
    pub label: String,
}

/// Everything needed to draw one scenario's funnel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelRenderState {
    pub values: StageValues,
    pub bars: [StageBar; 6],
}

impl FunnelRenderState {
    pub fn bar(&self, stage: Stage) -> &StageBar {
        &self.bars[stage.index()]
    }

    pub fn widths(&self) -> [f64; 6] {
        self.bars.each_ref().map(|bar| bar.normalized_width)
    }

    /// True when normalization had nothing to divide by.
    pub fn is_degenerate(&self) -> bool {
        self.bars.iter().all(|bar| bar.normalized_width == 0.0)
    }
}

/// Lifecycle of a view: built once, then updated any number of times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewPhase {
    Initialized,
    Updated,
}

/// Last-rendered funnel of one scenario panel.
#[derive(Debug, Clone)]
pub struct FunnelViewState {
    render: FunnelRenderState,
    phase: ViewPhase,
    update_count: u64,
}

impl FunnelViewState {
    pub fn new(initial: StageValues) -> Self {
        Self {
            render: derive_render_state(&initial),
            phase: ViewPhase::Initialized,
            update_count: 0,
        }
    }

    /// Replace the stored values and return the new render state.
    pub fn update(&mut self, new_values: StageValues) -> FunnelRenderState {
        self.render = derive_render_state(&new_values);
        self.phase = ViewPhase::Updated;
        self.update_count += 1;
        self.render.clone()
    }

    pub fn values(&self) -> &StageValues {
        &self.render.values
    }

    pub fn render_state(&self) -> &FunnelRenderState {
        &self.render
    }

    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }
}

/// Pure derivation of the render state from stage values.
///
/// Widths fall back to 0 when the largest stage is not a positive finite number
/// (all-zero funnels in particular).
pub fn derive_render_state(values: &StageValues) -> FunnelRenderState {
    let max = values.max();
    let first = values.first();

    let bars = Stage::ALL.map(|stage| {
        let value = values[stage];
        let percent_of_first = share_of(value, first);
        StageBar {
            stage,
            value,
            normalized_width: normalized_width(value, max),
            percent_of_first,
            label: format_bar_label(stage, value, percent_of_first),
        }
    });

    FunnelRenderState {
        values: *values,
        bars,
    }
}

fn normalized_width(value: f64, max: f64) -> f64 {
    if !(max.is_finite() && max > 0.0) {
        return 0.0;
    }
    let ratio = value / max;
    if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn share_of(value: f64, first: f64) -> Option<f64> {
    if first == 0.0 || !first.is_finite() {
        return None;
    }
    Some(100.0 * value / first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScenarioInput;
    use crate::metrics::compute_metrics;

    #[test]
    fn test_default_scenario_geometry() {
        let (stages, _) = compute_metrics(&ScenarioInput::default());
        let render = derive_render_state(&stages);

        assert_eq!(render.bar(Stage::Prospects).normalized_width, 1.0);
        assert_eq!(render.bar(Stage::Mql).normalized_width, 0.25);
        assert_eq!(render.bar(Stage::Mql).percent_of_first, Some(25.0));
        assert_eq!(render.bar(Stage::Mql).label, "MQL: 250 (25.0%)");
        assert_eq!(
            render.bar(Stage::Prospects).label,
            "Prospects/Leads: 1000 (100.0%)"
        );
    }

    #[test]
    fn test_all_zero_values_give_zero_widths() {
        let render = derive_render_state(&StageValues::zero());

        assert!(render.is_degenerate());
        assert_eq!(render.widths(), [0.0; 6]);
        assert!(render.bars.iter().all(|b| b.percent_of_first.is_none()));
        assert_eq!(render.bar(Stage::Won).label, "Won: 0 (n/a)");
    }

    #[test]
    fn test_percent_is_relative_to_first_not_max() {
        // Domain-violating funnel where MQL exceeds prospects
        let values = StageValues::new([100.0, 200.0, 50.0, 10.0, 5.0, 5.0]);
        let render = derive_render_state(&values);

        assert_eq!(render.bar(Stage::Prospects).normalized_width, 0.5);
        assert_eq!(render.bar(Stage::Mql).normalized_width, 1.0);
        assert_eq!(render.bar(Stage::Mql).percent_of_first, Some(200.0));
    }

    #[test]
    fn test_negative_values_clamp_to_zero_width() {
        let values = StageValues::new([100.0, 50.0, 25.0, 10.0, 5.0, -2.5]);
        let render = derive_render_state(&values);

        assert_eq!(render.bar(Stage::Retained).normalized_width, 0.0);
        assert_eq!(render.bar(Stage::Retained).percent_of_first, Some(-2.5));
    }

    #[test]
    fn test_update_replaces_snapshot() {
        let (initial, _) = compute_metrics(&ScenarioInput::default());
        let mut view = FunnelViewState::new(initial);
        assert_eq!(view.phase(), ViewPhase::Initialized);
        assert_eq!(view.update_count(), 0);

        let next = StageValues::new([10.0, 5.0, 0.0, 0.0, 0.0, 0.0]);
        let render = view.update(next);

        assert_eq!(view.phase(), ViewPhase::Updated);
        assert_eq!(view.values(), &next);
        assert_eq!(&render, view.render_state());
        assert_eq!(render.bar(Stage::Mql).normalized_width, 0.5);

        view.update(StageValues::zero());
        assert_eq!(view.update_count(), 2);
        assert!(view.render_state().is_degenerate());
    }

    #[test]
    fn test_update_is_idempotent() {
        let values = StageValues::new([80.0, 40.0, 20.0, 10.0, 5.0, 4.0]);
        let mut view = FunnelViewState::new(values);
        let first = view.update(values);
        let second = view.update(values);
        assert_eq!(first, second);
    }
}
