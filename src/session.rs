//! Side-by-side scenario contexts and the update contract between them.
//!
//! Each [`ScenarioContext`] owns its input, the cached metrics derived from it,
//! and the funnel view of its panel. The two contexts share nothing mutable; a
//! [`ComparisonSession`] groups them and recomputes the delta report whenever
//! one side changes. Callers apply the returned data to whatever UI they draw.

use serde::Serialize;

use crate::comparison::{compare_scenarios, DeltaReport};
use crate::core::{MrrResult, ScenarioId, ScenarioInput, ScenarioMetrics};
use crate::metrics::compute_scenario;
use crate::view::{FunnelRenderState, FunnelViewState};

/// One scenario panel: input, cached metrics, and view state.
#[derive(Debug, Clone)]
pub struct ScenarioContext {
    id: ScenarioId,
    input: ScenarioInput,
    metrics: ScenarioMetrics,
    view: FunnelViewState,
}

impl ScenarioContext {
    pub fn new(id: ScenarioId, input: ScenarioInput) -> Self {
        let metrics = compute_scenario(&input);
        Self {
            id,
            input,
            metrics,
            view: FunnelViewState::new(metrics.stages),
        }
    }

    pub fn id(&self) -> ScenarioId {
        self.id
    }

    pub fn input(&self) -> &ScenarioInput {
        &self.input
    }

    pub fn metrics(&self) -> &ScenarioMetrics {
        &self.metrics
    }

    pub fn view(&self) -> &FunnelViewState {
        &self.view
    }

    /// Replace the input, recompute metrics and refresh the view.
    ///
    /// Metrics are reused when the input is unchanged.
    fn apply(&mut self, input: ScenarioInput) -> FunnelRenderState {
        if input != self.input {
            self.input = input;
            self.metrics = compute_scenario(&input);
        }
        self.view.update(self.metrics.stages)
    }
}

/// Result of applying one input change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionUpdate {
    pub scenario: ScenarioId,
    /// MRR of the scenario that changed.
    pub mrr: MrrResult,
    /// B against A, recomputed after the change.
    pub deltas: DeltaReport,
    /// New funnel geometry of the scenario that changed.
    pub render: FunnelRenderState,
}

/// Two independent scenario contexts compared against each other.
#[derive(Debug, Clone)]
pub struct ComparisonSession {
    a: ScenarioContext,
    b: ScenarioContext,
    deltas: DeltaReport,
}

impl ComparisonSession {
    pub fn new(a: ScenarioInput, b: ScenarioInput) -> Self {
        let a = ScenarioContext::new(ScenarioId::A, a);
        let b = ScenarioContext::new(ScenarioId::B, b);
        let deltas = compare_scenarios(a.metrics(), b.metrics(), b.input().monthly_fee);
        Self { a, b, deltas }
    }

    pub fn scenario(&self, id: ScenarioId) -> &ScenarioContext {
        match id {
            ScenarioId::A => &self.a,
            ScenarioId::B => &self.b,
        }
    }

    fn scenario_mut(&mut self, id: ScenarioId) -> &mut ScenarioContext {
        match id {
            ScenarioId::A => &mut self.a,
            ScenarioId::B => &mut self.b,
        }
    }

    /// Last computed delta report (B against A).
    pub fn deltas(&self) -> &DeltaReport {
        &self.deltas
    }

    /// Apply a new input to one scenario and return everything a renderer needs.
    pub fn on_input_changed(&mut self, scenario: ScenarioId, input: ScenarioInput) -> SessionUpdate {
        let render = self.scenario_mut(scenario).apply(input);
        self.deltas = compare_scenarios(
            self.a.metrics(),
            self.b.metrics(),
            self.b.input().monthly_fee,
        );

        tracing::debug!(
            scenario = %scenario,
            mrr = self.scenario(scenario).metrics().mrr.mrr,
            mrr_delta = self.deltas.mrr_delta,
            "scenario recomputed"
        );

        SessionUpdate {
            scenario,
            mrr: self.scenario(scenario).metrics().mrr,
            deltas: self.deltas,
            render,
        }
    }
}

impl Default for ComparisonSession {
    fn default() -> Self {
        Self::new(ScenarioInput::default(), ScenarioInput::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Stage;
    use crate::view::ViewPhase;

    #[test]
    fn test_default_session_is_balanced() {
        let session = ComparisonSession::default();
        assert!(session.deltas().is_unchanged());
        assert_eq!(
            session.scenario(ScenarioId::A).view().phase(),
            ViewPhase::Initialized
        );
    }

    #[test]
    fn test_change_only_touches_one_side() {
        let mut session = ComparisonSession::default();
        let before_a = session.scenario(ScenarioId::A).view().render_state().clone();

        let update = session.on_input_changed(
            ScenarioId::B,
            ScenarioInput {
                lead_count: 2000.0,
                ..ScenarioInput::default()
            },
        );

        assert_eq!(update.scenario, ScenarioId::B);
        assert_eq!(update.mrr.mrr, 87.890625 * 2.0);
        assert_eq!(update.deltas.get(Stage::Prospects).absolute_delta, 1000.0);
        assert_eq!(update.deltas.mrr_delta, 87.890625);
        assert_eq!(update.render.values[Stage::Prospects], 2000.0);

        let a = session.scenario(ScenarioId::A);
        assert_eq!(a.view().render_state(), &before_a);
        assert_eq!(a.view().phase(), ViewPhase::Initialized);
        assert_eq!(
            session.scenario(ScenarioId::B).view().phase(),
            ViewPhase::Updated
        );
    }

    #[test]
    fn test_fee_change_on_a_moves_mrr_delta_but_not_dollar_delta() {
        let mut session = ComparisonSession::default();
        let update = session.on_input_changed(
            ScenarioId::A,
            ScenarioInput {
                monthly_fee: 60.0,
                ..ScenarioInput::default()
            },
        );

        assert_eq!(update.deltas.mrr_delta, -87.890625);
        assert_eq!(update.deltas.retained_dollar_delta(), 0.0);
    }

    #[test]
    fn test_zero_baseline_session_does_not_fault() {
        let mut session = ComparisonSession::new(
            ScenarioInput {
                lead_count: 0.0,
                ..ScenarioInput::default()
            },
            ScenarioInput::default(),
        );
        assert!(session
            .scenario(ScenarioId::A)
            .view()
            .render_state()
            .is_degenerate());

        let update = session.on_input_changed(
            ScenarioId::B,
            ScenarioInput {
                lead_count: 500.0,
                ..ScenarioInput::default()
            },
        );
        let prospects = update.deltas.get(Stage::Prospects);
        assert_eq!(prospects.absolute_delta, 500.0);
        assert_eq!(prospects.percent_delta, None);
    }

    #[test]
    fn test_unchanged_input_still_refreshes_view() {
        let mut session = ComparisonSession::default();
        let first = session.on_input_changed(ScenarioId::A, ScenarioInput::default());
        let second = session.on_input_changed(ScenarioId::A, ScenarioInput::default());
        assert_eq!(first, second);
        assert_eq!(session.scenario(ScenarioId::A).view().update_count(), 2);
    }
}
