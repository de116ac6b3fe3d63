use super::layout::{self, LayoutKind, LayoutTransition};
use super::render::RenderSurface;
use super::scheduler::SimulationState;
use super::selection::Direction;
use super::Engine;

#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    StartSimulation,
    StopSimulation,
    ToggleForces,
    ToggleAutoRotate,
    Toggle2d,
    ResetCamera,
    ResetPositions,
    SetMinNodeDistance(f32),
    SwitchLayout(LayoutKind),
    Select(String),
    ClearSelection,
    SelectDirectional(Direction),
    Search(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum IntentOutcome {
    Done,
    SearchResults(Vec<String>),
}

impl Engine {
    fn enable_forces(&mut self, now_secs: f64) {
        match self.scheduler.state() {
            SimulationState::Stopped => self.scheduler.start(now_secs),
            SimulationState::Paused => self.scheduler.toggle_forces(now_secs),
            SimulationState::Active => {}
        }
    }

    pub fn apply(
        &mut self,
        intent: Intent,
        now_secs: f64,
        surface: &mut dyn RenderSurface,
    ) -> IntentOutcome {
        match intent {
            Intent::StartSimulation => {
                // The force field becomes the positioning authority again.
                self.layout = LayoutKind::ForceDirected;
                self.transition = None;
                self.enable_forces(now_secs);
            }
            Intent::StopSimulation => {
                self.scheduler.stop();
            }
            Intent::ToggleForces => {
                self.scheduler.toggle_forces(now_secs);
            }
            Intent::ToggleAutoRotate => {
                self.camera.toggle_auto_rotate();
            }
            Intent::Toggle2d => {
                let flattened = !self.field.is_two_d();
                self.field.set_two_d(flattened);
                self.bridge.sync_positions(&self.field, surface);
            }
            Intent::ResetCamera => {
                self.camera.reset_to_default();
            }
            Intent::ResetPositions => {
                self.field.reset_positions();
                self.bridge.sync_positions(&self.field, surface);
                if self.layout == LayoutKind::ForceDirected {
                    self.enable_forces(now_secs);
                }
            }
            Intent::SetMinNodeDistance(value) => {
                self.field.set_min_node_distance(value);
            }
            Intent::SwitchLayout(kind) => {
                self.switch_layout(kind, now_secs);
            }
            Intent::Select(id) => {
                let effect = self.selection.select(&id, &self.graph, &self.field);
                self.apply_selection_effect(effect, surface);
            }
            Intent::ClearSelection => {
                let effect = self.selection.clear();
                self.apply_selection_effect(effect, surface);
            }
            Intent::SelectDirectional(direction) => {
                let effect = self
                    .selection
                    .select_directional(direction, &self.graph, &self.field);
                self.apply_selection_effect(effect, surface);
            }
            Intent::Search(query) => {
                return IntentOutcome::SearchResults(self.graph.search(&query));
            }
        }

        IntentOutcome::Done
    }

    fn switch_layout(&mut self, kind: LayoutKind, now_secs: f64) {
        self.layout = kind;

        match layout::target_positions(kind, &self.graph, &self.radial_root) {
            Some(targets) => {
                // Exactly one positioning authority: the transition owns the
                // positions until it lands, and forces stay off afterwards.
                self.scheduler.stop();
                let current = self.field.positions().collect::<Vec<_>>();
                self.transition = Some(LayoutTransition::new(current, targets));
            }
            None => {
                self.transition = None;
                self.enable_forces(now_secs);
            }
        }
    }
}
