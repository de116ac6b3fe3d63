use std::time::Duration;

use glam::Vec3;
use log::debug;

use crate::atlas::{DetailRecord, KnowledgeGraph};

mod camera;
mod commands;
mod field;
mod layout;
mod render;
mod scheduler;
mod selection;

pub use camera::OrbitCamera;
pub use commands::{Intent, IntentOutcome};
pub use field::SpatialField;
pub use layout::{ClusterKey, LayoutKind, LayoutTransition, Orientation};
pub use render::{
    HighlightTier, LineClass, PickHit, PickRay, RenderSurface, SceneBridge, VisualHandle,
    VisualShape, VisualStyle, ray_sphere_distance,
};
pub use scheduler::{NextTick, SimulationScheduler, SimulationState};
pub use selection::{Direction, SelectionController, SelectionEffect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repaint {
    Immediate,
    After(Duration),
    Idle,
}

pub struct Engine {
    graph: KnowledgeGraph,
    field: SpatialField,
    scheduler: SimulationScheduler,
    camera: OrbitCamera,
    selection: SelectionController,
    bridge: SceneBridge,
    layout: LayoutKind,
    transition: Option<LayoutTransition>,
    radial_root: String,
}

impl Engine {
    pub fn new(graph: KnowledgeGraph, surface: &mut dyn RenderSurface, now_secs: f64) -> Self {
        let field = SpatialField::new(&graph);
        let bridge = SceneBridge::build(&graph, &field, surface);
        let selection = SelectionController::new(graph.entity_count());
        let radial_root = if graph.index_by_id.contains_key(layout::DEFAULT_RADIAL_ROOT) {
            layout::DEFAULT_RADIAL_ROOT.to_string()
        } else {
            graph
                .entities
                .first()
                .map(|entity| entity.id.clone())
                .unwrap_or_default()
        };

        let mut scheduler = SimulationScheduler::default();
        scheduler.start(now_secs);

        Self {
            graph,
            field,
            scheduler,
            camera: OrbitCamera::default(),
            selection,
            bridge,
            layout: LayoutKind::ForceDirected,
            transition: None,
            radial_root,
        }
    }

    pub fn graph(&self) -> &KnowledgeGraph {
        &self.graph
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn layout(&self) -> LayoutKind {
        self.layout
    }

    pub fn simulation_state(&self) -> SimulationState {
        self.scheduler.state()
    }

    pub fn auto_rotate(&self) -> bool {
        self.camera.auto_rotate()
    }

    pub fn is_two_d(&self) -> bool {
        self.field.is_two_d()
    }

    pub fn min_node_distance(&self) -> f32 {
        self.field.min_node_distance()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selection.selected_id()
    }

    pub fn selected_detail(&self) -> Option<DetailRecord> {
        self.selection
            .selected_id()
            .and_then(|id| self.graph.detail_or_fallback(id))
    }

    pub fn highlight_tiers(&self) -> &[HighlightTier] {
        self.selection.tiers()
    }

    pub fn entity_position(&self, index: usize) -> Option<Vec3> {
        self.field.position_of(index)
    }

    pub fn rotate_camera(&mut self, delta_x: f32, delta_y: f32) {
        self.camera.rotate(delta_x, delta_y);
    }

    pub fn pan_camera(&mut self, delta_x: f32, delta_y: f32) {
        self.camera.pan(delta_x, delta_y);
    }

    pub fn zoom_camera(&mut self, delta: f32) {
        self.camera.zoom(delta);
    }

    pub fn report_draw_failure(&mut self) {
        self.scheduler.report_draw_failure();
    }

    pub fn report_draw_success(&mut self) {
        self.scheduler.report_draw_success();
    }

    pub fn click(
        &mut self,
        ray: PickRay,
        over_viewport: bool,
        drag_distance: f32,
        surface: &mut dyn RenderSurface,
    ) {
        let effect = self.selection.select_from_pointer(
            ray,
            over_viewport,
            drag_distance,
            &self.graph,
            &self.field,
            &self.bridge,
            surface,
        );
        self.apply_selection_effect(effect, surface);
    }

    fn apply_selection_effect(
        &mut self,
        effect: Option<SelectionEffect>,
        surface: &mut dyn RenderSurface,
    ) {
        let Some(effect) = effect else {
            return;
        };

        match &effect {
            SelectionEffect::Selected { id, focus } => {
                debug!("selection moved to {id}");
                self.camera.focus_on(*focus);
            }
            SelectionEffect::Cleared => debug!("selection cleared"),
        }

        self.bridge.apply_highlight(
            &self.graph,
            self.selection.tiers(),
            self.selection.selected_index(&self.graph),
            surface,
        );
    }

    pub fn advance(&mut self, now_secs: f64, surface: &mut dyn RenderSurface) -> Repaint {
        let camera_moving = self.camera.advance_frame();

        let mut transition_moving = false;
        if let Some(transition) = &mut self.transition {
            let (positions, done) = transition.advance();
            self.field.set_positions(&positions);
            self.bridge.sync_positions(&self.field, surface);
            if done {
                self.transition = None;
            }
            transition_moving = true;
        }

        let next_tick = self
            .scheduler
            .tick(now_secs, &mut self.field, &self.bridge, surface);

        if camera_moving || transition_moving {
            return Repaint::Immediate;
        }

        match next_tick {
            NextTick::NextFrame => Repaint::Immediate,
            NextTick::After(delay) => Repaint::After(delay),
            NextTick::Idle => Repaint::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::render::testing::RecordingSurface;
    use super::*;
    use crate::atlas::builtin_graph;

    fn engine() -> (Engine, RecordingSurface) {
        let mut surface = RecordingSurface::default();
        let engine = Engine::new(builtin_graph(), &mut surface, 0.0);
        (engine, surface)
    }

    #[test]
    fn engine_starts_with_forces_active_and_no_selection() {
        let (engine, _surface) = engine();
        assert_eq!(engine.simulation_state(), SimulationState::Active);
        assert_eq!(engine.layout(), LayoutKind::ForceDirected);
        assert!(engine.selected_id().is_none());
    }

    #[test]
    fn advance_runs_the_simulation_and_requests_another_frame() {
        let (mut engine, mut surface) = engine();

        let before = engine.entity_position(0).unwrap();
        let repaint = engine.advance(0.016, &mut surface);

        assert_eq!(repaint, Repaint::Immediate);
        assert_ne!(engine.entity_position(0).unwrap(), before);
    }

    #[test]
    fn advance_goes_idle_after_stop() {
        let (mut engine, mut surface) = engine();
        engine.apply(Intent::StopSimulation, 0.0, &mut surface);

        let repaint = engine.advance(0.016, &mut surface);
        assert_eq!(repaint, Repaint::Idle);
    }

    #[test]
    fn selected_detail_pulls_record_or_fallback() {
        let (mut engine, mut surface) = engine();

        assert!(engine.selected_detail().is_none());

        engine.apply(Intent::Select("ax-choice".to_string()), 0.0, &mut surface);
        let detail = engine.selected_detail().unwrap();
        assert!(detail.statement.contains("nonempty sets"));

        engine.apply(
            Intent::Select("def-function".to_string()),
            0.0,
            &mut surface,
        );
        let fallback = engine.selected_detail().unwrap();
        assert_eq!(fallback.title, "Function");
    }
}
