use glam::Vec3;
use log::debug;

use crate::atlas::KnowledgeGraph;

use super::field::SpatialField;
use super::render::{HighlightTier, PickRay, RenderSurface, SceneBridge};

const CLICK_DRAG_TOLERANCE: f32 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SelectionEffect {
    Selected { id: String, focus: Vec3 },
    Cleared,
}

pub struct SelectionController {
    selected: Option<String>,
    tiers: Vec<HighlightTier>,
}

impl SelectionController {
    pub fn new(entity_count: usize) -> Self {
        Self {
            selected: None,
            tiers: vec![HighlightTier::Default; entity_count],
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn tiers(&self) -> &[HighlightTier] {
        &self.tiers
    }

    pub fn selected_index(&self, graph: &KnowledgeGraph) -> Option<usize> {
        self.selected
            .as_ref()
            .and_then(|id| graph.index_by_id.get(id))
            .copied()
    }

    pub fn select(
        &mut self,
        id: &str,
        graph: &KnowledgeGraph,
        field: &SpatialField,
    ) -> Option<SelectionEffect> {
        if self.selected.as_deref() == Some(id) {
            return None;
        }

        let Some(&index) = graph.index_by_id.get(id) else {
            debug!("select ignored; unknown entity {id}");
            return None;
        };

        self.tiers.fill(HighlightTier::Default);
        self.tiers[index] = HighlightTier::Selected;
        for &neighbor in graph.neighbors_of(index) {
            if neighbor != index {
                self.tiers[neighbor] = HighlightTier::Related;
            }
        }

        self.selected = Some(id.to_string());
        let focus = field.position_of(index).unwrap_or(Vec3::ZERO);
        Some(SelectionEffect::Selected {
            id: id.to_string(),
            focus,
        })
    }

    pub fn clear(&mut self) -> Option<SelectionEffect> {
        if self.selected.is_none() {
            return None;
        }

        self.selected = None;
        self.tiers.fill(HighlightTier::Default);
        Some(SelectionEffect::Cleared)
    }

    pub fn select_from_pointer(
        &mut self,
        ray: PickRay,
        over_viewport: bool,
        drag_distance: f32,
        graph: &KnowledgeGraph,
        field: &SpatialField,
        bridge: &SceneBridge,
        surface: &dyn RenderSurface,
    ) -> Option<SelectionEffect> {
        if drag_distance > CLICK_DRAG_TOLERANCE {
            return None;
        }

        if let Some(index) = bridge.pick_entity(surface, ray) {
            let id = graph.entities[index].id.clone();
            return self.select(&id, graph, field);
        }

        if over_viewport {
            debug!("pick query hit nothing; clearing selection");
            return self.clear();
        }

        None
    }

    pub fn select_directional(
        &mut self,
        direction: Direction,
        graph: &KnowledgeGraph,
        field: &SpatialField,
    ) -> Option<SelectionEffect> {
        let current_index = self.selected_index(graph)?;
        let origin = field.position_of(current_index)?;

        let mut best: Option<(usize, f32)> = None;
        for index in 0..graph.entity_count() {
            if index == current_index {
                continue;
            }
            let Some(position) = field.position_of(index) else {
                continue;
            };

            let qualifies = match direction {
                Direction::Up => position.y > origin.y,
                Direction::Down => position.y < origin.y,
                Direction::Left => position.x < origin.x,
                Direction::Right => position.x > origin.x,
            };
            if !qualifies {
                continue;
            }

            let distance = origin.distance(position);
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((index, distance));
            }
        }

        let (index, _) = best?;
        let id = graph.entities[index].id.clone();
        self.select(&id, graph, field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::builtin_graph;
    use crate::engine::render::testing::RecordingSurface;

    fn setup() -> (
        KnowledgeGraph,
        SpatialField,
        SceneBridge,
        RecordingSurface,
        SelectionController,
    ) {
        let graph = builtin_graph();
        let field = SpatialField::new(&graph);
        let mut surface = RecordingSurface::default();
        let bridge = SceneBridge::build(&graph, &field, &mut surface);
        let selection = SelectionController::new(graph.entity_count());
        (graph, field, bridge, surface, selection)
    }

    #[test]
    fn select_marks_exactly_one_selected_and_neighbors_related() {
        let (graph, field, _bridge, _surface, mut selection) = setup();

        let effect = selection.select("thm-ivt", &graph, &field);
        assert!(matches!(effect, Some(SelectionEffect::Selected { .. })));

        let selected_count = selection
            .tiers()
            .iter()
            .filter(|&&tier| tier == HighlightTier::Selected)
            .count();
        assert_eq!(selected_count, 1);

        let index = graph.index_by_id["thm-ivt"];
        let related = selection
            .tiers()
            .iter()
            .enumerate()
            .filter(|&(_, &tier)| tier == HighlightTier::Related)
            .map(|(i, _)| i)
            .collect::<Vec<_>>();
        let mut expected = graph.neighbors_of(index).to_vec();
        expected.sort_unstable();
        assert_eq!(related, expected);
    }

    #[test]
    fn reselecting_the_same_entity_is_a_no_op() {
        let (graph, field, _bridge, _surface, mut selection) = setup();

        assert!(selection.select("lem-zorn", &graph, &field).is_some());
        assert!(selection.select("lem-zorn", &graph, &field).is_none());
    }

    #[test]
    fn selecting_an_unknown_id_changes_nothing() {
        let (graph, field, _bridge, _surface, mut selection) = setup();

        assert!(selection.select("no-such-id", &graph, &field).is_none());
        assert!(selection.selected_id().is_none());
        assert!(
            selection
                .tiers()
                .iter()
                .all(|&tier| tier == HighlightTier::Default)
        );
    }

    #[test]
    fn clear_resets_every_tier() {
        let (graph, field, _bridge, _surface, mut selection) = setup();

        selection.select("ax-choice", &graph, &field);
        assert_eq!(selection.clear(), Some(SelectionEffect::Cleared));
        assert!(selection.selected_id().is_none());
        assert!(
            selection
                .tiers()
                .iter()
                .all(|&tier| tier == HighlightTier::Default)
        );

        // Clearing again is a no-op.
        assert!(selection.clear().is_none());
    }

    #[test]
    fn directional_selection_picks_the_nearest_on_the_requested_side() {
        let (graph, mut field, _bridge, _surface, mut selection) = setup();

        let mut positions = vec![Vec3::new(500.0, 500.0, 0.0); graph.entity_count()];
        positions[0] = Vec3::ZERO;
        positions[1] = Vec3::new(0.0, 10.0, 0.0);
        positions[2] = Vec3::new(0.0, -10.0, 0.0);
        field.set_positions(&positions);

        let origin_id = graph.entities[0].id.clone();
        selection.select(&origin_id, &graph, &field);

        selection.select_directional(Direction::Up, &graph, &field);
        assert_eq!(selection.selected_id(), Some(graph.entities[1].id.as_str()));

        selection.select(&origin_id, &graph, &field);
        selection.select_directional(Direction::Down, &graph, &field);
        assert_eq!(selection.selected_id(), Some(graph.entities[2].id.as_str()));
    }

    #[test]
    fn directional_selection_without_candidates_is_a_no_op() {
        let (graph, mut field, _bridge, _surface, mut selection) = setup();

        // Nothing selected yet.
        assert!(
            selection
                .select_directional(Direction::Left, &graph, &field)
                .is_none()
        );

        // Selected entity strictly left of everything: no Left candidate.
        let mut positions = vec![Vec3::new(100.0, 0.0, 0.0); graph.entity_count()];
        positions[0] = Vec3::new(-100.0, 0.0, 0.0);
        field.set_positions(&positions);
        let id = graph.entities[0].id.clone();
        selection.select(&id, &graph, &field);

        assert!(
            selection
                .select_directional(Direction::Left, &graph, &field)
                .is_none()
        );
        assert_eq!(selection.selected_id(), Some(id.as_str()));
    }

    #[test]
    fn pointer_click_on_a_node_selects_it() {
        let (graph, mut field, bridge, mut surface, mut selection) = setup();

        let mut positions = vec![Vec3::new(300.0, 300.0, -100.0); graph.entity_count()];
        positions[7] = Vec3::ZERO;
        field.set_positions(&positions);
        bridge.sync_positions(&field, &mut surface);

        let ray = PickRay {
            origin: Vec3::new(0.0, 0.0, 150.0),
            direction: Vec3::NEG_Z,
        };
        let effect =
            selection.select_from_pointer(ray, true, 0.0, &graph, &field, &bridge, &surface);

        assert!(matches!(effect, Some(SelectionEffect::Selected { .. })));
        assert_eq!(selection.selected_id(), Some(graph.entities[7].id.as_str()));
    }

    #[test]
    fn missed_click_inside_the_viewport_clears() {
        let (graph, mut field, bridge, mut surface, mut selection) = setup();

        let positions = vec![Vec3::new(300.0, 300.0, -100.0); graph.entity_count()];
        field.set_positions(&positions);
        bridge.sync_positions(&field, &mut surface);

        selection.select(&graph.entities[0].id.clone(), &graph, &field);

        let miss = PickRay {
            origin: Vec3::new(-500.0, 0.0, 150.0),
            direction: Vec3::NEG_Z,
        };
        let effect =
            selection.select_from_pointer(miss, true, 0.0, &graph, &field, &bridge, &surface);
        assert_eq!(effect, Some(SelectionEffect::Cleared));
    }

    #[test]
    fn drags_and_chrome_clicks_leave_selection_alone() {
        let (graph, field, bridge, surface, mut selection) = setup();

        selection.select(&graph.entities[0].id.clone(), &graph, &field);

        let miss = PickRay {
            origin: Vec3::new(-500.0, 0.0, 150.0),
            direction: Vec3::NEG_Z,
        };

        // Drag gesture: more than the click tolerance of pointer travel.
        let effect =
            selection.select_from_pointer(miss, true, 12.0, &graph, &field, &bridge, &surface);
        assert!(effect.is_none());
        assert!(selection.selected_id().is_some());

        // Click landing on UI chrome outside the viewport.
        let effect =
            selection.select_from_pointer(miss, false, 0.0, &graph, &field, &bridge, &surface);
        assert!(effect.is_none());
        assert!(selection.selected_id().is_some());
    }
}
