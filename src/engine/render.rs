use std::collections::HashMap;

use glam::Vec3;
use log::debug;

use crate::atlas::{EntityKind, KnowledgeGraph, RelationKind};

use super::field::SpatialField;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VisualHandle(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HighlightTier {
    Default,
    Related,
    Selected,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VisualShape {
    Sphere { radius: f32 },
    Line,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineClass {
    DependsOn,
    Proves,
    Generalizes,
    Other,
}

impl LineClass {
    pub fn for_relation(kind: &RelationKind) -> Self {
        match kind {
            RelationKind::DependsOn => Self::DependsOn,
            RelationKind::Proves => Self::Proves,
            RelationKind::Generalizes => Self::Generalizes,
            RelationKind::Other(_) => Self::Other,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VisualStyle {
    Node { kind: EntityKind, tier: HighlightTier },
    Edge { class: LineClass, emphasized: bool },
}

#[derive(Clone, Copy, Debug)]
pub struct PickRay {
    pub origin: Vec3,
    pub direction: Vec3,
}

#[derive(Clone, Copy, Debug)]
pub struct PickHit {
    pub handle: VisualHandle,
    pub distance: f32,
}

pub trait RenderSurface {
    fn add_visual(&mut self, shape: VisualShape, position: Vec3, style: VisualStyle)
    -> VisualHandle;
    fn remove_visual(&mut self, handle: VisualHandle);
    fn set_transform(&mut self, handle: VisualHandle, position: Vec3);
    fn set_endpoints(&mut self, handle: VisualHandle, start: Vec3, end: Vec3);
    fn set_style(&mut self, handle: VisualHandle, style: VisualStyle);
    fn pick(&self, ray: PickRay) -> Vec<PickHit>;
}

pub fn ray_sphere_distance(ray: PickRay, center: Vec3, radius: f32) -> Option<f32> {
    let direction = ray.direction.try_normalize().unwrap_or(Vec3::NEG_Z);
    let to_center = center - ray.origin;
    let along = to_center.dot(direction);
    if along < 0.0 {
        return None;
    }

    let closest_sq = to_center.length_squared() - along * along;
    if closest_sq > radius * radius {
        return None;
    }

    Some(along - (radius * radius - closest_sq).max(0.0).sqrt())
}

struct EdgeVisual {
    source: usize,
    target: usize,
    class: LineClass,
    handle: VisualHandle,
}

pub struct SceneBridge {
    node_handles: Vec<VisualHandle>,
    entity_by_handle: HashMap<VisualHandle, usize>,
    edge_visuals: Vec<EdgeVisual>,
}

impl SceneBridge {
    pub fn build(
        graph: &KnowledgeGraph,
        field: &SpatialField,
        surface: &mut dyn RenderSurface,
    ) -> Self {
        let mut node_handles = Vec::with_capacity(graph.entity_count());
        let mut entity_by_handle = HashMap::with_capacity(graph.entity_count());

        for (index, entity) in graph.entities.iter().enumerate() {
            let position = field.position_of(index).unwrap_or(Vec3::ZERO);
            let handle = surface.add_visual(
                VisualShape::Sphere {
                    radius: entity.radius,
                },
                position,
                VisualStyle::Node {
                    kind: entity.kind,
                    tier: HighlightTier::Default,
                },
            );
            entity_by_handle.insert(handle, index);
            node_handles.push(handle);
        }

        let mut edge_visuals = Vec::new();
        for relation in &graph.relations {
            let Some((source, target)) = graph.resolve_relation(relation) else {
                debug!(
                    "relation {} -> {} has no visual; endpoint missing",
                    relation.source_id, relation.target_id
                );
                continue;
            };

            let class = LineClass::for_relation(&relation.kind);
            let start = field.position_of(source).unwrap_or(Vec3::ZERO);
            let end = field.position_of(target).unwrap_or(Vec3::ZERO);
            let handle = surface.add_visual(
                VisualShape::Line,
                start,
                VisualStyle::Edge {
                    class,
                    emphasized: false,
                },
            );
            surface.set_endpoints(handle, start, end);
            edge_visuals.push(EdgeVisual {
                source,
                target,
                class,
                handle,
            });
        }

        Self {
            node_handles,
            entity_by_handle,
            edge_visuals,
        }
    }

    pub fn entity_for_handle(&self, handle: VisualHandle) -> Option<usize> {
        self.entity_by_handle.get(&handle).copied()
    }

    pub fn sync_positions(&self, field: &SpatialField, surface: &mut dyn RenderSurface) {
        for (index, &handle) in self.node_handles.iter().enumerate() {
            if let Some(position) = field.position_of(index) {
                surface.set_transform(handle, position);
            }
        }

        for edge in &self.edge_visuals {
            if let (Some(start), Some(end)) = (
                field.position_of(edge.source),
                field.position_of(edge.target),
            ) {
                surface.set_endpoints(edge.handle, start, end);
            }
        }
    }

    pub fn apply_highlight(
        &self,
        graph: &KnowledgeGraph,
        tiers: &[HighlightTier],
        selected: Option<usize>,
        surface: &mut dyn RenderSurface,
    ) {
        for (index, &handle) in self.node_handles.iter().enumerate() {
            let tier = tiers.get(index).copied().unwrap_or(HighlightTier::Default);
            surface.set_style(
                handle,
                VisualStyle::Node {
                    kind: graph.entities[index].kind,
                    tier,
                },
            );
        }

        for edge in &self.edge_visuals {
            let emphasized =
                selected.is_some_and(|index| edge.source == index || edge.target == index);
            surface.set_style(
                edge.handle,
                VisualStyle::Edge {
                    class: edge.class,
                    emphasized,
                },
            );
        }
    }

    pub fn pick_entity(&self, surface: &dyn RenderSurface, ray: PickRay) -> Option<usize> {
        surface
            .pick(ray)
            .into_iter()
            .find_map(|hit| self.entity_for_handle(hit.handle))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    pub(crate) struct RecordedVisual {
        pub(crate) shape: VisualShape,
        pub(crate) position: Vec3,
        pub(crate) endpoints: Option<(Vec3, Vec3)>,
        pub(crate) style: VisualStyle,
    }

    #[derive(Default)]
    pub(crate) struct RecordingSurface {
        next_handle: u64,
        pub(crate) visuals: HashMap<VisualHandle, RecordedVisual>,
    }

    impl RenderSurface for RecordingSurface {
        fn add_visual(
            &mut self,
            shape: VisualShape,
            position: Vec3,
            style: VisualStyle,
        ) -> VisualHandle {
            let handle = VisualHandle(self.next_handle);
            self.next_handle += 1;
            self.visuals.insert(
                handle,
                RecordedVisual {
                    shape,
                    position,
                    endpoints: None,
                    style,
                },
            );
            handle
        }

        fn remove_visual(&mut self, handle: VisualHandle) {
            self.visuals.remove(&handle);
        }

        fn set_transform(&mut self, handle: VisualHandle, position: Vec3) {
            if let Some(visual) = self.visuals.get_mut(&handle) {
                visual.position = position;
            }
        }

        fn set_endpoints(&mut self, handle: VisualHandle, start: Vec3, end: Vec3) {
            if let Some(visual) = self.visuals.get_mut(&handle) {
                visual.position = start;
                visual.endpoints = Some((start, end));
            }
        }

        fn set_style(&mut self, handle: VisualHandle, style: VisualStyle) {
            if let Some(visual) = self.visuals.get_mut(&handle) {
                visual.style = style;
            }
        }

        fn pick(&self, ray: PickRay) -> Vec<PickHit> {
            let mut hits = self
                .visuals
                .iter()
                .filter_map(|(&handle, visual)| match visual.shape {
                    VisualShape::Sphere { radius } => {
                        ray_sphere_distance(ray, visual.position, radius)
                            .map(|distance| PickHit { handle, distance })
                    }
                    VisualShape::Line => None,
                })
                .collect::<Vec<_>>();
            hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
            hits
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingSurface;
    use super::*;
    use crate::atlas::builtin_graph;

    #[test]
    fn ray_sphere_hits_and_misses() {
        let ray = PickRay {
            origin: Vec3::new(0.0, 0.0, 100.0),
            direction: Vec3::NEG_Z,
        };

        let hit = ray_sphere_distance(ray, Vec3::ZERO, 10.0).unwrap();
        assert!((hit - 90.0).abs() < 1e-3);

        assert!(ray_sphere_distance(ray, Vec3::new(50.0, 0.0, 0.0), 10.0).is_none());
        // Spheres behind the origin never hit.
        assert!(ray_sphere_distance(ray, Vec3::new(0.0, 0.0, 300.0), 10.0).is_none());
    }

    #[test]
    fn bridge_creates_one_visual_per_entity_and_resolved_relation() {
        let graph = builtin_graph();
        let field = super::super::field::SpatialField::new(&graph);
        let mut surface = RecordingSurface::default();

        let bridge = SceneBridge::build(&graph, &field, &mut surface);

        let spheres = surface
            .visuals
            .values()
            .filter(|visual| matches!(visual.shape, VisualShape::Sphere { .. }))
            .count();
        let lines = surface
            .visuals
            .values()
            .filter(|visual| matches!(visual.shape, VisualShape::Line))
            .count();

        assert_eq!(spheres, graph.entity_count());
        assert_eq!(lines, field.edges().len());

        for (index, _) in graph.entities.iter().enumerate() {
            assert_eq!(bridge.entity_for_handle(bridge.node_handles[index]), Some(index));
        }
    }

    #[test]
    fn sync_positions_moves_nodes_and_edge_endpoints() {
        let graph = builtin_graph();
        let mut field = super::super::field::SpatialField::new(&graph);
        let mut surface = RecordingSurface::default();
        let bridge = SceneBridge::build(&graph, &field, &mut surface);

        for _ in 0..10 {
            field.step();
        }
        bridge.sync_positions(&field, &mut surface);

        for (index, &handle) in bridge.node_handles.iter().enumerate() {
            assert_eq!(
                surface.visuals[&handle].position,
                field.position_of(index).unwrap()
            );
        }

        for edge in &bridge.edge_visuals {
            let (start, end) = surface.visuals[&edge.handle].endpoints.unwrap();
            assert_eq!(start, field.position_of(edge.source).unwrap());
            assert_eq!(end, field.position_of(edge.target).unwrap());
        }
    }

    #[test]
    fn highlight_styles_follow_tiers_and_selection() {
        let graph = builtin_graph();
        let field = super::super::field::SpatialField::new(&graph);
        let mut surface = RecordingSurface::default();
        let bridge = SceneBridge::build(&graph, &field, &mut surface);

        let selected = 0usize;
        let mut tiers = vec![HighlightTier::Default; graph.entity_count()];
        tiers[selected] = HighlightTier::Selected;
        for &neighbor in graph.neighbors_of(selected) {
            tiers[neighbor] = HighlightTier::Related;
        }

        bridge.apply_highlight(&graph, &tiers, Some(selected), &mut surface);

        let selected_style = surface.visuals[&bridge.node_handles[selected]].style;
        assert!(matches!(
            selected_style,
            VisualStyle::Node {
                tier: HighlightTier::Selected,
                ..
            }
        ));

        for edge in &bridge.edge_visuals {
            let expected = edge.source == selected || edge.target == selected;
            match surface.visuals[&edge.handle].style {
                VisualStyle::Edge { emphasized, .. } => assert_eq!(emphasized, expected),
                style => panic!("edge visual has node style {style:?}"),
            }
        }
    }

    #[test]
    fn pick_entity_returns_nearest_sphere() {
        let graph = builtin_graph();
        let mut field = super::super::field::SpatialField::new(&graph);
        let mut surface = RecordingSurface::default();
        let bridge = SceneBridge::build(&graph, &field, &mut surface);

        let mut positions = vec![Vec3::new(0.0, 400.0, 0.0); graph.entity_count()];
        positions[3] = Vec3::new(0.0, 0.0, 0.0);
        positions[5] = Vec3::new(0.0, 0.0, 40.0);
        field.set_positions(&positions);
        bridge.sync_positions(&field, &mut surface);

        let ray = PickRay {
            origin: Vec3::new(0.0, 0.0, 120.0),
            direction: Vec3::NEG_Z,
        };
        // Entity 5 sits in front of entity 3 along the ray.
        assert_eq!(bridge.pick_entity(&surface, ray), Some(5));

        let miss = PickRay {
            origin: Vec3::new(4000.0, 4000.0, 120.0),
            direction: Vec3::NEG_Z,
        };
        assert_eq!(bridge.pick_entity(&surface, miss), None);
    }
}
