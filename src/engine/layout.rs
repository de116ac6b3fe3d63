use std::collections::BTreeMap;

use glam::Vec3;

use crate::atlas::{Entity, KnowledgeGraph};
use crate::util::ease_in_out;

const LEVEL_MEMBER_SPACING: f32 = 80.0;
const LEVEL_BAND_SPACING: f32 = 60.0;
const RING_STEP: f32 = 55.0;
const CONCENTRIC_BASE_RADIUS: f32 = 40.0;
const CLUSTER_CIRCLE_RADIUS: f32 = 160.0;
const CLUSTER_GRID_SPACING: f32 = 34.0;
pub const TRANSITION_FRAMES: u32 = 45;

pub const DEFAULT_RADIAL_ROOT: &str = "ax-extensionality";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClusterKey {
    Kind,
    FirstTag,
    Level,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutKind {
    ForceDirected,
    Hierarchical(Orientation),
    Radial,
    Concentric,
    Clustered(ClusterKey),
}

impl LayoutKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::ForceDirected => "Force-directed",
            Self::Hierarchical(Orientation::Vertical) => "Hierarchical (vertical)",
            Self::Hierarchical(Orientation::Horizontal) => "Hierarchical (horizontal)",
            Self::Radial => "Radial",
            Self::Concentric => "Concentric",
            Self::Clustered(ClusterKey::Kind) => "Clustered by kind",
            Self::Clustered(ClusterKey::FirstTag) => "Clustered by tag",
            Self::Clustered(ClusterKey::Level) => "Clustered by level",
        }
    }

    pub fn is_static(self) -> bool {
        self != Self::ForceDirected
    }
}

fn levels_of(graph: &KnowledgeGraph) -> BTreeMap<u32, Vec<usize>> {
    let mut levels: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (index, entity) in graph.entities.iter().enumerate() {
        levels.entry(entity.level).or_default().push(index);
    }
    levels
}

fn hierarchical(graph: &KnowledgeGraph, orientation: Orientation) -> Vec<Vec3> {
    let levels = levels_of(graph);
    let band_count = levels.len();
    let band_span = (band_count.saturating_sub(1)) as f32 * LEVEL_BAND_SPACING;

    let mut positions = vec![Vec3::ZERO; graph.entity_count()];
    for (band, (_level, members)) in levels.iter().enumerate() {
        let secondary = (band as f32 * LEVEL_BAND_SPACING) - (band_span * 0.5);
        let member_span = (members.len().saturating_sub(1)) as f32 * LEVEL_MEMBER_SPACING;

        for (slot, &index) in members.iter().enumerate() {
            let primary = (slot as f32 * LEVEL_MEMBER_SPACING) - (member_span * 0.5);
            positions[index] = match orientation {
                Orientation::Vertical => Vec3::new(primary, -secondary, 0.0),
                Orientation::Horizontal => Vec3::new(secondary, primary, 0.0),
            };
        }
    }
    positions
}

fn ring_positions(
    positions: &mut [Vec3],
    levels: &BTreeMap<u32, Vec<usize>>,
    radius_for_level: impl Fn(u32) -> f32,
    skip: Option<usize>,
) {
    for (&level, members) in levels {
        let ring = members
            .iter()
            .copied()
            .filter(|&index| Some(index) != skip)
            .collect::<Vec<_>>();
        if ring.is_empty() {
            continue;
        }

        let radius = radius_for_level(level);
        for (slot, &index) in ring.iter().enumerate() {
            let angle = std::f32::consts::TAU * slot as f32 / ring.len() as f32;
            positions[index] = Vec3::new(radius * angle.cos(), radius * angle.sin(), 0.0);
        }
    }
}

fn radial(graph: &KnowledgeGraph, root_id: &str) -> Vec<Vec3> {
    let root = graph
        .index_by_id
        .get(root_id)
        .copied()
        .unwrap_or(0);

    let mut positions = vec![Vec3::ZERO; graph.entity_count()];
    let levels = levels_of(graph);
    ring_positions(
        &mut positions,
        &levels,
        |level| level as f32 * RING_STEP,
        Some(root),
    );
    positions[root] = Vec3::ZERO;
    positions
}

fn concentric(graph: &KnowledgeGraph) -> Vec<Vec3> {
    let mut positions = vec![Vec3::ZERO; graph.entity_count()];
    let levels = levels_of(graph);
    ring_positions(
        &mut positions,
        &levels,
        |level| CONCENTRIC_BASE_RADIUS + (level.saturating_sub(1)) as f32 * RING_STEP,
        None,
    );
    positions
}

fn cluster_label(entity: &Entity, key: ClusterKey) -> String {
    match key {
        ClusterKey::Kind => entity.kind.label().to_string(),
        ClusterKey::FirstTag => entity
            .tags
            .first()
            .cloned()
            .unwrap_or_else(|| "untagged".to_string()),
        ClusterKey::Level => format!("level-{:03}", entity.level),
    }
}

fn clustered(graph: &KnowledgeGraph, key: ClusterKey) -> Vec<Vec3> {
    let mut clusters: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (index, entity) in graph.entities.iter().enumerate() {
        clusters.entry(cluster_label(entity, key)).or_default().push(index);
    }

    let cluster_count = clusters.len().max(1);
    let mut positions = vec![Vec3::ZERO; graph.entity_count()];

    for (slot, (_label, members)) in clusters.iter().enumerate() {
        let angle = std::f32::consts::TAU * slot as f32 / cluster_count as f32;
        let centroid = Vec3::new(
            CLUSTER_CIRCLE_RADIUS * angle.cos(),
            CLUSTER_CIRCLE_RADIUS * angle.sin(),
            0.0,
        );

        let side = (members.len() as f32).sqrt().ceil().max(1.0) as usize;
        let grid_span = (side.saturating_sub(1)) as f32 * CLUSTER_GRID_SPACING;

        for (member_slot, &index) in members.iter().enumerate() {
            let row = member_slot / side;
            let col = member_slot % side;
            let offset = Vec3::new(
                (col as f32 * CLUSTER_GRID_SPACING) - (grid_span * 0.5),
                (row as f32 * CLUSTER_GRID_SPACING) - (grid_span * 0.5),
                0.0,
            );
            positions[index] = centroid + offset;
        }
    }
    positions
}

pub fn target_positions(
    kind: LayoutKind,
    graph: &KnowledgeGraph,
    radial_root: &str,
) -> Option<Vec<Vec3>> {
    match kind {
        LayoutKind::ForceDirected => None,
        LayoutKind::Hierarchical(orientation) => Some(hierarchical(graph, orientation)),
        LayoutKind::Radial => Some(radial(graph, radial_root)),
        LayoutKind::Concentric => Some(concentric(graph)),
        LayoutKind::Clustered(key) => Some(clustered(graph, key)),
    }
}

pub struct LayoutTransition {
    start: Vec<Vec3>,
    end: Vec<Vec3>,
    frame: u32,
    frames: u32,
}

impl LayoutTransition {
    pub fn new(start: Vec<Vec3>, end: Vec<Vec3>) -> Self {
        debug_assert_eq!(start.len(), end.len());
        Self {
            start,
            end,
            frame: 0,
            frames: TRANSITION_FRAMES,
        }
    }

    pub fn advance(&mut self) -> (Vec<Vec3>, bool) {
        self.frame = (self.frame + 1).min(self.frames);
        let t = ease_in_out(self.frame as f32 / self.frames as f32);

        let positions = self
            .start
            .iter()
            .zip(&self.end)
            .map(|(&start, &end)| start.lerp(end, t))
            .collect();

        (positions, self.frame >= self.frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::builtin_graph;

    #[test]
    fn static_layouts_are_idempotent() {
        let graph = builtin_graph();
        for kind in [
            LayoutKind::Hierarchical(Orientation::Vertical),
            LayoutKind::Hierarchical(Orientation::Horizontal),
            LayoutKind::Radial,
            LayoutKind::Concentric,
            LayoutKind::Clustered(ClusterKey::Kind),
            LayoutKind::Clustered(ClusterKey::FirstTag),
            LayoutKind::Clustered(ClusterKey::Level),
        ] {
            let first = target_positions(kind, &graph, DEFAULT_RADIAL_ROOT).unwrap();
            let second = target_positions(kind, &graph, DEFAULT_RADIAL_ROOT).unwrap();
            assert_eq!(first, second, "{} is not idempotent", kind.label());
        }
    }

    #[test]
    fn force_directed_has_no_static_targets() {
        let graph = builtin_graph();
        assert!(target_positions(LayoutKind::ForceDirected, &graph, DEFAULT_RADIAL_ROOT).is_none());
        assert!(!LayoutKind::ForceDirected.is_static());
    }

    #[test]
    fn hierarchical_groups_levels_into_bands() {
        let graph = builtin_graph();
        let positions =
            target_positions(LayoutKind::Hierarchical(Orientation::Vertical), &graph, "")
                .unwrap();

        for (a, entity_a) in graph.entities.iter().enumerate() {
            for (b, entity_b) in graph.entities.iter().enumerate() {
                if entity_a.level == entity_b.level {
                    assert_eq!(positions[a].y, positions[b].y);
                } else {
                    assert_ne!(positions[a].y, positions[b].y);
                }
            }
        }
    }

    #[test]
    fn radial_places_root_at_origin_and_rest_on_level_rings() {
        let graph = builtin_graph();
        let positions = target_positions(LayoutKind::Radial, &graph, DEFAULT_RADIAL_ROOT).unwrap();

        let root = graph.index_by_id[DEFAULT_RADIAL_ROOT];
        assert_eq!(positions[root], Vec3::ZERO);

        for (index, entity) in graph.entities.iter().enumerate() {
            if index == root {
                continue;
            }
            let expected = entity.level as f32 * RING_STEP;
            assert!((positions[index].length() - expected).abs() < 1e-3);
        }
    }

    #[test]
    fn radial_with_unknown_root_falls_back_to_first_entity() {
        let graph = builtin_graph();
        let positions = target_positions(LayoutKind::Radial, &graph, "no-such-root").unwrap();
        assert_eq!(positions[0], Vec3::ZERO);
    }

    #[test]
    fn concentric_ring_radius_follows_level() {
        let graph = builtin_graph();
        let positions = target_positions(LayoutKind::Concentric, &graph, "").unwrap();

        for (index, entity) in graph.entities.iter().enumerate() {
            let expected = CONCENTRIC_BASE_RADIUS + (entity.level - 1) as f32 * RING_STEP;
            assert!((positions[index].length() - expected).abs() < 1e-3);
        }
    }

    #[test]
    fn clustered_separates_cluster_centroids() {
        let graph = builtin_graph();
        let positions =
            target_positions(LayoutKind::Clustered(ClusterKey::Kind), &graph, "").unwrap();

        let mut centroids: std::collections::BTreeMap<&str, (Vec3, usize)> = Default::default();
        for (index, entity) in graph.entities.iter().enumerate() {
            let entry = centroids.entry(entity.kind.label()).or_insert((Vec3::ZERO, 0));
            entry.0 += positions[index];
            entry.1 += 1;
        }

        let centroids = centroids
            .values()
            .map(|(sum, count)| *sum / *count as f32)
            .collect::<Vec<_>>();

        for (a, &centroid_a) in centroids.iter().enumerate() {
            for &centroid_b in centroids.iter().skip(a + 1) {
                assert!(centroid_a.distance(centroid_b) > CLUSTER_GRID_SPACING);
            }
        }
    }

    #[test]
    fn transition_lands_exactly_on_target() {
        let start = vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)];
        let end = vec![Vec3::new(0.0, 50.0, 0.0), Vec3::new(-10.0, 0.0, 30.0)];
        let mut transition = LayoutTransition::new(start, end.clone());

        let mut result = (Vec::new(), false);
        for _ in 0..TRANSITION_FRAMES {
            result = transition.advance();
        }

        assert!(result.1);
        assert_eq!(result.0, end);

        // Advancing past the end keeps returning the target.
        let (positions, done) = transition.advance();
        assert!(done);
        assert_eq!(positions, end);
    }

    #[test]
    fn transition_eases_rather_than_moving_linearly() {
        let start = vec![Vec3::ZERO];
        let end = vec![Vec3::new(100.0, 0.0, 0.0)];
        let mut transition = LayoutTransition::new(start, end);

        let (positions, _) = transition.advance();
        let linear_first_step = 100.0 / TRANSITION_FRAMES as f32;
        assert!(positions[0].x < linear_first_step);
    }
}
