use glam::Vec3;

use crate::atlas::KnowledgeGraph;
use crate::util::stable_triple;

pub const DEFAULT_MIN_NODE_DISTANCE: f32 = 30.0;
pub const BOUNDARY_RADIUS: f32 = 500.0;

const DAMPING: f32 = 0.03;
const CENTER_PULL: f32 = 0.001;
const ATTRACTION_REST_DISTANCE: f32 = 20.0;
const LEVEL_PULL_RATE: f32 = 0.01;
const DEFAULT_CONNECTION_STRENGTH: f32 = 0.03;
const SEED_RADIUS: f32 = 100.0;
const SEED_JITTER: f32 = 12.0;

pub(super) struct FieldNode {
    pub(super) id: String,
    pub(super) position: Vec3,
    pub(super) level: u32,
    connection_strength: f32,
}

fn level_target(level: u32) -> f32 {
    -50.0 + (level as f32) * 20.0
}

fn seed_position(id: &str, index: usize, total: usize) -> Vec3 {
    // Fibonacci sphere, nudged by a stable per-id hash so reloads reproduce.
    let golden_ratio = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let i = index as f32;
    let n = (total.max(1)) as f32;

    let theta = std::f32::consts::TAU * i / golden_ratio;
    let phi = (1.0 - 2.0 * (i + 0.5) / n).clamp(-1.0, 1.0).acos();

    let base = Vec3::new(
        SEED_RADIUS * phi.sin() * theta.cos(),
        SEED_RADIUS * phi.cos(),
        SEED_RADIUS * phi.sin() * theta.sin(),
    );

    let (jx, jy, jz) = stable_triple(id);
    base + Vec3::new(jx, jy, jz) * SEED_JITTER
}

pub struct SpatialField {
    nodes: Vec<FieldNode>,
    edges: Vec<(usize, usize)>,
    min_node_distance: f32,
    two_d: bool,
    forces: Vec<Vec3>,
}

impl SpatialField {
    pub fn new(graph: &KnowledgeGraph) -> Self {
        let total = graph.entity_count();
        let nodes = graph
            .entities
            .iter()
            .enumerate()
            .map(|(index, entity)| FieldNode {
                position: seed_position(&entity.id, index, total),
                level: entity.level,
                connection_strength: if entity.connection_count > 0 {
                    0.01 * entity.connection_count as f32
                } else {
                    DEFAULT_CONNECTION_STRENGTH
                },
                id: entity.id.clone(),
            })
            .collect::<Vec<_>>();

        let edges = graph
            .relations
            .iter()
            .filter_map(|relation| graph.resolve_relation(relation))
            .filter(|(source, target)| source != target)
            .collect();

        Self {
            nodes,
            edges,
            min_node_distance: DEFAULT_MIN_NODE_DISTANCE,
            two_d: false,
            forces: Vec::new(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn position_of(&self, index: usize) -> Option<Vec3> {
        self.nodes.get(index).map(|node| node.position)
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.nodes.iter().map(|node| node.position)
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn min_node_distance(&self) -> f32 {
        self.min_node_distance
    }

    pub fn set_min_node_distance(&mut self, value: f32) {
        self.min_node_distance = value.clamp(5.0, 120.0);
    }

    pub fn is_two_d(&self) -> bool {
        self.two_d
    }

    pub fn set_two_d(&mut self, two_d: bool) {
        if self.two_d == two_d {
            return;
        }

        self.two_d = two_d;
        if two_d {
            for node in &mut self.nodes {
                node.position.z = 0.0;
            }
        } else {
            // Flat positions produce flat forces, so reseed a little depth.
            for node in &mut self.nodes {
                let (_, _, jz) = stable_triple(&node.id);
                node.position.z = jz * SEED_JITTER;
            }
        }
    }

    pub fn reset_positions(&mut self) {
        let total = self.nodes.len();
        for (index, node) in self.nodes.iter_mut().enumerate() {
            node.position = seed_position(&node.id, index, total);
            if self.two_d {
                node.position.z = 0.0;
            }
        }
    }

    pub fn set_positions(&mut self, positions: &[Vec3]) {
        for (node, &position) in self.nodes.iter_mut().zip(positions) {
            node.position = position;
            if self.two_d {
                node.position.z = 0.0;
            }
            debug_assert!(node.position.is_finite());
        }
    }

    pub fn step(&mut self) -> f32 {
        let node_count = self.nodes.len();
        if node_count == 0 {
            return 0.0;
        }

        self.forces.resize(node_count, Vec3::ZERO);
        self.forces.fill(Vec3::ZERO);

        let repulsion_range = self.min_node_distance * 3.0;
        for i in 0..node_count {
            for j in (i + 1)..node_count {
                let delta = self.nodes[i].position - self.nodes[j].position;
                let distance = delta.length();
                if distance <= 0.0 || distance >= repulsion_range {
                    continue;
                }

                let factor = if distance < self.min_node_distance {
                    (2.0 * self.min_node_distance) / (distance * distance)
                } else {
                    30.0 / (distance * distance)
                };

                let push = (delta / distance) * factor;
                self.forces[i] += push;
                self.forces[j] -= push;
            }
        }

        for &(source, target) in &self.edges {
            let delta = self.nodes[target].position - self.nodes[source].position;
            let distance = delta.length();
            if distance <= ATTRACTION_REST_DISTANCE {
                continue;
            }

            let direction = delta / distance;
            self.forces[source] += direction * (distance * self.nodes[source].connection_strength);
            self.forces[target] -= direction * (distance * self.nodes[target].connection_strength);
        }

        for (force, node) in self.forces.iter_mut().zip(&self.nodes) {
            *force -= node.position * CENTER_PULL;
        }

        let mut total_movement = 0.0;
        for (node, force) in self.nodes.iter_mut().zip(&self.forces) {
            let mut displacement = *force * DAMPING;
            if self.two_d {
                displacement.z = 0.0;
            }
            node.position += displacement;

            let level_nudge = (level_target(node.level) - node.position.y) * LEVEL_PULL_RATE;
            node.position.y += level_nudge;

            if self.two_d {
                node.position.z = 0.0;
            }

            total_movement += displacement.length() + level_nudge.abs();
            debug_assert!(
                node.position.is_finite(),
                "non-finite position for {}",
                node.id
            );
        }

        total_movement
    }

    pub fn clamp_to_bounds(&mut self) {
        for node in &mut self.nodes {
            let distance = node.position.length();
            if distance > BOUNDARY_RADIUS {
                node.position *= BOUNDARY_RADIUS / distance;
            }
        }
    }
}
