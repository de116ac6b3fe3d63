mod builtin;
mod load;
mod model;

pub use builtin::builtin_graph;
pub use load::load_dataset;
pub use model::{
    DetailRecord, Entity, EntityKind, KnowledgeGraph, Relation, RelationKind, node_radius,
};
