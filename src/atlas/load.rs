use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::Deserialize;

use super::model::{
    DetailRecord, Entity, EntityKind, KnowledgeGraph, Relation, RelationKind, node_radius,
};

#[derive(Clone, Debug, Deserialize)]
pub(super) struct EntityRecord {
    pub(super) id: String,
    pub(super) label: String,
    pub(super) kind: String,
    #[serde(default)]
    pub(super) description: String,
    #[serde(default)]
    pub(super) tags: Vec<String>,
    pub(super) level: u32,
    pub(super) size: f32,
    #[serde(default, rename = "connectionCount")]
    pub(super) connection_count: usize,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RelationRecord {
    #[serde(rename = "sourceId")]
    pub(super) source_id: String,
    #[serde(rename = "targetId")]
    pub(super) target_id: String,
    pub(super) kind: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(super) struct DetailEntry {
    #[serde(default)]
    pub(super) title: String,
    #[serde(default)]
    pub(super) statement: String,
    #[serde(default)]
    pub(super) discussion: String,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct DatasetFile {
    pub(super) entities: Vec<EntityRecord>,
    #[serde(default)]
    pub(super) relations: Vec<RelationRecord>,
    #[serde(default)]
    pub(super) details: HashMap<String, DetailEntry>,
}

pub fn load_dataset(path: &Path) -> Result<KnowledgeGraph> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset file {}", path.display()))?;
    let dataset: DatasetFile = serde_json::from_str(&raw)
        .with_context(|| format!("invalid dataset JSON in {}", path.display()))?;

    build_graph(dataset)
}

pub(super) fn build_graph(dataset: DatasetFile) -> Result<KnowledgeGraph> {
    if dataset.entities.is_empty() {
        return Err(anyhow!("dataset contains no entities"));
    }

    let mut entities = Vec::with_capacity(dataset.entities.len());
    let mut index_by_id = HashMap::with_capacity(dataset.entities.len());

    for record in dataset.entities {
        if record.id.trim().is_empty() {
            return Err(anyhow!("entity with empty id (label: {:?})", record.label));
        }
        if record.level == 0 {
            return Err(anyhow!("entity {} has level 0; levels start at 1", record.id));
        }
        if record.size <= 0.0 {
            return Err(anyhow!("entity {} has non-positive size", record.id));
        }

        let kind = EntityKind::parse(&record.kind)
            .ok_or_else(|| anyhow!("entity {} has unknown kind {:?}", record.id, record.kind))?;

        if index_by_id.contains_key(&record.id) {
            return Err(anyhow!("duplicate entity id {}", record.id));
        }

        index_by_id.insert(record.id.clone(), entities.len());
        entities.push(Entity {
            radius: node_radius(record.size, record.connection_count),
            id: record.id,
            label: record.label,
            kind,
            description: record.description,
            tags: record.tags,
            level: record.level,
            size: record.size,
            connection_count: record.connection_count,
        });
    }

    let mut relations = Vec::with_capacity(dataset.relations.len());
    let mut neighbors = vec![Vec::new(); entities.len()];

    for record in dataset.relations {
        let relation = Relation {
            kind: RelationKind::parse(&record.kind),
            source_id: record.source_id,
            target_id: record.target_id,
        };

        match (
            index_by_id.get(&relation.source_id),
            index_by_id.get(&relation.target_id),
        ) {
            (Some(&source), Some(&target)) if source != target => {
                neighbors[source].push(target);
                neighbors[target].push(source);
            }
            (Some(_), Some(_)) => {}
            _ => {
                warn!(
                    "relation {} -> {} references an unknown entity; it will not render",
                    relation.source_id, relation.target_id
                );
            }
        }

        relations.push(relation);
    }

    for list in &mut neighbors {
        list.sort_unstable();
        list.dedup();
    }

    let mut details = HashMap::with_capacity(dataset.details.len());
    for (id, entry) in dataset.details {
        let Some(&index) = index_by_id.get(&id) else {
            warn!("detail record for unknown entity {id} ignored");
            continue;
        };

        let title = if entry.title.is_empty() {
            entities[index].label.clone()
        } else {
            entry.title
        };

        details.insert(
            id,
            DetailRecord {
                title,
                statement: entry.statement,
                discussion: entry.discussion,
            },
        );
    }

    Ok(KnowledgeGraph {
        entities,
        relations,
        index_by_id,
        neighbors,
        details,
    })
}
