use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Axiom,
    Definition,
    Lemma,
    Theorem,
    Corollary,
}

impl EntityKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "axiom" => Some(Self::Axiom),
            "definition" => Some(Self::Definition),
            "lemma" => Some(Self::Lemma),
            "theorem" => Some(Self::Theorem),
            "corollary" => Some(Self::Corollary),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Axiom => "Axiom",
            Self::Definition => "Definition",
            Self::Lemma => "Lemma",
            Self::Theorem => "Theorem",
            Self::Corollary => "Corollary",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelationKind {
    DependsOn,
    Proves,
    Generalizes,
    Other(String),
}

impl RelationKind {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "depends_on" => Self::DependsOn,
            "proves" => Self::Proves,
            "generalizes" => Self::Generalizes,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::DependsOn => "depends_on",
            Self::Proves => "proves",
            Self::Generalizes => "generalizes",
            Self::Other(raw) => raw.as_str(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Entity {
    pub id: String,
    pub label: String,
    pub kind: EntityKind,
    pub description: String,
    pub tags: Vec<String>,
    pub level: u32,
    pub size: f32,
    pub connection_count: usize,
    pub radius: f32,
}

#[derive(Clone, Debug)]
pub struct Relation {
    pub source_id: String,
    pub target_id: String,
    pub kind: RelationKind,
}

#[derive(Clone, Debug)]
pub struct DetailRecord {
    pub title: String,
    pub statement: String,
    pub discussion: String,
}

pub fn node_radius(size: f32, connection_count: usize) -> f32 {
    (3.0 + (size * 1.6) + ((connection_count as f32).sqrt() * 1.3)).clamp(3.0, 16.0)
}

#[derive(Clone, Debug)]
pub struct KnowledgeGraph {
    pub entities: Vec<Entity>,
    pub relations: Vec<Relation>,
    pub index_by_id: HashMap<String, usize>,
    pub neighbors: Vec<Vec<usize>>,
    pub details: HashMap<String, DetailRecord>,
}

impl KnowledgeGraph {
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.index_by_id.get(id).map(|&index| &self.entities[index])
    }

    pub fn resolve_relation(&self, relation: &Relation) -> Option<(usize, usize)> {
        let source = *self.index_by_id.get(&relation.source_id)?;
        let target = *self.index_by_id.get(&relation.target_id)?;
        Some((source, target))
    }

    pub fn neighbors_of(&self, index: usize) -> &[usize] {
        self.neighbors.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn detail_or_fallback(&self, id: &str) -> Option<DetailRecord> {
        if let Some(detail) = self.details.get(id) {
            return Some(detail.clone());
        }

        let entity = self.entity(id)?;
        let statement = if entity.description.is_empty() {
            format!("No recorded statement for {}.", entity.label)
        } else {
            entity.description.clone()
        };

        Some(DetailRecord {
            title: entity.label.clone(),
            statement,
            discussion: String::new(),
        })
    }

    pub fn search(&self, query: &str) -> Vec<String> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        self.entities
            .iter()
            .filter(|entity| {
                entity.label.to_lowercase().contains(&query)
                    || entity.description.to_lowercase().contains(&query)
                    || entity
                        .tags
                        .iter()
                        .any(|tag| tag.to_lowercase().contains(&query))
            })
            .map(|entity| entity.id.clone())
            .collect()
    }
}
