use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::GraphError;

/// A named, typed node in the graph with free-text observations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entity {
    pub name: String,
    pub entity_type: String,
    #[serde(default)]
    pub observations: Vec<String>,
}

impl Entity {
    pub fn new(name: &str, entity_type: &str, observations: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            entity_type: entity_type.to_string(),
            observations,
        }
    }

    /// Field-level checks applied at the tool boundary, before the store
    /// sees the data
    pub fn validate(&self) -> Result<(), GraphError> {
        if self.name.is_empty() {
            return Err(GraphError::InvalidEntity(
                "name must be a non-empty string".to_string(),
            ));
        }
        if self.entity_type.is_empty() {
            return Err(GraphError::InvalidEntity(
                "entity_type must be a non-empty string".to_string(),
            ));
        }
        Ok(())
    }
}

/// A directed, typed edge between two entities
///
/// Identified by its full tuple; there is no separate relation id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Relation {
    pub from_entity: String,
    pub to_entity: String,
    pub relation_type: String,
}

impl Relation {
    pub fn new(from_entity: &str, to_entity: &str, relation_type: &str) -> Self {
        Self {
            from_entity: from_entity.to_string(),
            to_entity: to_entity.to_string(),
            relation_type: relation_type.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), GraphError> {
        if self.from_entity.is_empty() {
            return Err(GraphError::InvalidRelation(
                "from_entity must be a non-empty string".to_string(),
            ));
        }
        if self.to_entity.is_empty() {
            return Err(GraphError::InvalidRelation(
                "to_entity must be a non-empty string".to_string(),
            ));
        }
        if self.relation_type.is_empty() {
            return Err(GraphError::InvalidRelation(
                "relation_type must be a non-empty string".to_string(),
            ));
        }
        Ok(())
    }

    /// True when the relation mentions `name` on either side
    pub fn touches(&self, name: &str) -> bool {
        self.from_entity == name || self.to_entity == name
    }
}

/// Argument shape for add_observations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationAdd {
    pub entity_name: String,
    pub contents: Vec<String>,
}

/// Argument shape for delete_observations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationDelete {
    pub entity_name: String,
    pub observation: String,
}

/// Snapshot of an entity as exposed by the read operations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeView {
    pub entity_type: String,
    pub observations: Vec<String>,
}

impl From<&Entity> for NodeView {
    fn from(entity: &Entity) -> Self {
        Self {
            entity_type: entity.entity_type.clone(),
            observations: entity.observations.clone(),
        }
    }
}

/// Result shape of read_graph, search_nodes and open_nodes
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphView {
    pub entities: BTreeMap<String, NodeView>,
    pub relations: Vec<Relation>,
}
