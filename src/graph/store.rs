use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use serde_json::Value;
use tracing::{debug, warn};

use super::entity::{Entity, GraphView, NodeView, ObservationAdd, ObservationDelete, Relation};
use super::error::GraphError;
use crate::config::StoreConfig;

/// The authoritative in-memory graph plus its memory file
///
/// The persisted file is the canonical state: the in-memory collections are
/// a cache that is rewritten to disk after every successful mutation. Reads
/// never touch the file.
#[derive(Debug)]
pub struct GraphStore {
    storage_path: PathBuf,
    entities: HashMap<String, Entity>,
    relations: Vec<Relation>,
}

impl GraphStore {
    /// Open the store at the location `config` resolves to, creating an
    /// empty memory file if none exists, then load it
    pub fn open(config: &StoreConfig) -> Result<Self, GraphError> {
        let storage_path = config.storage_path()?;
        debug!(
            path = %storage_path.display(),
            local = config.local_storage,
            "opening graph store"
        );

        let mut store = Self {
            storage_path,
            entities: HashMap::new(),
            relations: Vec::new(),
        };
        store.load()?;
        Ok(store)
    }

    /// Reset in-memory state and reload from the memory file
    ///
    /// I/O failures (unreadable path, path is a directory) are fatal;
    /// individual unparsable lines are not.
    fn load(&mut self) -> Result<(), GraphError> {
        self.entities = HashMap::new();
        self.relations = Vec::new();

        if !self.storage_path.exists() {
            if let Some(parent) = self.storage_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = File::create(&self.storage_path)?;
            file.sync_all()?;
            return Ok(());
        }

        let content = fs::read_to_string(&self.storage_path)?;
        if content.trim().is_empty() {
            return Ok(());
        }
        self.ingest(&content);
        Ok(())
    }

    /// Parse newline-delimited JSON records, keeping what parses and
    /// skipping the rest with a warning
    fn ingest(&mut self, content: &str) {
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let record: Value = match serde_json::from_str(line) {
                Ok(value) => value,
                Err(err) => {
                    warn!(
                        "Invalid JSON line encountered, skipping: {} ({})",
                        preview(line),
                        err
                    );
                    continue;
                }
            };

            if record.get("name").is_some() {
                match entity_from_record(&record) {
                    Some(entity) => {
                        self.entities.insert(entity.name.clone(), entity);
                    }
                    None => warn!(
                        "Entity record missing required fields, skipping: {}",
                        preview(line)
                    ),
                }
            } else if record.get("from_entity").is_some() {
                match relation_from_record(&record) {
                    Some(relation) => self.relations.push(relation),
                    None => warn!(
                        "Relation record missing required fields, skipping: {}",
                        preview(line)
                    ),
                }
            }
            // Records matching neither shape are ignored
        }
    }

    /// Rewrite the memory file with the full current state and flush it to
    /// disk; called after every successful mutation
    fn save(&self) -> Result<(), GraphError> {
        if let Some(parent) = self.storage_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut buffer = String::new();
        for entity in self.entities.values() {
            buffer.push_str(&serde_json::to_string(entity)?);
            buffer.push('\n');
        }
        for relation in &self.relations {
            buffer.push_str(&serde_json::to_string(relation)?);
            buffer.push('\n');
        }

        let mut file = File::create(&self.storage_path)?;
        file.write_all(buffer.as_bytes())?;
        file.sync_all()?;
        Ok(())
    }

    /// Create new entities; all-or-nothing against the current entity set
    pub fn create_entities(&mut self, entities: Vec<Entity>) -> Result<String, GraphError> {
        // Check every name before inserting anything
        for entity in &entities {
            if self.entities.contains_key(&entity.name) {
                return Err(GraphError::EntityExists(entity.name.clone()));
            }
        }

        for entity in entities {
            self.entities.insert(entity.name.clone(), entity);
        }

        self.save()?;
        Ok("Successfully created entities".to_string())
    }

    /// Create new relations between existing entities
    ///
    /// Relations preceding the first invalid one are kept and persisted;
    /// the call is not atomic across the whole list. Duplicate relations
    /// are allowed.
    pub fn create_relations(&mut self, relations: Vec<Relation>) -> Result<String, GraphError> {
        let mut appended = false;
        for relation in relations {
            if !self.entities.contains_key(&relation.from_entity)
                || !self.entities.contains_key(&relation.to_entity)
            {
                let err =
                    GraphError::EndpointsMissing(relation.from_entity, relation.to_entity);
                if appended {
                    self.save()?;
                }
                return Err(err);
            }
            self.relations.push(relation);
            appended = true;
        }

        self.save()?;
        Ok("Successfully created relations".to_string())
    }

    /// Append observation contents to existing entities; nothing is touched
    /// unless every target exists
    pub fn add_observations(
        &mut self,
        observations: Vec<ObservationAdd>,
    ) -> Result<String, GraphError> {
        for obs in &observations {
            if !self.entities.contains_key(&obs.entity_name) {
                return Err(GraphError::EntityNotFound(obs.entity_name.clone()));
            }
        }

        for obs in observations {
            if let Some(entity) = self.entities.get_mut(&obs.entity_name) {
                entity.observations.extend(obs.contents);
            }
        }

        self.save()?;
        Ok("Successfully added observations".to_string())
    }

    /// Delete entities by name, cascading to every relation that mentions
    /// them; unknown names are ignored
    pub fn delete_entities(&mut self, entity_names: Vec<String>) -> Result<String, GraphError> {
        for name in &entity_names {
            if self.entities.remove(name).is_some() {
                self.relations.retain(|relation| !relation.touches(name));
            }
        }

        self.save()?;
        Ok("Successfully deleted entities".to_string())
    }

    /// Remove every occurrence of each exact observation string; aborts
    /// before mutating if any target entity is missing
    pub fn delete_observations(
        &mut self,
        deletions: Vec<ObservationDelete>,
    ) -> Result<String, GraphError> {
        for deletion in &deletions {
            if !self.entities.contains_key(&deletion.entity_name) {
                return Err(GraphError::EntityNotFound(deletion.entity_name.clone()));
            }
        }

        for deletion in deletions {
            if let Some(entity) = self.entities.get_mut(&deletion.entity_name) {
                entity.observations.retain(|obs| obs != &deletion.observation);
            }
        }

        self.save()?;
        Ok("Successfully deleted observations".to_string())
    }

    /// Delete relations by exact tuple match; none are removed unless all
    /// given tuples currently exist
    pub fn delete_relations(&mut self, relations: Vec<Relation>) -> Result<String, GraphError> {
        for relation in &relations {
            if !self.relations.contains(relation) {
                return Err(GraphError::RelationNotFound(
                    relation.from_entity.clone(),
                    relation.to_entity.clone(),
                ));
            }
        }

        self.relations.retain(|existing| !relations.contains(existing));

        self.save()?;
        Ok("Successfully deleted relations".to_string())
    }

    /// Snapshot of the entire graph
    pub fn read_graph(&self) -> GraphView {
        GraphView {
            entities: self
                .entities
                .iter()
                .map(|(name, entity)| (name.clone(), NodeView::from(entity)))
                .collect(),
            relations: self.relations.clone(),
        }
    }

    /// Case-insensitive substring search over entity names, types and
    /// observations, with every relation touching a matching entity
    pub fn search_nodes(&self, query: &str) -> GraphView {
        let query = query.to_lowercase();

        let matched = self
            .entities
            .values()
            .filter(|entity| {
                entity.name.to_lowercase().contains(&query)
                    || entity.entity_type.to_lowercase().contains(&query)
                    || entity
                        .observations
                        .iter()
                        .any(|obs| obs.to_lowercase().contains(&query))
            })
            .collect();

        self.view_of(matched)
    }

    /// Look up entities by name, ignoring unknown names, with every relation
    /// touching any of them
    pub fn open_nodes(&self, names: &[String]) -> GraphView {
        let matched = names
            .iter()
            .filter_map(|name| self.entities.get(name))
            .collect();

        self.view_of(matched)
    }

    /// Drop all in-memory state; the memory file is left untouched
    pub fn clear(&mut self) {
        self.entities.clear();
        self.relations.clear();
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    fn view_of(&self, matched: Vec<&Entity>) -> GraphView {
        let entities: BTreeMap<String, NodeView> = matched
            .into_iter()
            .map(|entity| (entity.name.clone(), NodeView::from(entity)))
            .collect();

        let relations = self
            .relations
            .iter()
            .filter(|relation| {
                entities.contains_key(&relation.from_entity)
                    || entities.contains_key(&relation.to_entity)
            })
            .cloned()
            .collect();

        GraphView { entities, relations }
    }
}

fn entity_from_record(record: &Value) -> Option<Entity> {
    let name = record.get("name")?.as_str()?;
    let entity_type = record.get("entity_type")?.as_str()?;
    let observations = record
        .get("observations")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Some(Entity {
        name: name.to_string(),
        entity_type: entity_type.to_string(),
        observations,
    })
}

fn relation_from_record(record: &Value) -> Option<Relation> {
    let from_entity = record.get("from_entity")?.as_str()?;
    let to_entity = record.get("to_entity")?.as_str()?;
    let relation_type = record.get("relation_type")?.as_str()?;

    Some(Relation {
        from_entity: from_entity.to_string(),
        to_entity: to_entity.to_string(),
        relation_type: relation_type.to_string(),
    })
}

/// Truncate a line for log output
fn preview(line: &str) -> String {
    line.chars().take(100).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> StoreConfig {
        StoreConfig {
            file_name: "test_memory.json".to_string(),
            local_storage: false,
            base_dir: dir.path().to_path_buf(),
        }
    }

    fn sample_entity(name: &str) -> Entity {
        Entity::new(name, "project", vec!["test observation".to_string()])
    }

    #[test]
    fn open_creates_empty_file() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);

        let store = GraphStore::open(&config).unwrap();
        assert!(config.storage_path().unwrap().exists());
        assert_eq!(store.entity_count(), 0);
        assert_eq!(store.relation_count(), 0);
    }

    #[test]
    fn open_creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let config = StoreConfig {
            file_name: "memory.json".to_string(),
            local_storage: false,
            base_dir: dir.path().join("nested").join("deeper"),
        };

        GraphStore::open(&config).unwrap();
        assert!(config.storage_path().unwrap().exists());
    }

    #[test]
    fn empty_file_loads_empty_graph() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        fs::write(config.storage_path().unwrap(), "  \n\n").unwrap();

        let store = GraphStore::open(&config).unwrap();
        assert_eq!(store.entity_count(), 0);
        assert_eq!(store.relation_count(), 0);
    }

    #[test]
    fn open_fails_when_path_is_a_directory() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        fs::create_dir(config.storage_path().unwrap()).unwrap();

        let result = GraphStore::open(&config);
        assert!(matches!(result, Err(GraphError::Io(_))));
    }

    #[test]
    fn create_entities_succeeds() {
        let dir = TempDir::new().unwrap();
        let mut store = GraphStore::open(&test_config(&dir)).unwrap();

        let message = store
            .create_entities(vec![sample_entity("test_entity")])
            .unwrap();
        assert_eq!(message, "Successfully created entities");
        assert_eq!(store.entity_count(), 1);
    }

    #[test]
    fn duplicate_entity_is_rejected_and_nothing_is_added() {
        let dir = TempDir::new().unwrap();
        let mut store = GraphStore::open(&test_config(&dir)).unwrap();
        store
            .create_entities(vec![sample_entity("test_entity")])
            .unwrap();

        let err = store
            .create_entities(vec![sample_entity("other"), sample_entity("test_entity")])
            .unwrap_err();
        assert_eq!(err.to_string(), "Entity already exists: test_entity");
        // The valid entity in the same call must not have been added
        assert_eq!(store.entity_count(), 1);
    }

    #[test]
    fn create_relations_requires_existing_endpoints() {
        let dir = TempDir::new().unwrap();
        let mut store = GraphStore::open(&test_config(&dir)).unwrap();

        let err = store
            .create_relations(vec![Relation::new("a", "b", "knows")])
            .unwrap_err();
        assert_eq!(err.to_string(), "One or both entities not found: a, b");
        assert_eq!(store.relation_count(), 0);
    }

    #[test]
    fn create_relations_allows_duplicates() {
        let dir = TempDir::new().unwrap();
        let mut store = GraphStore::open(&test_config(&dir)).unwrap();
        store
            .create_entities(vec![sample_entity("a"), sample_entity("b")])
            .unwrap();

        store
            .create_relations(vec![Relation::new("a", "b", "knows")])
            .unwrap();
        store
            .create_relations(vec![Relation::new("a", "b", "knows")])
            .unwrap();
        assert_eq!(store.relation_count(), 2);
    }

    #[test]
    fn create_relations_partial_apply_is_persisted() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let mut store = GraphStore::open(&config).unwrap();
        store
            .create_entities(vec![sample_entity("p1"), sample_entity("c1")])
            .unwrap();

        let err = store
            .create_relations(vec![
                Relation::new("p1", "c1", "has_component"),
                Relation::new("p1", "ghost", "has_component"),
            ])
            .unwrap_err();
        assert_eq!(err.to_string(), "One or both entities not found: p1, ghost");
        assert_eq!(store.relation_count(), 1);

        // The valid prefix survives a reload from the file
        let reloaded = GraphStore::open(&config).unwrap();
        assert_eq!(reloaded.relation_count(), 1);
    }

    #[test]
    fn add_observations_extends_existing_list() {
        let dir = TempDir::new().unwrap();
        let mut store = GraphStore::open(&test_config(&dir)).unwrap();
        store
            .create_entities(vec![sample_entity("test_entity")])
            .unwrap();

        let message = store
            .add_observations(vec![ObservationAdd {
                entity_name: "test_entity".to_string(),
                contents: vec!["new observation".to_string()],
            }])
            .unwrap();
        assert_eq!(message, "Successfully added observations");

        let view = store.read_graph();
        assert_eq!(
            view.entities["test_entity"].observations,
            vec!["test observation".to_string(), "new observation".to_string()]
        );
    }

    #[test]
    fn add_observations_is_atomic() {
        let dir = TempDir::new().unwrap();
        let mut store = GraphStore::open(&test_config(&dir)).unwrap();
        store
            .create_entities(vec![sample_entity("test_entity")])
            .unwrap();

        let err = store
            .add_observations(vec![
                ObservationAdd {
                    entity_name: "test_entity".to_string(),
                    contents: vec!["should not land".to_string()],
                },
                ObservationAdd {
                    entity_name: "non_existent".to_string(),
                    contents: vec!["x".to_string()],
                },
            ])
            .unwrap_err();
        assert_eq!(err.to_string(), "Entity not found: non_existent");

        let view = store.read_graph();
        assert_eq!(view.entities["test_entity"].observations.len(), 1);
    }

    #[test]
    fn delete_entities_cascades_to_relations() {
        let dir = TempDir::new().unwrap();
        let mut store = GraphStore::open(&test_config(&dir)).unwrap();
        store
            .create_entities(vec![sample_entity("a"), sample_entity("b")])
            .unwrap();
        store
            .create_relations(vec![Relation::new("a", "b", "knows")])
            .unwrap();

        let message = store.delete_entities(vec!["a".to_string()]).unwrap();
        assert_eq!(message, "Successfully deleted entities");
        assert_eq!(store.entity_count(), 1);
        assert_eq!(store.relation_count(), 0);

        let view = store.read_graph();
        assert!(view.entities.contains_key("b"));
    }

    #[test]
    fn delete_entities_ignores_unknown_names() {
        let dir = TempDir::new().unwrap();
        let mut store = GraphStore::open(&test_config(&dir)).unwrap();

        let message = store.delete_entities(vec!["ghost".to_string()]).unwrap();
        assert_eq!(message, "Successfully deleted entities");
    }

    #[test]
    fn delete_observations_removes_all_occurrences() {
        let dir = TempDir::new().unwrap();
        let mut store = GraphStore::open(&test_config(&dir)).unwrap();
        store
            .create_entities(vec![Entity::new(
                "a",
                "project",
                vec![
                    "dup".to_string(),
                    "keep".to_string(),
                    "dup".to_string(),
                ],
            )])
            .unwrap();

        let message = store
            .delete_observations(vec![ObservationDelete {
                entity_name: "a".to_string(),
                observation: "dup".to_string(),
            }])
            .unwrap();
        assert_eq!(message, "Successfully deleted observations");

        let view = store.read_graph();
        assert_eq!(view.entities["a"].observations, vec!["keep".to_string()]);
    }

    #[test]
    fn delete_observations_aborts_on_unknown_entity() {
        let dir = TempDir::new().unwrap();
        let mut store = GraphStore::open(&test_config(&dir)).unwrap();
        store.create_entities(vec![sample_entity("a")]).unwrap();

        let err = store
            .delete_observations(vec![
                ObservationDelete {
                    entity_name: "a".to_string(),
                    observation: "test observation".to_string(),
                },
                ObservationDelete {
                    entity_name: "ghost".to_string(),
                    observation: "x".to_string(),
                },
            ])
            .unwrap_err();
        assert_eq!(err.to_string(), "Entity not found: ghost");

        // No deletion from the same call may have been applied
        let view = store.read_graph();
        assert_eq!(view.entities["a"].observations.len(), 1);
    }

    #[test]
    fn delete_relations_requires_all_tuples_to_exist() {
        let dir = TempDir::new().unwrap();
        let mut store = GraphStore::open(&test_config(&dir)).unwrap();
        store
            .create_entities(vec![sample_entity("a"), sample_entity("b")])
            .unwrap();
        store
            .create_relations(vec![Relation::new("a", "b", "knows")])
            .unwrap();

        let err = store
            .delete_relations(vec![
                Relation::new("a", "b", "knows"),
                Relation::new("b", "a", "knows"),
            ])
            .unwrap_err();
        assert_eq!(err.to_string(), "Relation not found: b -> a");
        assert_eq!(store.relation_count(), 1);

        let message = store
            .delete_relations(vec![Relation::new("a", "b", "knows")])
            .unwrap();
        assert_eq!(message, "Successfully deleted relations");
        assert_eq!(store.relation_count(), 0);
    }

    #[test]
    fn read_graph_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut store = GraphStore::open(&test_config(&dir)).unwrap();
        store
            .create_entities(vec![sample_entity("a"), sample_entity("b")])
            .unwrap();
        store
            .create_relations(vec![Relation::new("a", "b", "knows")])
            .unwrap();

        assert_eq!(store.read_graph(), store.read_graph());
    }

    #[test]
    fn round_trip_through_the_memory_file() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let mut store = GraphStore::open(&config).unwrap();
        store
            .create_entities(vec![
                Entity::new("p1", "project", vec!["obs one".to_string()]),
                Entity::new("c1", "component", vec![]),
            ])
            .unwrap();
        store
            .create_relations(vec![
                Relation::new("p1", "c1", "has_component"),
                Relation::new("c1", "p1", "belongs_to"),
            ])
            .unwrap();

        let reloaded = GraphStore::open(&config).unwrap();
        assert_eq!(reloaded.read_graph(), store.read_graph());
        // Relation order is preserved across the round trip
        let view = reloaded.read_graph();
        assert_eq!(view.relations[0], Relation::new("p1", "c1", "has_component"));
        assert_eq!(view.relations[1], Relation::new("c1", "p1", "belongs_to"));
    }

    #[test]
    fn search_is_case_insensitive_over_all_fields() {
        let dir = TempDir::new().unwrap();
        let mut store = GraphStore::open(&test_config(&dir)).unwrap();
        store
            .create_entities(vec![Entity::new(
                "Test_Entity",
                "Project",
                vec!["Has a Widget".to_string()],
            )])
            .unwrap();

        for query in ["test_entity", "PROJECT", "widget"] {
            let view = store.search_nodes(query);
            assert_eq!(view.entities.len(), 1, "query {:?} should match", query);
            assert!(view.entities.contains_key("Test_Entity"));
        }

        let view = store.search_nodes("nonexistent");
        assert!(view.entities.is_empty());
        assert!(view.relations.is_empty());
    }

    #[test]
    fn search_includes_relations_touching_matches() {
        let dir = TempDir::new().unwrap();
        let mut store = GraphStore::open(&test_config(&dir)).unwrap();
        store
            .create_entities(vec![
                Entity::new("alpha", "project", vec![]),
                Entity::new("beta", "component", vec![]),
            ])
            .unwrap();
        store
            .create_relations(vec![Relation::new("alpha", "beta", "has_component")])
            .unwrap();

        // Only "alpha" matches, but the relation touches it
        let view = store.search_nodes("alpha");
        assert_eq!(view.entities.len(), 1);
        assert_eq!(view.relations.len(), 1);
    }

    #[test]
    fn open_nodes_returns_relations_for_either_endpoint() {
        let dir = TempDir::new().unwrap();
        let mut store = GraphStore::open(&test_config(&dir)).unwrap();
        store
            .create_entities(vec![
                Entity::new("p1", "project", vec![]),
                Entity::new("c1", "component", vec![]),
            ])
            .unwrap();
        store
            .create_relations(vec![Relation::new("p1", "c1", "has_component")])
            .unwrap();

        let view = store.open_nodes(&["p1".to_string()]);
        assert_eq!(view.entities.len(), 1);
        assert_eq!(view.relations.len(), 1);

        let view = store.open_nodes(&["c1".to_string()]);
        assert_eq!(view.entities.len(), 1);
        assert_eq!(view.relations.len(), 1);
    }

    #[test]
    fn open_nodes_ignores_unknown_names() {
        let dir = TempDir::new().unwrap();
        let mut store = GraphStore::open(&test_config(&dir)).unwrap();
        store.create_entities(vec![sample_entity("a")]).unwrap();

        let view = store.open_nodes(&["a".to_string(), "ghost".to_string()]);
        assert_eq!(view.entities.len(), 1);

        let view = store.open_nodes(&["ghost".to_string()]);
        assert!(view.entities.is_empty());
        assert!(view.relations.is_empty());
    }

    #[test]
    fn load_salvages_valid_lines() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        fs::write(
            config.storage_path().unwrap(),
            concat!(
                "{\"name\": \"good\", \"entity_type\": \"project\"}\n",
                "not json at all\n",
                "{\"name\": \"no_type\"}\n",
                "{\"entity_type\": \"orphan\"}\n",
                "\n",
                "{\"from_entity\": \"good\", \"to_entity\": \"gone\"}\n",
                "{\"from_entity\": \"good\", \"to_entity\": \"gone\", \"relation_type\": \"knows\"}\n",
            ),
        )
        .unwrap();

        let store = GraphStore::open(&config).unwrap();
        assert_eq!(store.entity_count(), 1);
        assert_eq!(store.relation_count(), 1);

        let view = store.read_graph();
        // Missing observations default to an empty list
        assert!(view.entities["good"].observations.is_empty());
        // Dangling relations from the file are kept as-is
        assert_eq!(view.relations[0], Relation::new("good", "gone", "knows"));
    }

    #[test]
    fn save_writes_entities_before_relations() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let mut store = GraphStore::open(&config).unwrap();
        store
            .create_entities(vec![sample_entity("a"), sample_entity("b")])
            .unwrap();
        store
            .create_relations(vec![Relation::new("a", "b", "knows")])
            .unwrap();

        let content = fs::read_to_string(config.storage_path().unwrap()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("\"name\""));
        assert!(lines[1].contains("\"name\""));
        assert!(lines[2].contains("\"from_entity\""));
        assert!(content.ends_with('\n'));
    }

    #[test]
    fn clear_empties_memory_but_not_the_file() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let mut store = GraphStore::open(&config).unwrap();
        store.create_entities(vec![sample_entity("a")]).unwrap();

        store.clear();
        assert_eq!(store.entity_count(), 0);

        // The persisted state is untouched; a fresh store sees the entity
        let reloaded = GraphStore::open(&config).unwrap();
        assert_eq!(reloaded.entity_count(), 1);
    }
}
