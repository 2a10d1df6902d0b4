use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::error;

use crate::graph::entity::{Entity, GraphView, ObservationAdd, ObservationDelete, Relation};
use crate::graph::error::GraphError;
use crate::graph::manager::StoreManager;
use crate::mcp_core::{
    Content, Resource, ResourceError, Router, ServerCapabilities, Tool, ToolError,
};

const GRAPH_RESOURCE_URI: &str = "memory://graph";

/// MemoryRouter implements the Router trait and exposes the graph store
/// operations as MCP tools
pub struct MemoryRouter {
    store: Arc<StoreManager>,
}

impl MemoryRouter {
    pub fn new(store: Arc<StoreManager>) -> Self {
        Self { store }
    }

    async fn create_entities_tool(&self, entities: Vec<Entity>) -> Result<Vec<Content>, ToolError> {
        if let Some(err) = entities.iter().find_map(|entity| entity.validate().err()) {
            return Ok(vec![Content::text(err.to_string())]);
        }

        reply(self.store.with_store(|s| s.create_entities(entities)).await)
    }

    async fn create_relations_tool(
        &self,
        relations: Vec<Relation>,
    ) -> Result<Vec<Content>, ToolError> {
        if let Some(err) = relations.iter().find_map(|relation| relation.validate().err()) {
            return Ok(vec![Content::text(err.to_string())]);
        }

        reply(self.store.with_store(|s| s.create_relations(relations)).await)
    }

    async fn add_observations_tool(
        &self,
        observations: Vec<ObservationAdd>,
    ) -> Result<Vec<Content>, ToolError> {
        reply(
            self.store
                .with_store(|s| s.add_observations(observations))
                .await,
        )
    }

    async fn delete_entities_tool(
        &self,
        entity_names: Vec<String>,
    ) -> Result<Vec<Content>, ToolError> {
        reply(
            self.store
                .with_store(|s| s.delete_entities(entity_names))
                .await,
        )
    }

    async fn delete_observations_tool(
        &self,
        deletions: Vec<ObservationDelete>,
    ) -> Result<Vec<Content>, ToolError> {
        reply(
            self.store
                .with_store(|s| s.delete_observations(deletions))
                .await,
        )
    }

    async fn delete_relations_tool(
        &self,
        relations: Vec<Relation>,
    ) -> Result<Vec<Content>, ToolError> {
        reply(self.store.with_store(|s| s.delete_relations(relations)).await)
    }

    async fn read_graph_tool(&self) -> Result<Vec<Content>, ToolError> {
        json_reply(self.store.with_store(|s| Ok(s.read_graph())).await)
    }

    async fn search_nodes_tool(&self, query: String) -> Result<Vec<Content>, ToolError> {
        json_reply(self.store.with_store(|s| Ok(s.search_nodes(&query))).await)
    }

    async fn open_nodes_tool(&self, names: Vec<String>) -> Result<Vec<Content>, ToolError> {
        json_reply(self.store.with_store(|s| Ok(s.open_nodes(&names))).await)
    }
}

/// Map a mutating operation result onto the tool result channel: validation
/// failures become plain text results, infrastructure failures become tool
/// errors
fn reply(result: Result<String, GraphError>) -> Result<Vec<Content>, ToolError> {
    match result {
        Ok(message) => Ok(vec![Content::text(message)]),
        Err(err) if err.is_validation() => Ok(vec![Content::text(err.to_string())]),
        Err(err) => {
            error!("Graph operation failed: {}", err);
            Err(ToolError::ExecutionFailed(err.to_string()))
        }
    }
}

/// Serialize a read operation result as JSON content
fn json_reply(result: Result<GraphView, GraphError>) -> Result<Vec<Content>, ToolError> {
    let view = result.map_err(|e| {
        error!("Graph read failed: {}", e);
        ToolError::ExecutionFailed(e.to_string())
    })?;
    let value = serde_json::to_value(view)
        .map_err(|e| ToolError::ExecutionFailed(format!("Failed to serialize graph: {}", e)))?;
    Ok(vec![Content::json(value)])
}

/// Decode a required argument field
fn required_arg<T: DeserializeOwned>(arguments: &Value, key: &str) -> Result<T, ToolError> {
    let value = arguments
        .get(key)
        .ok_or_else(|| ToolError::InvalidParams(format!("Missing '{}' parameter", key)))?;

    serde_json::from_value(value.clone())
        .map_err(|e| ToolError::InvalidParams(format!("Invalid '{}' parameter: {}", key, e)))
}

impl Router for MemoryRouter {
    fn name(&self) -> String {
        "engram-memory".to_string()
    }

    fn instructions(&self) -> String {
        r#"
        This MCP server provides persistent memory for AI agents, backed by a
        local knowledge graph of entities and directed relations.

        Writing tools:
        - create_entities: Create new entities with a name, a type and optional observations
        - create_relations: Create directed, typed relations between existing entities
        - add_observations: Append observations to existing entities
        - delete_entities: Delete entities and every relation touching them
        - delete_observations: Remove specific observations from entities
        - delete_relations: Delete relations by exact match

        Reading tools:
        - read_graph: Read the entire graph
        - search_nodes: Case-insensitive substring search over names, types and observations
        - open_nodes: Fetch specific entities by name, with their relations

        Validation failures (duplicate entities, unknown names, malformed
        fields) are reported as plain text results rather than errors.
        "#
        .to_string()
    }

    fn capabilities(&self) -> ServerCapabilities {
        ServerCapabilities {
            tools: true,
            resources: true,
        }
    }

    fn list_tools(&self) -> Vec<Tool> {
        vec![
            Tool::new(
                "create_entities".to_string(),
                "Create new entities in the knowledge graph".to_string(),
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "entities": {
                            "type": "array",
                            "description": "Entities to create",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "name": {
                                        "type": "string",
                                        "description": "Unique name of the entity"
                                    },
                                    "entity_type": {
                                        "type": "string",
                                        "description": "Free-form type classification"
                                    },
                                    "observations": {
                                        "type": "array",
                                        "items": {"type": "string"},
                                        "description": "Initial observations about the entity"
                                    }
                                },
                                "required": ["name", "entity_type"]
                            }
                        }
                    },
                    "required": ["entities"]
                }),
            ),
            Tool::new(
                "create_relations".to_string(),
                "Create directed relations between existing entities".to_string(),
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "relations": {
                            "type": "array",
                            "description": "Relations to create",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "from_entity": {
                                        "type": "string",
                                        "description": "Name of the source entity"
                                    },
                                    "to_entity": {
                                        "type": "string",
                                        "description": "Name of the target entity"
                                    },
                                    "relation_type": {
                                        "type": "string",
                                        "description": "Type of the relation"
                                    }
                                },
                                "required": ["from_entity", "to_entity", "relation_type"]
                            }
                        }
                    },
                    "required": ["relations"]
                }),
            ),
            Tool::new(
                "add_observations".to_string(),
                "Append observations to existing entities".to_string(),
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "observations": {
                            "type": "array",
                            "description": "Observations to add per entity",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "entity_name": {
                                        "type": "string",
                                        "description": "Name of the entity to extend"
                                    },
                                    "contents": {
                                        "type": "array",
                                        "items": {"type": "string"},
                                        "description": "Observations to append"
                                    }
                                },
                                "required": ["entity_name", "contents"]
                            }
                        }
                    },
                    "required": ["observations"]
                }),
            ),
            Tool::new(
                "delete_entities".to_string(),
                "Delete entities and every relation touching them".to_string(),
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "entity_names": {
                            "type": "array",
                            "items": {"type": "string"},
                            "description": "Names of the entities to delete"
                        }
                    },
                    "required": ["entity_names"]
                }),
            ),
            Tool::new(
                "delete_observations".to_string(),
                "Remove specific observations from entities".to_string(),
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "deletions": {
                            "type": "array",
                            "description": "Observations to remove per entity",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "entity_name": {
                                        "type": "string",
                                        "description": "Name of the entity to trim"
                                    },
                                    "observation": {
                                        "type": "string",
                                        "description": "Exact observation text to remove"
                                    }
                                },
                                "required": ["entity_name", "observation"]
                            }
                        }
                    },
                    "required": ["deletions"]
                }),
            ),
            Tool::new(
                "delete_relations".to_string(),
                "Delete relations by exact match".to_string(),
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "relations": {
                            "type": "array",
                            "description": "Relations to delete",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "from_entity": {"type": "string"},
                                    "to_entity": {"type": "string"},
                                    "relation_type": {"type": "string"}
                                },
                                "required": ["from_entity", "to_entity", "relation_type"]
                            }
                        }
                    },
                    "required": ["relations"]
                }),
            ),
            Tool::new(
                "read_graph".to_string(),
                "Read the entire knowledge graph".to_string(),
                serde_json::json!({
                    "type": "object",
                    "properties": {},
                    "required": []
                }),
            ),
            Tool::new(
                "search_nodes".to_string(),
                "Search entities by name, type or observation content".to_string(),
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "Case-insensitive substring to search for"
                        }
                    },
                    "required": ["query"]
                }),
            ),
            Tool::new(
                "open_nodes".to_string(),
                "Fetch specific entities by name, with their relations".to_string(),
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "names": {
                            "type": "array",
                            "items": {"type": "string"},
                            "description": "Names of the entities to fetch"
                        }
                    },
                    "required": ["names"]
                }),
            ),
        ]
    }

    fn call_tool(
        &self,
        tool_name: &str,
        arguments: Value,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Content>, ToolError>> + Send + 'static>> {
        let name = tool_name.to_string();
        let router = self.clone();

        Box::pin(async move {
            match name.as_str() {
                "create_entities" => {
                    let entities = required_arg(&arguments, "entities")?;
                    router.create_entities_tool(entities).await
                }
                "create_relations" => {
                    let relations = required_arg(&arguments, "relations")?;
                    router.create_relations_tool(relations).await
                }
                "add_observations" => {
                    let observations = required_arg(&arguments, "observations")?;
                    router.add_observations_tool(observations).await
                }
                "delete_entities" => {
                    let entity_names = required_arg(&arguments, "entity_names")?;
                    router.delete_entities_tool(entity_names).await
                }
                "delete_observations" => {
                    let deletions = required_arg(&arguments, "deletions")?;
                    router.delete_observations_tool(deletions).await
                }
                "delete_relations" => {
                    let relations = required_arg(&arguments, "relations")?;
                    router.delete_relations_tool(relations).await
                }
                "read_graph" => router.read_graph_tool().await,
                "search_nodes" => {
                    let query: String = required_arg(&arguments, "query")?;
                    router.search_nodes_tool(query).await
                }
                "open_nodes" => {
                    let names = required_arg(&arguments, "names")?;
                    router.open_nodes_tool(names).await
                }
                _ => Err(ToolError::NotFound(name)),
            }
        })
    }

    fn list_resources(&self) -> Vec<Resource> {
        vec![Resource {
            uri: GRAPH_RESOURCE_URI.to_string(),
            name: "Memory graph".to_string(),
            description: "The full knowledge graph as JSON".to_string(),
        }]
    }

    fn read_resource(
        &self,
        uri: &str,
    ) -> Pin<Box<dyn Future<Output = Result<String, ResourceError>> + Send + 'static>> {
        let uri = uri.to_string();
        let router = self.clone();

        Box::pin(async move {
            match uri.as_str() {
                GRAPH_RESOURCE_URI => {
                    let view = router
                        .store
                        .with_store(|s| Ok(s.read_graph()))
                        .await
                        .map_err(|e| {
                            ResourceError::Internal(format!("Failed to read graph: {}", e))
                        })?;

                    serde_json::to_string_pretty(&view).map_err(|e| {
                        ResourceError::Internal(format!("Failed to serialize graph: {}", e))
                    })
                }
                _ => Err(ResourceError::NotFound(uri)),
            }
        })
    }
}

impl Clone for MemoryRouter {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}
