use thiserror::Error;

/// Errors surfaced by graph store operations
///
/// The validation variants carry the exact messages the remote contract
/// exposes as string results. `Io` and `Json` are fatal infrastructure
/// failures and abort the operation instead.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Entity already exists: {0}")]
    EntityExists(String),

    #[error("One or both entities not found: {0}, {1}")]
    EndpointsMissing(String, String),

    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Relation not found: {0} -> {1}")]
    RelationNotFound(String, String),

    #[error("Invalid entity data: {0}")]
    InvalidEntity(String),

    #[error("Invalid relation data: {0}")]
    InvalidRelation(String),

    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GraphError {
    /// Expected validation failure, reported to callers as a plain string
    /// result rather than a protocol-level error
    pub fn is_validation(&self) -> bool {
        !matches!(self, GraphError::Io(_) | GraphError::Json(_))
    }
}
