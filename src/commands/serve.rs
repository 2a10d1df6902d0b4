use anyhow::Result;
use std::sync::Arc;
use tokio::io::{stdin, stdout};
use tracing::info;

use crate::cli::StorageArgs;
use crate::graph::manager::StoreManager;
use crate::mcp_server::{ByteTransport, MemoryRouter, Server};

/// Run the MCP memory server with stdin/stdout transport
pub async fn run(args: StorageArgs) -> Result<()> {
    let config = args.into_config();
    info!("Starting engram MCP server");

    let manager = Arc::new(StoreManager::new(config));

    // Touch the store up front so a bad storage location fails at startup
    // rather than on the first tool call
    let (entity_count, relation_count) = manager
        .with_store(|store| Ok((store.entity_count(), store.relation_count())))
        .await?;
    info!(
        "Loaded memory graph with {} entities and {} relations",
        entity_count, relation_count
    );

    let router = MemoryRouter::new(manager);
    let server = Server::new(router);

    info!("Using stdin/stdout transport");
    info!("Server is ready to receive JSON-RPC requests - connect a compatible client");
    let transport = ByteTransport::new(stdin(), stdout());
    server.run(transport).await?;

    Ok(())
}
