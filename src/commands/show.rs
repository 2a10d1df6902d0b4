use anyhow::Result;

use crate::cli::StorageArgs;
use crate::graph::store::GraphStore;

/// Print the stored memory graph as pretty JSON
pub fn run(args: StorageArgs) -> Result<()> {
    let config = args.into_config();
    let store = GraphStore::open(&config)?;
    let view = store.read_graph();
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
