use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::StoreConfig;

/// Engram: a persistent knowledge graph memory for AI agents
#[derive(Parser)]
#[command(
    author,
    version,
    about = "A persistent knowledge graph memory for AI agents"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the MCP memory server on stdin/stdout
    Serve(StorageArgs),

    /// Print the stored memory graph as JSON
    Show(StorageArgs),
}

/// Storage location overrides; unset values fall back to the environment
#[derive(Args)]
pub struct StorageArgs {
    /// Name of the memory file (overrides MEMORY_FILE_NAME)
    #[arg(long)]
    pub file_name: Option<String>,

    /// Keep the memory file in the current working directory (overrides LOCAL_STORAGE)
    #[arg(long)]
    pub local: bool,

    /// Directory to keep the memory file in (overrides MEMORY_FILE_PATH)
    #[arg(long)]
    pub base_dir: Option<PathBuf>,
}

impl StorageArgs {
    /// Resolve the storage configuration, layering CLI flags over the environment
    pub fn into_config(self) -> StoreConfig {
        let mut config = StoreConfig::from_env();
        if let Some(file_name) = self.file_name {
            config.file_name = file_name;
        }
        if self.local {
            config.local_storage = true;
        }
        if let Some(base_dir) = self.base_dir {
            config.base_dir = base_dir;
        }
        config
    }
}
