use std::env;
use std::io;
use std::path::PathBuf;

/// Default settings, overridable through the environment
pub const DEFAULT_MEMORY_FILE_NAME: &str = "memory.json";
pub const DEFAULT_MEMORY_FILE_PATH: &str = ".";

pub const ENV_MEMORY_FILE_NAME: &str = "MEMORY_FILE_NAME";
pub const ENV_LOCAL_STORAGE: &str = "LOCAL_STORAGE";
pub const ENV_MEMORY_FILE_PATH: &str = "MEMORY_FILE_PATH";

/// Storage location inputs for the graph store
///
/// Resolved once at store construction, never per operation.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Name of the memory file
    pub file_name: String,

    /// Keep the memory file in the current working directory instead of `base_dir`
    pub local_storage: bool,

    /// Base directory for the memory file when `local_storage` is off
    pub base_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_MEMORY_FILE_NAME.to_string(),
            local_storage: false,
            base_dir: PathBuf::from(DEFAULT_MEMORY_FILE_PATH),
        }
    }
}

impl StoreConfig {
    /// Read configuration from MEMORY_FILE_NAME, LOCAL_STORAGE and
    /// MEMORY_FILE_PATH, falling back to the defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            file_name: env::var(ENV_MEMORY_FILE_NAME).unwrap_or(defaults.file_name),
            local_storage: env::var(ENV_LOCAL_STORAGE)
                .map(|value| value.to_lowercase() == "true")
                .unwrap_or(defaults.local_storage),
            base_dir: env::var(ENV_MEMORY_FILE_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.base_dir),
        }
    }

    /// Resolved location of the memory file
    pub fn storage_path(&self) -> io::Result<PathBuf> {
        if self.local_storage {
            Ok(env::current_dir()?.join(&self.file_name))
        } else {
            Ok(self.base_dir.join(&self.file_name))
        }
    }
}
