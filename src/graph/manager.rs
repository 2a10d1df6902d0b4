use tokio::sync::Mutex;
use tracing::{debug, error, info};

use super::error::GraphError;
use super::store::GraphStore;
use crate::config::StoreConfig;

/// Coordinated access to one lazily-constructed graph store
///
/// The lock guards the handle: construction and teardown are mutually
/// exclusive, and because operations borrow the store through the same
/// guard, in-process callers are serialized as well, so overlapping
/// full-file saves cannot race within one process. External writers to the
/// same file are not coordinated.
pub struct StoreManager {
    config: StoreConfig,
    store: Mutex<Option<GraphStore>>,
}

impl StoreManager {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            store: Mutex::new(None),
        }
    }

    /// Run `f` against the store, constructing it from the persisted file on
    /// first use; construction failures propagate to the caller
    pub async fn with_store<T>(
        &self,
        f: impl FnOnce(&mut GraphStore) -> Result<T, GraphError>,
    ) -> Result<T, GraphError> {
        let mut slot = self.store.lock().await;
        let store = match &mut *slot {
            Some(store) => store,
            empty => {
                debug!("constructing graph store");
                let store = GraphStore::open(&self.config).map_err(|err| {
                    error!("Failed to construct graph store: {}", err);
                    err
                })?;
                empty.insert(store)
            }
        };
        f(store)
    }

    /// Tear down the current store; the next access reconstructs it from
    /// the persisted file
    pub async fn clear(&self) {
        let mut slot = self.store.lock().await;
        if let Some(mut store) = slot.take() {
            store.clear();
            info!("Graph store cleared, will reload on next access");
        }
    }
}
