use crate::{ConfigStore, StoreError};
use async_trait::async_trait;
use parking_lot::RwLock;
use spechub_domain::id::ConfigId;
use spechub_domain::spec::ServiceSpec;
use std::collections::HashMap;
use std::sync::Arc;

/// In-process snapshot map.
///
/// Cloning is cheap; clones share the same snapshots.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigStore {
    snapshots: Arc<RwLock<HashMap<ConfigId, Arc<ServiceSpec>>>>,
}

impl MemoryConfigStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `spec` under a freshly generated identifier.
    pub fn store(&self, spec: ServiceSpec) -> ConfigId {
        let id = ConfigId::new_v4();
        self.insert(id, spec);
        id
    }

    /// Stores `spec` under `id`, replacing any previous snapshot.
    pub fn insert(&self, id: ConfigId, spec: ServiceSpec) {
        self.snapshots.write().insert(id, Arc::new(spec));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.read().len()
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn fetch(&self, id: &ConfigId) -> Result<Arc<ServiceSpec>, StoreError> {
        self.snapshots.read().get(id).cloned().ok_or_else(|| StoreError::NotFound {
            message: id.to_string().into(),
            context: None,
        })
    }

    async fn list(&self) -> Result<Vec<ConfigId>, StoreError> {
        let mut ids: Vec<ConfigId> = self.snapshots.read().keys().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }
}
