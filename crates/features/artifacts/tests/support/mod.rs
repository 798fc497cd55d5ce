#![allow(dead_code, unreachable_pub)]

use async_trait::async_trait;
use spechub_domain::id::ConfigId;
use spechub_domain::spec::{ConfigFileSpec, PodSpec, ServiceSpec, TaskSpec};
use spechub_store::{ConfigStore, MemoryConfigStore, StoreError};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Pods `web` and `db`; `web/server/app.conf` holds `port=8080`.
#[must_use]
pub fn web_db_spec() -> ServiceSpec {
    ServiceSpec::new(
        "hello-world",
        [
            PodSpec::new(
                "web",
                [TaskSpec::new(
                    "server",
                    [
                        ConfigFileSpec::new("app.conf", "port=8080"),
                        ConfigFileSpec::new("nginx.conf", "worker_processes {{CPUS}};\n"),
                    ],
                )],
            ),
            PodSpec::new("db", [TaskSpec::new("postgres", [])]),
        ],
    )
}

/// Wraps a store and counts `fetch` calls.
#[derive(Debug, Default)]
pub struct CountingStore {
    pub inner: MemoryConfigStore,
    fetches: AtomicUsize,
}

impl CountingStore {
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfigStore for CountingStore {
    async fn fetch(&self, id: &ConfigId) -> Result<Arc<ServiceSpec>, StoreError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch(id).await
    }

    async fn list(&self) -> Result<Vec<ConfigId>, StoreError> {
        self.inner.list().await
    }
}

/// A store whose backend is permanently down.
#[derive(Debug, Default)]
pub struct BrokenStore;

#[async_trait]
impl ConfigStore for BrokenStore {
    async fn fetch(&self, _id: &ConfigId) -> Result<Arc<ServiceSpec>, StoreError> {
        Err(StoreError::Unavailable { message: "backend offline".into(), context: None })
    }

    async fn list(&self) -> Result<Vec<ConfigId>, StoreError> {
        Err(StoreError::Unavailable { message: "backend offline".into(), context: None })
    }
}
