//! Versioned service specification store.
//!
//! Every snapshot of a service specification is immutable and addressed by a
//! [`ConfigId`]. Readers depend only on the [`ConfigStore`] trait, which exposes
//! fetch-by-identifier and enumeration. Two engines are provided:
//!
//! 1.  **[`FileConfigStore`]**: one `<configuration-id>.json` file per snapshot in a
//!     root directory, written atomically and read through `tokio::fs`.
//! 2.  **[`MemoryConfigStore`]**: an in-process map, handy for tests and embedding.
//!
//! # Examples
//!
//! ```rust
//! use spechub_store::{ConfigStore, MemoryConfigStore, StoreError};
//! use spechub_domain::spec::ServiceSpec;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), StoreError> {
//!     let store = MemoryConfigStore::new();
//!     let id = store.store(ServiceSpec::new("hello-world", []));
//!
//!     let spec = store.fetch(&id).await?;
//!     assert_eq!(spec.name, "hello-world");
//!     Ok(())
//! }
//! ```

mod builder;
mod error;
mod file;
mod maintenance;
mod memory;

pub use builder::FileConfigStoreBuilder;
pub use error::{StoreError, StoreErrorExt};
pub use file::FileConfigStore;
pub use memory::MemoryConfigStore;

use async_trait::async_trait;
use spechub_domain::id::ConfigId;
use spechub_domain::spec::ServiceSpec;
use std::fmt::Debug;
use std::sync::Arc;

/// Read access to immutable service specification snapshots.
#[async_trait]
pub trait ConfigStore: Debug + Send + Sync {
    /// Fetches the snapshot stored under `id`.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] when no snapshot exists for `id`, and any
    /// other variant when the store itself could not answer.
    async fn fetch(&self, id: &ConfigId) -> Result<Arc<ServiceSpec>, StoreError>;

    /// Lists the identifiers of all stored snapshots in ascending order.
    ///
    /// # Errors
    /// Returns an error when the store cannot be enumerated.
    async fn list(&self) -> Result<Vec<ConfigId>, StoreError>;
}

