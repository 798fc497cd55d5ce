//! File-backed snapshot engine.
//!
//! Layout: `<root>/<configuration-id>.json`, one pretty-printed [`ServiceSpec`]
//! per file. Identifiers are validated UUIDs, so a snapshot path can never leave
//! the root directory.

use crate::builder::FileConfigStoreBuilder;
use crate::error::{StoreError, StoreErrorExt};
use crate::ConfigStore;
use async_trait::async_trait;
use spechub_domain::constants::SNAPSHOT_EXTENSION;
use spechub_domain::id::ConfigId;
use spechub_domain::spec::ServiceSpec;
use std::io::ErrorKind;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// The internal shared state of a [`FileConfigStore`].
#[derive(Debug)]
pub struct FileStoreInner {
    /// The canonicalized snapshot directory.
    pub(crate) root: PathBuf,
    /// A unique counter used to generate temporary file names.
    pub(crate) tmp_counter: AtomicU64,
}

/// A thread-safe handle to a directory of specification snapshots.
///
/// The handle is internally reference-counted and can be cheaply cloned
/// across tasks.
///
/// # Example
///
/// ```rust
/// use spechub_store::{ConfigStore, FileConfigStore, StoreError};
/// use spechub_domain::spec::ServiceSpec;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), StoreError> {
///     # let tmp = tempfile::tempdir().unwrap();
///     # let root = tmp.path().join("configurations");
///     let store = FileConfigStore::builder().root(&root).create(true).connect().await?;
///
///     let id = store.store(&ServiceSpec::new("hello-world", [])).await?;
///     assert_eq!(store.fetch(&id).await?.name, "hello-world");
///     assert_eq!(store.list().await?, vec![id]);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    pub(crate) inner: Arc<FileStoreInner>,
}

impl Deref for FileConfigStore {
    type Target = FileStoreInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FileConfigStore {
    #[must_use = "The store is not opened until you call .connect()"]
    pub fn builder() -> FileConfigStoreBuilder {
        FileConfigStoreBuilder::new()
    }

    /// The canonical snapshot directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Physical location of the snapshot for `id`.
    #[must_use]
    pub fn snapshot_path(&self, id: &ConfigId) -> PathBuf {
        self.root.join(format!("{id}.{SNAPSHOT_EXTENSION}"))
    }

    /// Persists `spec` as a new immutable snapshot and returns its identifier.
    ///
    /// The snapshot is written to a unique temporary file, synced to disk and
    /// renamed into place, so readers never observe a partial snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] if `spec` cannot be encoded and
    /// [`StoreError::Io`] if the write, sync or rename fails.
    pub async fn store(&self, spec: &ServiceSpec) -> Result<ConfigId, StoreError> {
        let id = ConfigId::new_v4();
        let target = self.snapshot_path(&id);
        let temp = self
            .root
            .join(format!(".{id}.{}.tmp", self.tmp_counter.fetch_add(1, Ordering::Relaxed)));

        let payload = serde_json::to_vec_pretty(spec).context("Failed to encode snapshot")?;

        let written = async {
            let mut file = fs::OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&temp)
                .await
                .context(format!("Temp creation failed: {}", temp.display()))?;
            file.write_all(&payload).await.context("Write failed")?;
            file.sync_all().await.context("Hardware sync failed")?;
            drop(file);

            fs::rename(&temp, &target).await.context(format!(
                "Atomic swap failed: {} -> {}",
                temp.display(),
                target.display()
            ))
        }
        .await;

        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&temp).await
                && cleanup.kind() != ErrorKind::NotFound
            {
                warn!(path = %temp.display(), error = %cleanup, "Failed to remove temp snapshot");
            }
            return Err(e);
        }

        debug!(id = %id, path = %target.display(), "Snapshot stored");
        Ok(id)
    }

    /// Classifies a missing snapshot file: a vanished root means the store itself is gone.
    async fn missing(&self, id: &ConfigId) -> StoreError {
        match fs::try_exists(&self.root).await {
            Ok(true) => StoreError::NotFound { message: id.to_string().into(), context: None },
            Ok(false) => StoreError::Unavailable {
                message: format!("Snapshot root vanished: {}", self.root.display()).into(),
                context: None,
            },
            Err(source) => StoreError::Io {
                source,
                context: Some(format!("Failed to inspect snapshot root: {}", self.root.display()).into()),
            },
        }
    }
}

#[async_trait]
impl ConfigStore for FileConfigStore {
    async fn fetch(&self, id: &ConfigId) -> Result<Arc<ServiceSpec>, StoreError> {
        let path = self.snapshot_path(id);

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Err(self.missing(id).await),
            Err(err) => {
                return Err(StoreError::Io {
                    source: err,
                    context: Some(format!("Read failed: {}", path.display()).into()),
                });
            },
        };

        let spec: ServiceSpec = serde_json::from_slice(&bytes)
            .context(format!("Malformed snapshot: {}", path.display()))?;

        debug!(id = %id, pods = spec.pods.len(), "Snapshot fetched");
        Ok(Arc::new(spec))
    }

    async fn list(&self) -> Result<Vec<ConfigId>, StoreError> {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(StoreError::Unavailable {
                    message: format!("Snapshot root vanished: {}", self.root.display()).into(),
                    context: None,
                });
            },
            Err(err) => {
                return Err(StoreError::Io {
                    source: err,
                    context: Some(format!("Failed to list: {}", self.root.display()).into()),
                });
            },
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await.context("Failed to read entry")? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(SNAPSHOT_EXTENSION) {
                continue;
            }
            if let Some(id) =
                path.file_stem().and_then(|stem| stem.to_str()).and_then(|s| s.parse().ok())
            {
                ids.push(id);
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }
}
