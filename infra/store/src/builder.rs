use crate::error::{StoreError, StoreErrorExt};
use crate::file::{FileConfigStore, FileStoreInner};
use crate::maintenance;
use private::Sealed;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use tokio::fs;
use tracing::info;

#[derive(Debug, Default)]
pub struct NoRoot;
#[derive(Debug)]
pub struct WithRoot(PathBuf);

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoRoot {}
impl Sealed for WithRoot {}

#[allow(private_bounds)]
#[derive(Debug)]
pub struct FileConfigStoreBuilder<S: Sealed = NoRoot> {
    state: S,
    create: bool,
}

impl Default for FileConfigStoreBuilder<NoRoot> {
    fn default() -> Self {
        Self { state: NoRoot, create: true }
    }
}

#[allow(private_bounds)]
impl<S: Sealed> FileConfigStoreBuilder<S> {
    #[must_use = "Sets whether the snapshot directory should be created if it does not exist"]
    pub const fn create(mut self, enable: bool) -> Self {
        self.create = enable;
        self
    }
}

impl FileConfigStoreBuilder<NoRoot> {
    #[must_use = "Creates a new store builder with default configuration"]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "Sets the snapshot directory of the store"]
    pub fn root(self, path: impl Into<PathBuf>) -> FileConfigStoreBuilder<WithRoot> {
        FileConfigStoreBuilder { state: WithRoot(path.into()), create: self.create }
    }
}

impl FileConfigStoreBuilder<WithRoot> {
    /// Consumes the configuration and opens the store.
    ///
    /// 1. Creates the snapshot directory when `create(true)` was set.
    /// 2. Resolves the directory to its canonical physical path.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the directory does not exist and
    /// `create` is false, and [`StoreError::Io`] if it cannot be created or resolved.
    pub async fn connect(self) -> Result<FileConfigStore, StoreError> {
        let root = &self.state.0;

        if self.create {
            fs::create_dir_all(root)
                .await
                .context(format!("Failed to bootstrap snapshot root: {}", root.display()))?;
        } else if !fs::try_exists(root)
            .await
            .context(format!("Failed to inspect snapshot root: {}", root.display()))?
        {
            return Err(StoreError::Unavailable {
                message: format!("Snapshot root does not exist: {}", root.display()).into(),
                context: None,
            });
        }

        let canonical = fs::canonicalize(root)
            .await
            .context(format!("Failed to resolve snapshot root: {}", root.display()))?;

        maintenance::purge_stale_tmp(&canonical).await;
        info!(path = %canonical.display(), "Opened configuration store");

        Ok(FileConfigStore {
            inner: Arc::new(FileStoreInner { root: canonical, tmp_counter: AtomicU64::new(1) }),
        })
    }
}
