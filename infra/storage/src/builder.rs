use crate::engine::{FileDeploymentStore, StoreInner};
use crate::error::{StorageError, StorageErrorExt};
use crate::maintenance;
use crate::name::NetworkName;
use private::Sealed;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use tnode_domain::constants::{DEFAULT_CHAIN_ID, DEFAULT_NETWORK};
use tokio::fs;
use tracing::info;

/// Marker file recording which chain a network directory belongs to.
pub const CHAIN_ID_FILE: &str = ".chainId";

#[derive(Debug, Clone)]
struct StoreConfig {
    network: String,
    chain_id: u64,
    create: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { network: DEFAULT_NETWORK.to_owned(), chain_id: DEFAULT_CHAIN_ID, create: true }
    }
}

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
#[derive(Debug, Default)]
pub struct FileStoreBuilder<S: Sealed = NoRoot> {
    state: S,
    config: StoreConfig,
}

#[allow(private_bounds)]
impl<S: Sealed> FileStoreBuilder<S> {
    /// Network directory under the root; validated like a contract name.
    #[must_use]
    pub fn network(mut self, network: impl Into<String>) -> Self {
        self.config.network = network.into();
        self
    }

    #[must_use]
    pub const fn chain_id(mut self, chain_id: u64) -> Self {
        self.config.chain_id = chain_id;
        self
    }

    #[must_use = "Sets whether missing directories are created"]
    pub const fn create(mut self, enable: bool) -> Self {
        self.config.create = enable;
        self
    }

    fn transition<N: Sealed>(self, state: N) -> FileStoreBuilder<N> {
        FileStoreBuilder { state, config: self.config }
    }
}

impl FileStoreBuilder<NoRoot> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "Sets the deployments root directory"]
    pub fn root(self, path: impl Into<PathBuf>) -> FileStoreBuilder<WithRoot> {
        self.transition(WithRoot(path.into()))
    }
}

impl FileStoreBuilder<WithRoot> {
    /// Opens `<root>/<network>/`.
    ///
    /// 1. Creates the directory when `create(true)` (the default).
    /// 2. Checks the `.chainId` marker, writing it on first use.
    /// 3. Removes stale temp files from interrupted writes.
    ///
    /// # Errors
    /// - [`StorageError::InvalidName`] for a network name outside `[A-Za-z0-9_-]`.
    /// - [`StorageError::ChainMismatch`] when the directory belongs to another chain.
    /// - [`StorageError::Io`] when the directory cannot be created or resolved.
    pub async fn connect(self) -> Result<FileDeploymentStore, StorageError> {
        let network = NetworkName::try_from(self.config.network.as_str())?;
        let dir = self.state.0.join(network.as_ref());

        if self.config.create {
            fs::create_dir_all(&dir)
                .await
                .context(format!("Failed to bootstrap deployments dir: {}", dir.display()))?;
        }

        let dir = fs::canonicalize(&dir)
            .await
            .context(format!("Failed to resolve deployments dir: {}", dir.display()))?;

        let store = FileDeploymentStore {
            inner: Arc::new(StoreInner {
                dir,
                network: network.to_string(),
                chain_id: self.config.chain_id,
                tmp_counter: AtomicU64::new(1),
            }),
        };

        store.check_chain_id().await?;
        maintenance::purge_tmp(store.dir()).await;

        info!(network = %network, path = %store.dir().display(), "Deployment store opened");
        Ok(store)
    }
}
