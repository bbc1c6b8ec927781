use crate::builder::{CHAIN_ID_FILE, FileStoreBuilder};
use crate::error::{StorageError, StorageErrorExt};
use crate::maintenance::TMP_MARKER;
use crate::name::RecordName;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tnode_domain::DeploymentRecord;
use tnode_kernel::ports::{DeploymentStore, StoreError};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

#[derive(Debug)]
pub struct StoreInner {
    /// Canonical `<root>/<network>` directory.
    pub(crate) dir: PathBuf,
    pub(crate) network: String,
    pub(crate) chain_id: u64,
    pub(crate) tmp_counter: AtomicU64,
}

/// Deployment records on disk: `<root>/<network>/<ContractName>.json`.
///
/// Writes are atomic (unique temp file, `fsync`, rename), so a crash never leaves a
/// half-written record. The handle is cheap to clone.
///
/// ```rust
/// use tnode_storage::{FileDeploymentStore, StorageError};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), StorageError> {
///     # let tmp = tempfile::tempdir().unwrap();
///     let store = FileDeploymentStore::builder()
///         .root(tmp.path().join("deployments"))
///         .network("localhost")
///         .chain_id(1337)
///         .connect()
///         .await?;
///
///     assert!(store.dir().ends_with("localhost"));
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileDeploymentStore {
    pub(crate) inner: Arc<StoreInner>,
}

impl Deref for FileDeploymentStore {
    type Target = StoreInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FileDeploymentStore {
    #[must_use = "The store is not opened until you call .connect()"]
    pub fn builder() -> FileStoreBuilder {
        FileStoreBuilder::new()
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.inner.dir
    }

    #[must_use]
    pub fn network(&self) -> &str {
        &self.inner.network
    }

    #[must_use]
    pub fn chain_id(&self) -> u64 {
        self.inner.chain_id
    }

    /// Physical path of a contract's record.
    pub fn path_for(&self, contract_name: &str) -> Result<PathBuf, StorageError> {
        let name = RecordName::try_from(contract_name)?;
        Ok(self.dir.join(name.file_name()))
    }

    pub(crate) async fn check_chain_id(&self) -> Result<(), StorageError> {
        let marker = self.dir.join(CHAIN_ID_FILE);
        match fs::read_to_string(&marker).await {
            Ok(found) if found.trim() == self.chain_id.to_string() => Ok(()),
            Ok(found) => Err(StorageError::ChainMismatch {
                message: format!("expected {}, found {}", self.chain_id, found.trim()).into(),
                context: Some(self.dir.display().to_string().into()),
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                self.write_atomic(&marker, self.chain_id.to_string().as_bytes()).await
            },
            Err(err) => Err(StorageError::Io {
                source: err,
                context: Some(format!("Read failed: {}", marker.display()).into()),
            }),
        }
    }

    pub async fn read_record(&self, contract_name: &str) -> Result<Option<DeploymentRecord>, StorageError> {
        let path = self.path_for(contract_name)?;
        Self::read_path(&path).await
    }

    async fn read_path(path: &Path) -> Result<Option<DeploymentRecord>, StorageError> {
        let data = match fs::read(path).await {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(StorageError::Io {
                    source: err,
                    context: Some(format!("Read failed: {}", path.display()).into()),
                });
            },
        };

        let record = serde_json::from_slice(&data)
            .context(format!("Corrupted record: {}", path.display()))?;
        Ok(Some(record))
    }

    pub async fn write_record(&self, record: &DeploymentRecord) -> Result<(), StorageError> {
        let path = self.path_for(&record.contract_name)?;
        let data = serde_json::to_vec_pretty(record).context("Record encoding failed")?;
        self.write_atomic(&path, &data).await
    }

    /// Record files currently present, sorted by file name.
    async fn record_paths(&self) -> Result<Vec<PathBuf>, StorageError> {
        let mut entries = fs::read_dir(&self.dir)
            .await
            .context(format!("Failed to list: {}", self.dir.display()))?;

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await.context("Directory scan failed")? {
            let path = entry.path();
            let is_record = path.extension().is_some_and(|ext| ext == RecordName::EXTENSION)
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| !n.starts_with('.') && !n.contains(TMP_MARKER));
            if is_record && entry.file_type().await.is_ok_and(|t| t.is_file()) {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    async fn write_atomic(&self, target: &Path, data: &[u8]) -> Result<(), StorageError> {
        let temp = unique_tmp_path(target, &self.tmp_counter);

        {
            let mut file = fs::OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&temp)
                .await
                .context(format!("Temp creation failed: {}", temp.display()))?;
            file.write_all(data).await.context("Write failed")?;
            file.sync_all().await.context("Hardware sync failed")?;
        }

        if let Err(err) = fs::rename(&temp, target).await {
            if err.kind() == ErrorKind::AlreadyExists {
                fs::remove_file(target)
                    .await
                    .context(format!("Failed to replace existing file: {}", target.display()))?;
                fs::rename(&temp, target).await.context(format!(
                    "Atomic swap failed: {} -> {}",
                    temp.display(),
                    target.display()
                ))?;
            } else {
                let _ = fs::remove_file(&temp).await;
                return Err(StorageError::Io {
                    source: err,
                    context: Some(
                        format!("Atomic swap failed: {} -> {}", temp.display(), target.display())
                            .into(),
                    ),
                });
            }
        }

        Self::sync_dir(&self.dir).await;
        debug!(path = %target.display(), "Record saved atomically");
        Ok(())
    }

    async fn sync_dir(path: &Path) {
        match fs::File::open(path).await {
            Ok(dir) => {
                if let Err(err) = dir.sync_all().await {
                    tracing::warn!(path = %path.display(), error = %err, "Directory sync failed");
                }
            },
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "Directory open failed");
            },
        }
    }
}

#[async_trait]
impl DeploymentStore for FileDeploymentStore {
    async fn get(&self, contract_name: &str) -> Result<Option<DeploymentRecord>, StoreError> {
        Ok(self.read_record(contract_name).await?)
    }

    async fn put(&self, record: &DeploymentRecord) -> Result<(), StoreError> {
        Ok(self.write_record(record).await?)
    }

    async fn all(&self) -> Result<Vec<DeploymentRecord>, StoreError> {
        let mut records = Vec::new();
        for path in self.record_paths().await? {
            if let Some(record) = Self::read_path(&path).await? {
                records.push(record);
            }
        }
        records.sort_by(|a, b| a.contract_name.cmp(&b.contract_name));
        Ok(records)
    }

    async fn reset(&self) -> Result<usize, StoreError> {
        let paths = self.record_paths().await?;
        for path in &paths {
            fs::remove_file(path)
                .await
                .context(format!("Failed to delete: {}", path.display()))
                .map_err(StoreError::from)?;
        }
        debug!(network = %self.network, removed = paths.len(), "Records removed");
        Ok(paths.len())
    }
}

fn unique_tmp_path(target: &Path, counter: &AtomicU64) -> PathBuf {
    let counter = counter.fetch_add(1, Ordering::Relaxed);
    let file_name = target.file_name().and_then(|s| s.to_str()).unwrap_or("record");
    target.with_file_name(format!("{file_name}{TMP_MARKER}{counter}"))
}
