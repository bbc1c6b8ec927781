use async_trait::async_trait;
use parking_lot::RwLock;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::Debug;
use tnode_domain::DeploymentRecord;

#[tnode_derive::tnode_error]
pub enum StoreError {
    #[error("Store I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Store codec error{}: {source}", format_context(.context))]
    Codec { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// Contract names become file names, so only `[A-Za-z0-9_]` is accepted.
    #[error("Invalid contract name{}: {message}", format_context(.context))]
    InvalidName { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Store fault{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Persistence for deployment records, keyed by contract name.
#[async_trait]
pub trait DeploymentStore: Debug + Send + Sync {
    async fn get(&self, contract_name: &str) -> Result<Option<DeploymentRecord>, StoreError>;

    /// Inserts or replaces the record for its contract name.
    async fn put(&self, record: &DeploymentRecord) -> Result<(), StoreError>;

    /// Every record, sorted by contract name.
    async fn all(&self) -> Result<Vec<DeploymentRecord>, StoreError>;

    /// Destroys every record, returning how many were removed.
    async fn reset(&self) -> Result<usize, StoreError>;
}

/// Records that live as long as the process.
#[derive(Debug, Default)]
pub struct MemoryDeploymentStore {
    records: RwLock<BTreeMap<String, DeploymentRecord>>,
}

impl MemoryDeploymentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DeploymentStore for MemoryDeploymentStore {
    async fn get(&self, contract_name: &str) -> Result<Option<DeploymentRecord>, StoreError> {
        Ok(self.records.read().get(contract_name).cloned())
    }

    async fn put(&self, record: &DeploymentRecord) -> Result<(), StoreError> {
        self.records.write().insert(record.contract_name.clone(), record.clone());
        Ok(())
    }

    async fn all(&self) -> Result<Vec<DeploymentRecord>, StoreError> {
        Ok(self.records.read().values().cloned().collect())
    }

    async fn reset(&self) -> Result<usize, StoreError> {
        let mut records = self.records.write();
        let count = records.len();
        records.clear();
        Ok(count)
    }
}
