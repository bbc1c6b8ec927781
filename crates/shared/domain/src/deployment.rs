use crate::address::{Address, TxHash};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Ordered, de-duplicated set of unit tags.
pub type TagSet = BTreeSet<String>;

/// What to deploy and from which account. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentSpec {
    contract_name: String,
    deployer: Address,
}

impl DeploymentSpec {
    pub fn new(contract_name: impl Into<String>, deployer: Address) -> Self {
        Self { contract_name: contract_name.into(), deployer }
    }

    #[must_use]
    pub fn contract_name(&self) -> &str {
        &self.contract_name
    }

    #[must_use]
    pub const fn deployer(&self) -> Address {
        self.deployer
    }
}

/// A contract that has been deployed in the current environment.
///
/// At most one record exists per `contract_name`; only `tags` grows after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    pub contract_name: String,
    pub address: Address,
    pub deployer: Address,
    #[serde(default)]
    pub tags: TagSet,
    pub transaction_hash: TxHash,
    pub block_number: u64,
    /// Hex SHA-256 of the creation bytecode the record was deployed from.
    pub bytecode_hash: String,
}

impl DeploymentRecord {
    /// Adds tags, returning `true` when the set changed.
    pub fn merge_tags<I, S>(&mut self, tags: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let before = self.tags.len();
        self.tags.extend(tags.into_iter().map(Into::into));
        self.tags.len() != before
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}
