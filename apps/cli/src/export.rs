use serde::Serialize;
use std::collections::BTreeMap;
use tnode::domain::{Address, TagSet};

/// Deployment summary in the shape front-ends and test runners consume.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Export {
    pub name: String,
    pub chain_id: u64,
    pub contracts: BTreeMap<String, ExportedContract>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedContract {
    pub address: Address,
    pub deployer: Address,
    pub tags: TagSet,
    pub block_number: u64,
    /// Empty when the artifact is no longer available.
    pub abi: serde_json::Value,
}
