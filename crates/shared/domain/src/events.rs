use crate::address::Address;
use crate::deployment::DeploymentRecord;

/// Lifecycle notifications emitted while deployment units run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentEvent {
    /// A creation transaction is about to be sent.
    Submitted { contract_name: String, deployer: Address },
    /// A fresh deployment was confirmed and recorded.
    Deployed(DeploymentRecord),
    /// An existing record was kept; no transaction was sent.
    Reused(DeploymentRecord),
    /// Registration failed; the runner aborts after this.
    Failed { contract_name: String, reason: String },
}

impl DeploymentEvent {
    #[must_use]
    pub fn contract_name(&self) -> &str {
        match self {
            Self::Submitted { contract_name, .. } | Self::Failed { contract_name, .. } => {
                contract_name
            },
            Self::Deployed(record) | Self::Reused(record) => &record.contract_name,
        }
    }
}
