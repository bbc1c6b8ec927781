use crate::ports::{ChainError, StoreError};
use crate::registry::RegistryError;
use std::borrow::Cow;
use tnode_domain::Address;

#[tnode_derive::tnode_error]
pub enum DeployError {
    #[error("No artifact for contract '{contract_name}'{}", format_context(.context))]
    ArtifactNotFound { contract_name: String, context: Option<Cow<'static, str>> },

    #[error("Named account '{role}' is unavailable{}", format_context(.context))]
    AccountUnavailable { role: String, context: Option<Cow<'static, str>> },

    #[error("Deployment of '{contract_name}' reverted{}: {reason}", format_context(.context))]
    DeploymentReverted {
        contract_name: String,
        reason: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    #[error("'{contract_name}' is already deployed at {address}{}", format_context(.context))]
    AlreadyDeployed { contract_name: String, address: Address, context: Option<Cow<'static, str>> },

    #[error("Invalid deployment context{}: {message}", format_context(.context))]
    InvalidContext { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Chain error{}: {source}", format_context(.context))]
    Chain { source: ChainError, context: Option<Cow<'static, str>> },

    #[error("Deployment store error{}: {source}", format_context(.context))]
    Store { source: StoreError, context: Option<Cow<'static, str>> },

    #[error("Unit registry error{}: {source}", format_context(.context))]
    Registry { source: RegistryError, context: Option<Cow<'static, str>> },

    #[error("Internal deployment error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl DeployError {
    /// Name of the contract the error concerns, when there is one.
    #[must_use]
    pub fn contract_name(&self) -> Option<&str> {
        match self {
            Self::ArtifactNotFound { contract_name, .. }
            | Self::DeploymentReverted { contract_name, .. }
            | Self::AlreadyDeployed { contract_name, .. } => Some(contract_name),
            _ => None,
        }
    }
}
