use async_trait::async_trait;
use std::borrow::Cow;
use std::fmt::Debug;
use tnode_domain::{Address, Bytecode, TxHash};

#[tnode_derive::tnode_error]
pub enum ChainError {
    /// The transaction was mined but failed, or was rejected before inclusion.
    #[error("Transaction reverted{}: {message}", format_context(.context))]
    Reverted { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The chain could not be reached or answered nonsense.
    #[error("Chain transport error{}: {message}", format_context(.context))]
    Transport { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// A contract-creation transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    pub contract_name: String,
    pub from: Address,
    pub bytecode: Bytecode,
}

/// Confirmation of a successful contract creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeploymentReceipt {
    pub address: Address,
    pub transaction_hash: TxHash,
    pub block_number: u64,
    pub gas_used: u64,
}

/// Submits transactions to a chain and answers the few queries deployment needs.
#[async_trait]
pub trait ChainClient: Debug + Send + Sync {
    /// Accounts the node can sign for, in index order.
    async fn accounts(&self) -> Result<Vec<Address>, ChainError>;

    /// Sends a creation transaction and waits for its receipt.
    async fn deploy(&self, request: DeploymentRequest) -> Result<DeploymentReceipt, ChainError>;

    /// Whether runtime code exists at `address`.
    async fn has_code(&self, address: Address) -> Result<bool, ChainError>;
}
