//! A development chain that lives in memory.
//!
//! It understands exactly one kind of transaction, contract creation, and models
//! just enough of a real node for deployments to be meaningful: funded accounts,
//! per-sender nonces, gas charged per byte of code and reverts for code that cannot
//! be deployed. Everything is derived with SHA-256, so two chains built with the
//! same parameters behave identically.
//!
//! ```rust
//! use tnode_devchain::DevChain;
//! use tnode_kernel::ports::{ChainClient, DeploymentRequest};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), tnode_kernel::ports::ChainError> {
//! let chain = DevChain::builder().accounts(2).build();
//! let from = chain.accounts()[0];
//!
//! let receipt = chain
//!     .deploy(DeploymentRequest {
//!         contract_name: "TestToken".into(),
//!         from,
//!         bytecode: vec![0x60, 0x80].into(),
//!     })
//!     .await?;
//!
//! assert!(chain.has_code(receipt.address).await?);
//! assert_eq!(chain.nonce(from), 1);
//! # Ok(())
//! # }
//! ```

mod chain;
mod derive;

pub use chain::{
    CREATE_BASE_GAS, CREATE_GAS_PER_BYTE, DevChain, DevChainBuilder, INVALID_OPCODE,
};
pub use derive::{account_address, contract_address};
