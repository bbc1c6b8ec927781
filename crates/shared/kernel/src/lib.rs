//! Deployment kernel: the pieces every deployment unit and host shares.
//!
//! A host builds a [`DeploymentContext`] from its adapters, collects
//! [`RegistrationUnit`]s into a [`UnitRegistry`] and hands both to a [`Runner`]:
//!
//! ```rust
//! use tnode_kernel::{DeploymentContext, RegistrationUnit, Runner, UnitRegistry};
//! use tnode_kernel::ports::{MemoryArtifacts, StaticAccounts};
//! # use tnode_kernel::ports::{ChainClient, ChainError, DeploymentReceipt, DeploymentRequest};
//! # use tnode_kernel::domain::Address;
//! # use std::sync::Arc;
//! # #[derive(Debug)]
//! # struct NoChain;
//! # #[async_trait::async_trait]
//! # impl ChainClient for NoChain {
//! #     async fn accounts(&self) -> Result<Vec<Address>, ChainError> { Ok(Vec::new()) }
//! #     async fn deploy(&self, _: DeploymentRequest) -> Result<DeploymentReceipt, ChainError> {
//! #         Err(ChainError::Transport { message: "offline".into(), context: None })
//! #     }
//! #     async fn has_code(&self, _: Address) -> Result<bool, ChainError> { Ok(false) }
//! # }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = DeploymentContext::builder()
//!     .chain(Arc::new(NoChain))
//!     .artifacts(Arc::new(MemoryArtifacts::new()))
//!     .accounts(Arc::new(StaticAccounts::empty()))
//!     .build()?;
//!
//! let registry = UnitRegistry::builder().build()?;
//! let runner = Runner::new(&registry, &ctx);
//! assert!(runner.plan(&[])?.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod ports;
pub mod registrar;
pub mod registry;
pub mod runner;
pub mod unit;

pub use context::{DeploymentContext, DeploymentContextBuilder};
pub use error::{DeployError, DeployErrorExt};
pub use registrar::{Registrar, bytecode_hash};
pub use registry::{RegistryError, UnitRegistry, UnitRegistryBuilder};
pub use runner::Runner;
pub use unit::{RegistrationUnit, UnitFn, UnitFuture};

pub use tnode_domain as domain;
pub use tnode_event_bus as events;
