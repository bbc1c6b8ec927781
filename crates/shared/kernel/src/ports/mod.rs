//! Seams to the external collaborators: compiler output, accounts, chain and record storage.

pub mod accounts;
pub mod artifacts;
pub mod chain;
pub mod store;

pub use accounts::{AccountSource, ConfiguredAccounts, NamedAccounts, StaticAccounts};
pub use artifacts::{ArtifactSource, MemoryArtifacts};
pub use chain::{ChainClient, ChainError, ChainErrorExt, DeploymentReceipt, DeploymentRequest};
pub use store::{DeploymentStore, MemoryDeploymentStore, StoreError, StoreErrorExt};
