//! # Domain Models
//!
//! Pure deployment types with minimal dependencies (`serde`, `serde_json`, `hex`, `thiserror`).
//! Keep it lean: no I/O, networking, or heavy logic. Just data and simple helpers.

pub mod address;
pub mod artifact;
pub mod config;
pub mod constants;
pub mod deployment;
pub mod events;

pub use address::{Address, HexParseError, TxHash};
pub use artifact::{Artifact, Bytecode};
pub use deployment::{DeploymentRecord, DeploymentSpec, TagSet};
pub use events::DeploymentEvent;
