//! Compiled contract artifacts.
//!
//! Reads the JSON files a Solidity build leaves behind (`contractName`, `abi`,
//! `bytecode` as `0x` hex) and serves them through
//! [`ArtifactSource`](tnode_kernel::ports::ArtifactSource).
//!
//! ```rust
//! use tnode_artifacts::{ArtifactDirectory, ArtifactError};
//! use tnode_kernel::ports::ArtifactSource;
//!
//! # fn main() -> Result<(), ArtifactError> {
//! # let tmp = tempfile::tempdir().unwrap();
//! # std::fs::write(
//! #     tmp.path().join("TestToken.json"),
//! #     r#"{"contractName":"TestToken","abi":[],"bytecode":"0x6080"}"#,
//! # ).unwrap();
//! let artifacts = ArtifactDirectory::load(tmp.path())?;
//! assert_eq!(artifacts.contract_names(), ["TestToken"]);
//! # Ok(())
//! # }
//! ```

mod error;
mod loader;

pub use error::{ArtifactError, ArtifactErrorExt};
pub use loader::ArtifactDirectory;
