//! File-backed deployment records.
//!
//! One pretty-printed JSON document per contract under `<root>/<network>/`, next to a
//! `.chainId` marker naming the chain the directory belongs to:
//!
//! ```text
//! deployments/
//! └── localhost/
//!     ├── .chainId
//!     ├── TestHelpers.json
//!     └── TestToken.json
//! ```
//!
//! - **Atomic writes**: unique temp file, `fsync`, rename.
//! - **Safe names**: contract and network names are limited to `[A-Za-z0-9_]`.
//! - **Self-healing**: stale temp files are removed when the store opens.

mod builder;
mod engine;
mod error;
mod maintenance;
mod name;

pub use builder::{CHAIN_ID_FILE, FileStoreBuilder, NoRoot, WithRoot};
pub use engine::{FileDeploymentStore, StoreInner};
pub use error::{StorageError, StorageErrorExt};
pub use name::{NetworkName, RecordName};
