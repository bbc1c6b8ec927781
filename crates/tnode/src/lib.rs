//! Facade crate for the testnode deployment workspace.
//! Re-exports domain/kernel primitives and aggregates the registered deployment units.
//! Keep this crate thin: it should compose other crates, not implement deployment logic.
//!
//! ## Usage
//! - Build a [`kernel::DeploymentContext`] from your adapters.
//! - Call [`registry`] for the validated unit set and hand both to a [`kernel::Runner`].

pub use tnode_domain as domain;
pub use tnode_kernel as kernel;

use tnode_kernel::{RegistrationUnit, RegistryError, UnitRegistry};

/// Unit groups compiled into this build.
pub mod features {
    pub use tnode_testnode as testnode;
}

/// Every deployment unit known to this build.
#[must_use]
pub fn units() -> Vec<RegistrationUnit> {
    tnode_testnode::units()
}

/// Registry over [`units`].
///
/// # Errors
/// Returns an error if units collide or their dependencies do not resolve.
pub fn registry() -> Result<UnitRegistry, RegistryError> {
    UnitRegistry::builder().register_all(units()).build()
}
