//! Deployment units for the contracts the testnode suite exercises.
//!
//! Every unit deploys one contract from the `deployer` named account and is tagged
//! with the contract name, so `--tags TestEnums` deploys just that contract.

mod deployer;
pub mod test_custom_errors;
pub mod test_enums;
pub mod test_gas_estimation;
pub mod test_helpers;
pub mod test_returns;
pub mod test_token;

use tnode_kernel::RegistrationUnit;

/// Contracts deployed by [`units`], sorted.
pub const CONTRACTS: [&str; 6] = [
    test_custom_errors::CONTRACT,
    test_enums::CONTRACT,
    test_gas_estimation::CONTRACT,
    test_helpers::CONTRACT,
    test_returns::CONTRACT,
    test_token::CONTRACT,
];

/// All testnode units, ready for a [`UnitRegistry`](tnode_kernel::UnitRegistry).
#[must_use]
pub fn units() -> Vec<RegistrationUnit> {
    vec![
        test_custom_errors::unit(),
        test_enums::unit(),
        test_gas_estimation::unit(),
        test_helpers::unit(),
        test_returns::unit(),
        test_token::unit(),
    ]
}
