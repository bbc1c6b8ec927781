/// Named-account role every testnode unit deploys from.
pub const DEPLOYER: &str = "deployer";

/// Network name used when none is configured.
pub const DEFAULT_NETWORK: &str = "devchain";

/// Chain id of the local development chain.
pub const DEFAULT_CHAIN_ID: u64 = 31_337;

/// Starting balance of every development account (10 000 ether in wei).
pub const DEFAULT_ACCOUNT_BALANCE: u128 = 10_000 * 10u128.pow(18);

/// Number of development accounts generated by default.
pub const DEFAULT_ACCOUNT_COUNT: usize = 20;

/// Gas price charged by the development chain, in wei.
pub const DEFAULT_GAS_PRICE: u128 = 1_000_000_000;
