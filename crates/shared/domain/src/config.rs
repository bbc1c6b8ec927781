use crate::address::Address;
use crate::constants::{DEFAULT_ACCOUNT_COUNT, DEFAULT_CHAIN_ID, DEFAULT_NETWORK, DEPLOYER};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level deployment configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeployConfigInner {
    pub network: NetworkConfig,
    pub accounts: AccountsConfig,
    pub artifacts: ArtifactsConfig,
    pub deployments: DeploymentsConfig,
    pub devchain: DevChainConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct DeployConfig {
    #[serde(flatten, default)]
    inner: Arc<DeployConfigInner>,
}

impl Deref for DeployConfig {
    type Target = DeployConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for DeployConfig {
    fn deref_mut(&mut self) -> &mut DeployConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Target network identity.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub name: String,
    pub chain_id: u64,
}

/// Role → account mapping (`deployer = 0` picks the first chain account).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AccountsConfig {
    pub named: BTreeMap<String, AccountRef>,
}

/// Where compiled artifacts are read from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    pub dir: PathBuf,
}

/// Where deployment records live and how existing ones are treated.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeploymentsConfig {
    /// Records are kept in memory when unset.
    pub dir: Option<PathBuf>,
    pub policy: RedeployPolicy,
}

/// Parameters of the in-memory development chain.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DevChainConfig {
    pub accounts: usize,
    pub balance_ether: u64,
    pub gas_price_gwei: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
    pub dir: Option<PathBuf>,
}

/// What registering an already-recorded contract does.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedeployPolicy {
    /// Keep the record when deployer and bytecode are unchanged and code is still on chain.
    #[default]
    Reuse,
    /// Always submit and replace the record.
    Always,
    /// Treat an existing record as an error.
    Reject,
}

/// How a named role is bound to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRef {
    /// Position in the chain's account list.
    Index(usize),
    /// A literal address.
    Address(Address),
}

impl<'de> Deserialize<'de> for AccountRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AccountRefVisitor;

        impl Visitor<'_> for AccountRefVisitor {
            type Value = AccountRef;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an account index or a 0x-prefixed address")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<AccountRef, E> {
                usize::try_from(v).map(AccountRef::Index).map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<AccountRef, E> {
                usize::try_from(v).map(AccountRef::Index).map_err(E::custom)
            }

            // Environment overrides arrive as strings, so indices may be textual too.
            fn visit_str<E: de::Error>(self, v: &str) -> Result<AccountRef, E> {
                if let Ok(index) = v.trim().parse::<usize>() {
                    return Ok(AccountRef::Index(index));
                }
                v.parse::<Address>().map(AccountRef::Address).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(AccountRefVisitor)
    }
}

// --- Default ---

impl Default for NetworkConfig {
    fn default() -> Self {
        Self { name: DEFAULT_NETWORK.to_owned(), chain_id: DEFAULT_CHAIN_ID }
    }
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self { named: BTreeMap::from([(DEPLOYER.to_owned(), AccountRef::Index(0))]) }
    }
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self { dir: PathBuf::from("artifacts") }
    }
}

impl Default for DevChainConfig {
    fn default() -> Self {
        Self { accounts: DEFAULT_ACCOUNT_COUNT, balance_ether: 10_000, gas_price_gwei: 1 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), json: false, dir: None }
    }
}
