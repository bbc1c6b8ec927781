use crate::ports::chain::{ChainClient, ChainError};
use async_trait::async_trait;
use fxhash::FxHashMap;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::Arc;
use tnode_domain::Address;
use tnode_domain::config::AccountRef;
use tracing::debug;

/// Role → address bindings visible to deployment units.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedAccounts(FxHashMap<String, Address>);

impl NamedAccounts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, role: &str) -> Option<Address> {
        self.0.get(role).copied()
    }

    pub fn insert(&mut self, role: impl Into<String>, address: Address) -> Option<Address> {
        self.0.insert(role.into(), address)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Roles sorted by name.
    #[must_use]
    pub fn roles(&self) -> Vec<&str> {
        let mut roles: Vec<&str> = self.0.keys().map(String::as_str).collect();
        roles.sort_unstable();
        roles
    }
}

impl<S: Into<String>> FromIterator<(S, Address)> for NamedAccounts {
    fn from_iter<I: IntoIterator<Item = (S, Address)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(role, address)| (role.into(), address)).collect())
    }
}

/// Resolves named accounts for the current environment.
#[async_trait]
pub trait AccountSource: Debug + Send + Sync {
    async fn named_accounts(&self) -> Result<NamedAccounts, ChainError>;
}

/// Fixed bindings, independent of any chain.
#[derive(Debug, Clone, Default)]
pub struct StaticAccounts(NamedAccounts);

impl StaticAccounts {
    #[must_use]
    pub const fn new(accounts: NamedAccounts) -> Self {
        Self(accounts)
    }

    /// No roles at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountSource for StaticAccounts {
    async fn named_accounts(&self) -> Result<NamedAccounts, ChainError> {
        Ok(self.0.clone())
    }
}

/// Bindings from configuration, with indices resolved against the chain's account list.
///
/// An index past the end of the list leaves the role unbound rather than failing, so
/// only units that actually need the role report it as unavailable.
#[derive(Debug, Clone)]
pub struct ConfiguredAccounts {
    roles: BTreeMap<String, AccountRef>,
    chain: Arc<dyn ChainClient>,
}

impl ConfiguredAccounts {
    pub fn new(roles: BTreeMap<String, AccountRef>, chain: Arc<dyn ChainClient>) -> Self {
        Self { roles, chain }
    }
}

#[async_trait]
impl AccountSource for ConfiguredAccounts {
    async fn named_accounts(&self) -> Result<NamedAccounts, ChainError> {
        let needs_chain = self.roles.values().any(|r| matches!(r, AccountRef::Index(_)));
        let available = if needs_chain { self.chain.accounts().await? } else { Vec::new() };

        let mut resolved = NamedAccounts::new();
        for (role, reference) in &self.roles {
            let address = match *reference {
                AccountRef::Address(address) => Some(address),
                AccountRef::Index(index) => available.get(index).copied(),
            };
            match address {
                Some(address) => {
                    resolved.insert(role.clone(), address);
                },
                None => debug!(role, ?reference, "Named account left unbound"),
            }
        }

        Ok(resolved)
    }
}
