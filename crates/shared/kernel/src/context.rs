use crate::error::DeployError;
use crate::ports::{
    AccountSource, ArtifactSource, ChainClient, DeploymentStore, MemoryDeploymentStore,
    NamedAccounts,
};
use crate::registrar::Registrar;
use std::sync::Arc;
use tnode_domain::config::RedeployPolicy;
use tnode_domain::constants::DEFAULT_NETWORK;
use tnode_domain::{Address, DeploymentEvent, DeploymentRecord, DeploymentSpec};
use tnode_event_bus::EventBus;
use tracing::info;

/// Everything a deployment unit may touch, passed explicitly to each unit.
///
/// Cheap to share by reference; all adapters are behind `Arc`.
#[derive(Debug)]
pub struct DeploymentContext {
    network: String,
    artifacts: Arc<dyn ArtifactSource>,
    accounts: Arc<dyn AccountSource>,
    chain: Arc<dyn ChainClient>,
    store: Arc<dyn DeploymentStore>,
    events: EventBus<DeploymentEvent>,
    policy: RedeployPolicy,
}

impl DeploymentContext {
    #[must_use]
    pub fn builder() -> DeploymentContextBuilder {
        DeploymentContextBuilder::default()
    }

    #[must_use]
    pub fn network(&self) -> &str {
        &self.network
    }

    #[must_use]
    pub const fn policy(&self) -> RedeployPolicy {
        self.policy
    }

    #[must_use]
    pub fn artifacts(&self) -> &dyn ArtifactSource {
        self.artifacts.as_ref()
    }

    #[must_use]
    pub fn chain(&self) -> &dyn ChainClient {
        self.chain.as_ref()
    }

    #[must_use]
    pub fn store(&self) -> &dyn DeploymentStore {
        self.store.as_ref()
    }

    #[must_use]
    pub const fn events(&self) -> &EventBus<DeploymentEvent> {
        &self.events
    }

    /// Resolves every configured role.
    ///
    /// # Errors
    /// A failing account source is reported as [`DeployError::AccountUnavailable`].
    pub async fn named_accounts(&self) -> Result<NamedAccounts, DeployError> {
        self.accounts.named_accounts().await.map_err(|err| DeployError::AccountUnavailable {
            role: "*".to_owned(),
            context: Some(err.to_string().into()),
        })
    }

    /// Resolves a single role.
    ///
    /// # Errors
    /// [`DeployError::AccountUnavailable`] when the role is not bound.
    pub async fn named_account(&self, role: &str) -> Result<Address, DeployError> {
        let accounts = self.accounts.named_accounts().await.map_err(|err| {
            DeployError::AccountUnavailable {
                role: role.to_owned(),
                context: Some(err.to_string().into()),
            }
        })?;

        accounts
            .get(role)
            .ok_or_else(|| DeployError::AccountUnavailable { role: role.to_owned(), context: None })
    }

    #[must_use]
    pub const fn registrar(&self) -> Registrar<'_> {
        Registrar::new(self)
    }

    /// Shorthand for `registrar().register(spec, tags)`.
    pub async fn deploy<I, S>(
        &self,
        spec: &DeploymentSpec,
        tags: I,
    ) -> Result<DeploymentRecord, DeployError>
    where
        I: IntoIterator<Item = S> + Send,
        S: Into<String>,
    {
        self.registrar().register(spec, tags).await
    }

    pub async fn deployment(&self, contract_name: &str) -> Result<Option<DeploymentRecord>, DeployError> {
        Ok(self.store.get(contract_name).await?)
    }

    /// All stored records, sorted by contract name.
    pub async fn deployments(&self) -> Result<Vec<DeploymentRecord>, DeployError> {
        Ok(self.store.all().await?)
    }

    /// Destroys every record of this environment.
    pub async fn reset(&self) -> Result<usize, DeployError> {
        let removed = self.store.reset().await?;
        info!(network = %self.network, removed, "Deployments reset");
        Ok(removed)
    }
}

#[derive(Debug, Default)]
pub struct DeploymentContextBuilder {
    network: Option<String>,
    artifacts: Option<Arc<dyn ArtifactSource>>,
    accounts: Option<Arc<dyn AccountSource>>,
    chain: Option<Arc<dyn ChainClient>>,
    store: Option<Arc<dyn DeploymentStore>>,
    events: Option<EventBus<DeploymentEvent>>,
    policy: RedeployPolicy,
}

impl DeploymentContextBuilder {
    #[must_use]
    pub fn network(mut self, network: impl Into<String>) -> Self {
        self.network = Some(network.into());
        self
    }

    #[must_use]
    pub fn artifacts(mut self, artifacts: Arc<dyn ArtifactSource>) -> Self {
        self.artifacts = Some(artifacts);
        self
    }

    #[must_use]
    pub fn accounts(mut self, accounts: Arc<dyn AccountSource>) -> Self {
        self.accounts = Some(accounts);
        self
    }

    #[must_use]
    pub fn chain(mut self, chain: Arc<dyn ChainClient>) -> Self {
        self.chain = Some(chain);
        self
    }

    /// Defaults to a [`MemoryDeploymentStore`].
    #[must_use]
    pub fn store(mut self, store: Arc<dyn DeploymentStore>) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn events(mut self, events: EventBus<DeploymentEvent>) -> Self {
        self.events = Some(events);
        self
    }

    #[must_use]
    pub const fn policy(mut self, policy: RedeployPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Validates and builds the context.
    ///
    /// # Errors
    /// [`DeployError::InvalidContext`] if the chain, artifact or account source is missing.
    pub fn build(self) -> Result<DeploymentContext, DeployError> {
        let chain = self.chain.ok_or_else(|| missing("chain client"))?;
        let artifacts = self.artifacts.ok_or_else(|| missing("artifact source"))?;
        let accounts = self.accounts.ok_or_else(|| missing("account source"))?;

        Ok(DeploymentContext {
            network: self.network.unwrap_or_else(|| DEFAULT_NETWORK.to_owned()),
            artifacts,
            accounts,
            chain,
            store: self.store.unwrap_or_else(|| Arc::new(MemoryDeploymentStore::new())),
            events: self.events.unwrap_or_default(),
            policy: self.policy,
        })
    }
}

fn missing(what: &'static str) -> DeployError {
    DeployError::InvalidContext { message: what.into(), context: Some("missing".into()) }
}
