//! # Testnode deploy
//!
//! Wires configuration, artifacts, the development chain and a deployment store into a
//! [`DeploymentContext`] and runs the registered units against it.
//!
//! ## Example
//! ```no_run
//! use tnode_cli::App;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::builder().artifacts_dir("artifacts").build().await?;
//!     for record in app.deploy(&["TestToken"], false).await? {
//!         println!("{} {}", record.contract_name, record.address);
//!     }
//!     Ok(())
//! }
//! ```

mod export;

pub use export::{Export, ExportedContract};

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tnode::domain::DeploymentRecord;
use tnode::domain::config::{DeployConfig, RedeployPolicy};
use tnode::kernel::ports::{ArtifactSource, ConfiguredAccounts, DeploymentStore, MemoryDeploymentStore};
use tnode::kernel::{DeploymentContext, RegistrationUnit, Runner, UnitRegistry};
use tnode_artifacts::ArtifactDirectory;
use tnode_devchain::DevChain;
use tnode_storage::FileDeploymentStore;
use tracing::info;

const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;
const WEI_PER_GWEI: u128 = 1_000_000_000;

/// A fluent builder for the [`App`]; command-line flags override the loaded config.
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct AppBuilder {
    cfg: DeployConfig,
}

impl AppBuilder {
    pub fn config(mut self, cfg: DeployConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn network(mut self, name: impl Into<String>) -> Self {
        self.cfg.network.name = name.into();
        self
    }

    pub fn artifacts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cfg.artifacts.dir = dir.into();
        self
    }

    pub fn deployments_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cfg.deployments.dir = Some(dir.into());
        self
    }

    pub fn policy(mut self, policy: RedeployPolicy) -> Self {
        self.cfg.deployments.policy = policy;
        self
    }

    fn init_chain(&self) -> DevChain {
        let dev = &self.cfg.devchain;
        DevChain::builder()
            .chain_id(self.cfg.network.chain_id)
            .accounts(dev.accounts)
            .balance(u128::from(dev.balance_ether) * WEI_PER_ETHER)
            .gas_price(u128::from(dev.gas_price_gwei) * WEI_PER_GWEI)
            .build()
    }

    async fn init_store(&self) -> Result<Arc<dyn DeploymentStore>> {
        let Some(dir) = &self.cfg.deployments.dir else {
            return Ok(Arc::new(MemoryDeploymentStore::new()));
        };

        let store = FileDeploymentStore::builder()
            .root(dir)
            .network(self.cfg.network.name.clone())
            .chain_id(self.cfg.network.chain_id)
            .connect()
            .await
            .with_context(|| format!("Failed to open deployments at {}", dir.display()))?;
        Ok(Arc::new(store))
    }

    /// Loads artifacts, opens the store and validates the unit registry.
    ///
    /// # Errors
    /// Returns an error if the artifact directory cannot be read, the deployment store
    /// cannot be opened or the registered units are inconsistent.
    pub async fn build(self) -> Result<App> {
        let artifacts = ArtifactDirectory::load(&self.cfg.artifacts.dir).with_context(|| {
            format!("Failed to load artifacts from {}", self.cfg.artifacts.dir.display())
        })?;
        let chain = Arc::new(self.init_chain());
        let store = self.init_store().await?;
        let accounts = ConfiguredAccounts::new(self.cfg.accounts.named.clone(), chain.clone());

        let ctx = DeploymentContext::builder()
            .network(self.cfg.network.name.clone())
            .chain(chain)
            .artifacts(Arc::new(artifacts))
            .accounts(Arc::new(accounts))
            .store(store)
            .policy(self.cfg.deployments.policy)
            .build()?;

        let registry = tnode::registry().context("Unit registry is inconsistent")?;

        info!(
            network = %self.cfg.network.name,
            chain_id = self.cfg.network.chain_id,
            units = registry.len(),
            "Deployment app ready"
        );

        Ok(App { cfg: self.cfg, ctx, registry })
    }
}

/// A ready-to-run deployment environment.
#[derive(Debug)]
pub struct App {
    cfg: DeployConfig,
    ctx: DeploymentContext,
    registry: UnitRegistry,
}

impl App {
    pub fn builder() -> AppBuilder {
        AppBuilder::default()
    }

    #[must_use]
    pub const fn context(&self) -> &DeploymentContext {
        &self.ctx
    }

    #[must_use]
    pub fn units(&self) -> &[RegistrationUnit] {
        self.registry.units()
    }

    /// Units `deploy` would run for `tags`, in order.
    pub fn plan(&self, tags: &[&str]) -> Result<Vec<&RegistrationUnit>> {
        Ok(self.registry.plan(tags)?)
    }

    /// Runs the plan for `tags`, optionally wiping existing records first.
    pub async fn deploy(&self, tags: &[&str], reset: bool) -> Result<Vec<DeploymentRecord>> {
        if reset {
            self.ctx.reset().await?;
        }
        Ok(Runner::new(&self.registry, &self.ctx).run(tags).await?)
    }

    /// Stored deployments with their ABIs.
    pub async fn export(&self) -> Result<Export> {
        let contracts = self
            .ctx
            .deployments()
            .await?
            .into_iter()
            .map(|record| {
                let abi = self
                    .ctx
                    .artifacts()
                    .artifact(&record.contract_name)
                    .map(|artifact| artifact.abi.clone())
                    .unwrap_or_default();
                let contract = ExportedContract {
                    address: record.address,
                    deployer: record.deployer,
                    tags: record.tags,
                    block_number: record.block_number,
                    abi,
                };
                (record.contract_name, contract)
            })
            .collect();

        Ok(Export { name: self.cfg.network.name.clone(), chain_id: self.cfg.network.chain_id, contracts })
    }
}
