use crate::context::DeploymentContext;
use crate::error::DeployError;
use crate::ports::{ChainError, DeploymentRequest};
use sha2::{Digest, Sha256};
use tnode_domain::config::RedeployPolicy;
use tnode_domain::{DeploymentEvent, DeploymentRecord, DeploymentSpec, TagSet};
use tracing::{debug, info, warn};

/// Hex SHA-256 of creation bytecode; how records remember what they were built from.
#[must_use]
pub fn bytecode_hash(code: &[u8]) -> String {
    hex::encode(Sha256::digest(code).as_slice())
}

/// Performs or reuses deployments and records them under their tags.
#[derive(Debug, Clone, Copy)]
pub struct Registrar<'a> {
    ctx: &'a DeploymentContext,
}

impl<'a> Registrar<'a> {
    #[must_use]
    pub const fn new(ctx: &'a DeploymentContext) -> Self {
        Self { ctx }
    }

    /// Deploys `spec` (or keeps its existing deployment) and tags the resulting record.
    ///
    /// At most one transaction is submitted. Nothing is retried; every failure is
    /// published as [`DeploymentEvent::Failed`] and returned.
    ///
    /// # Errors
    /// - [`DeployError::ArtifactNotFound`] when no artifact carries the contract name.
    /// - [`DeployError::DeploymentReverted`] when the chain rejects the creation.
    /// - [`DeployError::AlreadyDeployed`] under [`RedeployPolicy::Reject`].
    /// - Store and chain transport failures.
    pub async fn register<I, S>(
        &self,
        spec: &DeploymentSpec,
        tags: I,
    ) -> Result<DeploymentRecord, DeployError>
    where
        I: IntoIterator<Item = S> + Send,
        S: Into<String>,
    {
        let tags: TagSet = tags.into_iter().map(Into::into).collect();

        self.register_tagged(spec, tags).await.map_err(|err| self.failed(spec.contract_name(), err))
    }

    /// Resolves `role` and deploys `contract_name` from it.
    ///
    /// An unbound role fails before anything is submitted and is published as
    /// [`DeploymentEvent::Failed`] like any other registration failure.
    ///
    /// # Errors
    /// [`DeployError::AccountUnavailable`] when `role` does not resolve, otherwise as
    /// [`Registrar::register`].
    pub async fn register_from<I, S>(
        &self,
        contract_name: &str,
        role: &str,
        tags: I,
    ) -> Result<DeploymentRecord, DeployError>
    where
        I: IntoIterator<Item = S> + Send,
        S: Into<String>,
    {
        let deployer = match self.ctx.named_account(role).await {
            Ok(address) => address,
            Err(err) => return Err(self.failed(contract_name, err)),
        };
        debug!(contract = contract_name, role, %deployer, "Deploying from named account");

        self.register(&DeploymentSpec::new(contract_name, deployer), tags).await
    }

    fn failed(&self, contract_name: &str, err: DeployError) -> DeployError {
        warn!(contract = contract_name, error = %err, "Registration failed");
        self.ctx.events().publish(DeploymentEvent::Failed {
            contract_name: contract_name.to_owned(),
            reason: err.to_string(),
        });
        err
    }

    async fn register_tagged(
        &self,
        spec: &DeploymentSpec,
        tags: TagSet,
    ) -> Result<DeploymentRecord, DeployError> {
        let name = spec.contract_name();
        let artifact = self
            .ctx
            .artifacts()
            .artifact(name)
            .ok_or_else(|| DeployError::ArtifactNotFound { contract_name: name.to_owned(), context: None })?;
        let code_hash = bytecode_hash(&artifact.bytecode);

        let mut tags = tags;
        if let Some(mut existing) = self.ctx.store().get(name).await? {
            let policy = self.ctx.policy();
            let reusable = policy == RedeployPolicy::Reuse
                && self.is_reusable(&existing, spec, &code_hash).await?;

            match policy {
                RedeployPolicy::Reject => {
                    return Err(DeployError::AlreadyDeployed {
                        contract_name: name.to_owned(),
                        address: existing.address,
                        context: Some(self.ctx.network().to_owned().into()),
                    });
                },
                RedeployPolicy::Reuse if reusable => {
                    if existing.merge_tags(tags) {
                        self.ctx.store().put(&existing).await?;
                    }
                    debug!(contract = name, address = %existing.address, "Reusing deployment");
                    self.ctx.events().publish(DeploymentEvent::Reused(existing.clone()));
                    return Ok(existing);
                },
                RedeployPolicy::Reuse | RedeployPolicy::Always => {
                    tags.append(&mut existing.tags);
                },
            }
        }

        self.ctx.events().publish(DeploymentEvent::Submitted {
            contract_name: name.to_owned(),
            deployer: spec.deployer(),
        });

        let request = DeploymentRequest {
            contract_name: name.to_owned(),
            from: spec.deployer(),
            bytecode: artifact.bytecode.clone(),
        };
        let receipt = self.ctx.chain().deploy(request).await.map_err(|err| match err {
            ChainError::Reverted { message, .. } => {
                DeployError::DeploymentReverted { contract_name: name.to_owned(), reason: message, context: None }
            },
            other => DeployError::Chain { source: other, context: Some(name.to_owned().into()) },
        })?;

        let record = DeploymentRecord {
            contract_name: name.to_owned(),
            address: receipt.address,
            deployer: spec.deployer(),
            tags,
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            bytecode_hash: code_hash,
        };
        self.ctx.store().put(&record).await?;

        info!(
            contract = name,
            address = %record.address,
            block = record.block_number,
            gas_used = receipt.gas_used,
            "Contract deployed"
        );
        self.ctx.events().publish(DeploymentEvent::Deployed(record.clone()));

        Ok(record)
    }

    async fn is_reusable(
        &self,
        existing: &DeploymentRecord,
        spec: &DeploymentSpec,
        code_hash: &str,
    ) -> Result<bool, DeployError> {
        if existing.deployer != spec.deployer() {
            debug!(contract = spec.contract_name(), "Deployer changed");
            return Ok(false);
        }
        if existing.bytecode_hash != code_hash {
            debug!(contract = spec.contract_name(), "Bytecode changed");
            return Ok(false);
        }
        Ok(self.ctx.chain().has_code(existing.address).await?)
    }
}
