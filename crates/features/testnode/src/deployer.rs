use tnode_domain::DeploymentRecord;
use tnode_domain::constants::DEPLOYER;
use tnode_kernel::{DeployError, DeploymentContext};

/// Deploys `contract` from the `deployer` account under `tags`.
pub(crate) async fn deploy_from_deployer(
    ctx: &DeploymentContext,
    contract: &'static str,
    tags: &[String],
) -> Result<DeploymentRecord, DeployError> {
    ctx.registrar().register_from(contract, DEPLOYER, tags).await
}
