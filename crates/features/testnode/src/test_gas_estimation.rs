//! Deploys `TestGasEstimation` from the `deployer` account, tagged `TestGasEstimation`.

use crate::deployer::deploy_from_deployer;
use tnode_kernel::{DeploymentContext, RegistrationUnit, UnitFuture};

pub const CONTRACT: &str = "TestGasEstimation";

#[must_use]
pub fn unit() -> RegistrationUnit {
    RegistrationUnit::new(CONTRACT, run).with_tags([CONTRACT])
}

fn run<'a>(ctx: &'a DeploymentContext, unit: &'a RegistrationUnit) -> UnitFuture<'a> {
    Box::pin(deploy_from_deployer(ctx, CONTRACT, unit.tags()))
}
