//! Deploys `TestReturns` from the `deployer` account, tagged `TestReturns`.

use crate::deployer::deploy_from_deployer;
use tnode_kernel::{DeploymentContext, RegistrationUnit, UnitFuture};

pub const CONTRACT: &str = "TestReturns";

#[must_use]
pub fn unit() -> RegistrationUnit {
    RegistrationUnit::new(CONTRACT, run).with_tags([CONTRACT])
}

fn run<'a>(ctx: &'a DeploymentContext, unit: &'a RegistrationUnit) -> UnitFuture<'a> {
    Box::pin(deploy_from_deployer(ctx, CONTRACT, unit.tags()))
}
