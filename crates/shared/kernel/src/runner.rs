use crate::context::DeploymentContext;
use crate::error::{DeployError, DeployErrorExt};
use crate::registry::{RegistryError, UnitRegistry};
use crate::unit::RegistrationUnit;
use tnode_domain::DeploymentRecord;
use tracing::{info, info_span, Instrument};

/// Executes registry units against one context, one at a time.
#[derive(Debug, Clone, Copy)]
pub struct Runner<'a> {
    registry: &'a UnitRegistry,
    ctx: &'a DeploymentContext,
}

impl<'a> Runner<'a> {
    #[must_use]
    pub const fn new(registry: &'a UnitRegistry, ctx: &'a DeploymentContext) -> Self {
        Self { registry, ctx }
    }

    /// See [`UnitRegistry::plan`].
    pub fn plan(&self, tags: &[&str]) -> Result<Vec<&'a RegistrationUnit>, RegistryError> {
        self.registry.plan(tags)
    }

    /// Runs the plan for `tags` in order and returns each unit's record.
    ///
    /// The first failing unit stops the run; its error carries the unit name as context.
    pub async fn run(&self, tags: &[&str]) -> Result<Vec<DeploymentRecord>, DeployError> {
        let plan = self.plan(tags)?;
        info!(network = self.ctx.network(), units = plan.len(), "Starting deployment run");

        let mut records = Vec::with_capacity(plan.len());
        for unit in plan {
            let span = info_span!("unit", name = unit.name());
            let record = unit
                .run(self.ctx)
                .instrument(span)
                .await
                .context(format!("unit {}", unit.name()))?;
            records.push(record);
        }

        info!(deployed = records.len(), "Deployment run finished");
        Ok(records)
    }
}
