use crate::context::DeploymentContext;
use crate::error::DeployError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use tnode_domain::DeploymentRecord;

pub type UnitFuture<'a> =
    Pin<Box<dyn Future<Output = Result<DeploymentRecord, DeployError>> + Send + 'a>>;

/// Body of a deployment unit. Receives the context and its own unit (for tags).
pub type UnitFn = for<'a> fn(&'a DeploymentContext, &'a RegistrationUnit) -> UnitFuture<'a>;

/// A named, tagged deployment step.
///
/// ```rust
/// use tnode_kernel::{DeploymentContext, RegistrationUnit, UnitFuture};
///
/// fn run<'a>(ctx: &'a DeploymentContext, unit: &'a RegistrationUnit) -> UnitFuture<'a> {
///     Box::pin(async move {
///         let deployer = ctx.named_account("deployer").await?;
///         let spec = tnode_kernel::domain::DeploymentSpec::new("Greeter", deployer);
///         ctx.deploy(&spec, unit.tags()).await
///     })
/// }
///
/// let unit = RegistrationUnit::new("Greeter", run).with_tags(["Greeter"]).with_dependencies(["Token"]);
/// assert!(unit.has_tag("Greeter"));
/// ```
#[derive(Clone)]
pub struct RegistrationUnit {
    name: String,
    tags: Vec<String>,
    dependencies: Vec<String>,
    run: UnitFn,
}

impl RegistrationUnit {
    pub fn new(name: impl Into<String>, run: UnitFn) -> Self {
        Self { name: name.into(), tags: Vec::new(), dependencies: Vec::new(), run }
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for tag in tags {
            let tag = tag.into();
            if !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
        }
        self
    }

    /// Tags of units that must run first.
    #[must_use]
    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for dependency in dependencies {
            let dependency = dependency.into();
            if !self.dependencies.contains(&dependency) {
                self.dependencies.push(dependency);
            }
        }
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn run<'a>(&'a self, ctx: &'a DeploymentContext) -> UnitFuture<'a> {
        (self.run)(ctx, self)
    }
}

impl fmt::Debug for RegistrationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationUnit")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}
