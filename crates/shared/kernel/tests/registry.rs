mod common;

use common::{ALICE, FakeChain, builder, context};
use proptest::prelude::*;
use std::sync::Arc;
use tnode_kernel::domain::DeploymentSpec;
use tnode_kernel::domain::config::RedeployPolicy;
use tnode_kernel::{
    DeployError, DeploymentContext, RegistrationUnit, RegistryError, Runner, UnitFuture,
    UnitRegistry,
};

fn deploy_own_name<'a>(ctx: &'a DeploymentContext, unit: &'a RegistrationUnit) -> UnitFuture<'a> {
    Box::pin(async move {
        let deployer = ctx.named_account("deployer").await?;
        ctx.deploy(&DeploymentSpec::new(unit.name(), deployer), unit.tags()).await
    })
}

fn unit(name: &str) -> RegistrationUnit {
    RegistrationUnit::new(name, deploy_own_name).with_tags([name])
}

fn names(units: &[&RegistrationUnit]) -> Vec<String> {
    units.iter().map(|u| u.name().to_owned()).collect()
}

#[test]
fn duplicate_units_are_rejected() {
    let err = UnitRegistry::builder().register(unit("A")).register(unit("A")).build().unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateUnit { ref name, .. } if name == "A"));
}

#[test]
fn empty_names_are_rejected() {
    let err = UnitRegistry::builder().register(unit(" ")).build().unwrap_err();
    assert!(matches!(err, RegistryError::InvalidUnit { .. }));
}

#[test]
fn unknown_dependency_is_rejected() {
    let err = UnitRegistry::builder()
        .register(unit("A").with_dependencies(["nothing"]))
        .build()
        .unwrap_err();
    assert!(
        matches!(err, RegistryError::UnknownDependency { ref unit, ref tag, .. } if unit == "A" && tag == "nothing")
    );
}

#[test]
fn cycles_are_rejected_with_path() {
    let err = UnitRegistry::builder()
        .register(unit("A").with_dependencies(["B"]))
        .register(unit("B").with_dependencies(["C"]))
        .register(unit("C").with_dependencies(["A"]))
        .build()
        .unwrap_err();
    let RegistryError::DependencyCycle { path, .. } = err else {
        panic!("expected a cycle, got {err:?}");
    };
    assert_eq!(path, "A -> B -> C -> A");
}

#[test]
fn plan_orders_by_name_with_dependencies_first() {
    let registry = UnitRegistry::builder()
        .register(unit("Alpha").with_dependencies(["Zeta"]))
        .register(unit("Beta"))
        .register(unit("Zeta").with_tags(["core"]))
        .build()
        .expect("registry");

    assert_eq!(names(&registry.plan(&[]).expect("plan")), ["Zeta", "Alpha", "Beta"]);
    assert_eq!(names(&registry.plan(&["Alpha"]).expect("plan")), ["Zeta", "Alpha"]);
    assert_eq!(names(&registry.plan(&["core", "Zeta"]).expect("plan")), ["Zeta"]);
    assert_eq!(registry.tags(), ["Alpha", "Beta", "Zeta", "core"]);
}

#[test]
fn plan_rejects_unknown_tag() {
    let registry = UnitRegistry::builder().register(unit("A")).build().expect("registry");
    let err = registry.plan(&["A", "B"]).unwrap_err();
    assert!(matches!(err, RegistryError::UnknownTag { ref tag, .. } if tag == "B"));
}

#[tokio::test]
async fn run_executes_in_plan_order() {
    let chain = Arc::new(FakeChain::default());
    let ctx = context(&chain);
    let registry = UnitRegistry::builder()
        .register(unit("TestToken").with_dependencies(["TestHelpers"]))
        .register(unit("TestHelpers"))
        .build()
        .expect("registry");

    let records = Runner::new(&registry, &ctx).run(&[]).await.expect("run");

    let deployed: Vec<&str> = records.iter().map(|r| r.contract_name.as_str()).collect();
    assert_eq!(deployed, ["TestHelpers", "TestToken"]);
    assert_eq!(chain.submissions(), 2);
    assert!(records.iter().all(|r| r.deployer == ALICE));
}

#[tokio::test]
async fn run_stops_at_first_failure() {
    let chain = Arc::new(FakeChain::default());
    let ctx = context(&chain);
    let registry = UnitRegistry::builder()
        .register(unit("Broken"))
        .register(unit("TestToken"))
        .build()
        .expect("registry");

    let err = Runner::new(&registry, &ctx).run(&[]).await.unwrap_err();

    assert!(matches!(err, DeployError::DeploymentReverted { .. }));
    assert!(err.to_string().contains("unit Broken"));
    assert_eq!(chain.submissions(), 1);
    assert!(ctx.deployments().await.expect("all").is_empty());
}

#[tokio::test]
async fn run_keeps_the_failing_layer_context() {
    let chain = Arc::new(FakeChain::default());
    let ctx = builder(&chain).network("mainnet_fork").policy(RedeployPolicy::Reject).build().expect("context");
    let registry = UnitRegistry::builder().register(unit("TestToken")).build().expect("registry");
    ctx.deploy(&DeploymentSpec::new("TestToken", ALICE), ["TestToken"]).await.expect("first");

    let err = Runner::new(&registry, &ctx).run(&[]).await.unwrap_err();

    assert!(matches!(err, DeployError::AlreadyDeployed { .. }));
    assert!(err.to_string().ends_with("(unit TestToken: mainnet_fork)"), "{err}");
    assert_eq!(chain.submissions(), 1);
}

#[tokio::test]
async fn run_reports_unknown_tag() {
    let chain = Arc::new(FakeChain::default());
    let ctx = context(&chain);
    let registry = UnitRegistry::builder().register(unit("TestToken")).build().expect("registry");

    let err = Runner::new(&registry, &ctx).run(&["nope"]).await.unwrap_err();

    assert!(matches!(err, DeployError::Registry { source: RegistryError::UnknownTag { .. }, .. }));
    assert_eq!(chain.submissions(), 0);
}

proptest! {
    // Unit i may only depend on units with a smaller index, so every graph is acyclic.
    #[test]
    fn plans_contain_each_unit_once_after_its_dependencies(
        edges in prop::collection::vec(prop::collection::vec(any::<prop::sample::Index>(), 0..3), 1..12)
    ) {
        let units: Vec<RegistrationUnit> = edges
            .iter()
            .enumerate()
            .map(|(i, deps)| {
                let deps: Vec<String> =
                    if i == 0 { Vec::new() } else { deps.iter().map(|d| format!("U{:02}", d.index(i))).collect() };
                unit(&format!("U{i:02}")).with_dependencies(deps)
            })
            .collect();
        let registry = UnitRegistry::builder().register_all(units).build().expect("acyclic");

        let plan = names(&registry.plan(&[]).expect("plan"));
        prop_assert_eq!(plan.len(), registry.len());

        for (position, name) in plan.iter().enumerate() {
            let unit = registry.get(name).expect("planned unit exists");
            for dependency in unit.dependencies() {
                let before = plan.iter().position(|n| n == dependency).expect("dependency planned");
                prop_assert!(before < position, "{} must precede {}", dependency, name);
            }
        }
    }
}
