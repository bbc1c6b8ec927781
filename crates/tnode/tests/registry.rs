#[test]
fn registry_contains_every_testnode_unit() {
    let registry = tnode::registry().expect("registry builds");

    assert_eq!(registry.len(), tnode::features::testnode::CONTRACTS.len());
    for contract in tnode::features::testnode::CONTRACTS {
        let unit = registry.get(contract).expect("unit registered");
        assert!(unit.has_tag(contract));
    }
}

#[test]
fn units_match_registry_order() {
    let units = tnode::units();
    let registry = tnode::registry().expect("registry builds");
    let names: Vec<&str> = units.iter().map(tnode::kernel::RegistrationUnit::name).collect();

    assert_eq!(names, tnode::features::testnode::CONTRACTS);
    assert!(registry.units().iter().map(|u| u.name()).eq(names.iter().copied()));
}

#[test]
fn full_plan_is_alphabetical() {
    let registry = tnode::registry().expect("registry builds");
    let plan: Vec<&str> = registry.plan(&[]).expect("plan").into_iter().map(|u| u.name()).collect();

    assert_eq!(plan, tnode::features::testnode::CONTRACTS);
}
