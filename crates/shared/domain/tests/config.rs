use serde_json::json;
use tnode_domain::Address;
use tnode_domain::config::{
    AccountRef, DeployConfig, DeploymentsConfig, DevChainConfig, NetworkConfig, RedeployPolicy,
};
use tnode_domain::constants::DEPLOYER;

#[test]
fn config_defaults_are_sane() {
    let network = NetworkConfig::default();
    assert_eq!(network.name, "devchain");
    assert_eq!(network.chain_id, 31_337);

    let deployments = DeploymentsConfig::default();
    assert!(deployments.dir.is_none());
    assert_eq!(deployments.policy, RedeployPolicy::Reuse);

    let devchain = DevChainConfig::default();
    assert_eq!(devchain.accounts, 20);

    let cfg = DeployConfig::default();
    assert_eq!(cfg.accounts.named.get(DEPLOYER), Some(&AccountRef::Index(0)));
    assert_eq!(cfg.artifacts.dir, std::path::PathBuf::from("artifacts"));
}

#[test]
fn deploy_config_deserializes() {
    let raw = json!({
        "network": { "name": "localhost", "chain_id": 1337 },
        "accounts": { "named": {
            "deployer": 2,
            "treasury": "0x00000000000000000000000000000000000000aa"
        } },
        "deployments": { "dir": "/tmp/deployments", "policy": "reject" }
    });

    let cfg: DeployConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.network.name, "localhost");
    assert_eq!(cfg.accounts.named.get("deployer"), Some(&AccountRef::Index(2)));

    let treasury: Address = "0x00000000000000000000000000000000000000aa".parse().expect("address");
    assert_eq!(cfg.accounts.named.get("treasury"), Some(&AccountRef::Address(treasury)));
    assert_eq!(cfg.deployments.policy, RedeployPolicy::Reject);
    assert_eq!(cfg.deployments.dir.as_deref(), Some(std::path::Path::new("/tmp/deployments")));
    assert_eq!(cfg.logging.level, "info");
}

#[test]
fn textual_account_index_is_accepted() {
    let parsed: AccountRef = serde_json::from_value(json!("3")).expect("account ref");
    assert_eq!(parsed, AccountRef::Index(3));

    let bad = serde_json::from_value::<AccountRef>(json!("deployer"));
    assert!(bad.is_err());
}

#[test]
fn config_mutation_does_not_leak_into_clones() {
    let base = DeployConfig::default();
    let mut tweaked = base.clone();
    tweaked.network.name = "staging".to_owned();

    assert_eq!(base.network.name, "devchain");
    assert_eq!(tweaked.network.name, "staging");
}
