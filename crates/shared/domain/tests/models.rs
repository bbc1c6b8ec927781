use tnode_domain::{Address, Artifact, Bytecode, DeploymentEvent, DeploymentRecord, TxHash};

fn record() -> DeploymentRecord {
    DeploymentRecord {
        contract_name: "TestToken".to_owned(),
        address: Address::new([0x11; 20]),
        deployer: Address::new([0xaa; 20]),
        tags: ["TestToken".to_owned()].into(),
        transaction_hash: TxHash::new([0x22; 32]),
        block_number: 1,
        bytecode_hash: "00".repeat(32),
    }
}

#[test]
fn address_display_is_lowercase_prefixed() {
    let addr: Address = "0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA".parse().expect("address");
    assert_eq!(addr.to_string(), format!("0x{}", "aa".repeat(20)));
    assert_eq!(addr, Address::new([0xaa; 20]));
}

#[test]
fn address_parse_rejects_wrong_length() {
    let err = "0x1234".parse::<Address>().expect_err("too short");
    assert_eq!(err.expected_len, 20);
    assert_eq!(err.to_string(), "'0x1234' is not a 20-byte hex value");
    assert!("0xzz00000000000000000000000000000000000000".parse::<Address>().is_err());
}

#[test]
fn address_from_tail_takes_last_bytes() {
    let digest: Vec<u8> = (0u8..32).collect();
    let addr = Address::from_tail(&digest);
    assert_eq!(addr.as_bytes()[0], 12);
    assert_eq!(addr.as_bytes()[19], 31);
}

#[test]
fn bytecode_accepts_empty_prefix() {
    assert!(Bytecode::from_hex("0x").expect("empty code").is_empty());
    assert_eq!(&*Bytecode::from_hex("0x6080").expect("code"), &[0x60, 0x80]);
    assert!(Bytecode::from_hex("0x608").is_err());
}

#[test]
fn bytecode_and_address_share_prefix_rules() {
    assert_eq!(&*Bytecode::from_hex("0X6080").expect("upper prefix"), &[0x60, 0x80]);
    assert_eq!(&*Bytecode::from_hex("6080").expect("bare"), &[0x60, 0x80]);
    assert!("0X1111111111111111111111111111111111111111".parse::<Address>().is_ok());
}

#[test]
fn artifact_reads_compiler_layout() {
    let raw = serde_json::json!({
        "_format": "hh-sol-artifact-1",
        "contractName": "TestEnums",
        "abi": [],
        "bytecode": "0x60806040",
        "deployedBytecode": "0x6080"
    });
    let artifact: Artifact = serde_json::from_value(raw).expect("artifact");
    assert_eq!(artifact.contract_name, "TestEnums");
    assert_eq!(artifact.bytecode.len(), 4);
}

#[test]
fn record_serializes_camel_case() {
    let value = serde_json::to_value(record()).expect("serialize");
    assert_eq!(value["contractName"], "TestToken");
    assert_eq!(value["address"], format!("0x{}", "11".repeat(20)));
    assert_eq!(value["tags"][0], "TestToken");
}

#[test]
fn merge_tags_reports_growth_only() {
    let mut rec = record();
    assert!(!rec.merge_tags(["TestToken"]));
    assert!(rec.merge_tags(["core"]));
    assert!(rec.has_tag("core"));
    assert_eq!(rec.tags.len(), 2);
}

#[test]
fn events_expose_contract_name() {
    let rec = record();
    assert_eq!(DeploymentEvent::Reused(rec.clone()).contract_name(), "TestToken");
    let failed = DeploymentEvent::Failed { contract_name: "TestEnums".into(), reason: "x".into() };
    assert_eq!(failed.contract_name(), "TestEnums");
}
