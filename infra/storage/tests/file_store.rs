use std::collections::BTreeSet;
use tempfile::TempDir;
use tnode_domain::{Address, DeploymentRecord, TxHash};
use tnode_kernel::ports::{DeploymentStore, StoreError};
use tnode_storage::{CHAIN_ID_FILE, FileDeploymentStore, StorageError};

fn record(name: &str, tag: &str) -> DeploymentRecord {
    DeploymentRecord {
        contract_name: name.to_owned(),
        address: Address::new([0x11; 20]),
        deployer: Address::new([0xaa; 20]),
        tags: BTreeSet::from([tag.to_owned()]),
        transaction_hash: TxHash::new([0x22; 32]),
        block_number: 7,
        bytecode_hash: "ab".repeat(32),
    }
}

async fn open(temp: &TempDir) -> FileDeploymentStore {
    FileDeploymentStore::builder()
        .root(temp.path())
        .network("localhost")
        .chain_id(1337)
        .connect()
        .await
        .unwrap()
}

#[tokio::test]
async fn connect_creates_network_dir_and_marker() {
    let temp = TempDir::new().unwrap();
    let store = open(&temp).await;

    assert!(store.dir().ends_with("localhost"));
    let marker = std::fs::read_to_string(store.dir().join(CHAIN_ID_FILE)).unwrap();
    assert_eq!(marker, "1337");
}

#[tokio::test]
async fn chain_id_mismatch_is_rejected() {
    let temp = TempDir::new().unwrap();
    open(&temp).await;

    let err = FileDeploymentStore::builder()
        .root(temp.path())
        .network("localhost")
        .chain_id(1)
        .connect()
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::ChainMismatch { .. }));
}

#[tokio::test]
async fn put_get_and_replace() {
    let temp = TempDir::new().unwrap();
    let store = open(&temp).await;

    assert!(store.get("TestToken").await.unwrap().is_none());

    store.put(&record("TestToken", "a")).await.unwrap();
    store.put(&record("TestToken", "b")).await.unwrap();

    let stored = store.get("TestToken").await.unwrap().unwrap();
    assert!(stored.has_tag("b") && !stored.has_tag("a"));
    assert!(store.dir().join("TestToken.json").is_file());

    let leftovers = std::fs::read_dir(store.dir())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().contains(".tnodetmp."))
        .count();
    assert_eq!(leftovers, 0);
}

#[tokio::test]
async fn records_survive_reopening() {
    let temp = TempDir::new().unwrap();
    open(&temp).await.put(&record("TestEnums", "TestEnums")).await.unwrap();

    let reopened = open(&temp).await;
    let all = reopened.all().await.unwrap();
    assert_eq!(all, vec![record("TestEnums", "TestEnums")]);
}

#[tokio::test]
async fn all_is_sorted_and_reset_keeps_marker() {
    let temp = TempDir::new().unwrap();
    let store = open(&temp).await;
    for name in ["TestToken", "TestEnums", "TestHelpers"] {
        store.put(&record(name, name)).await.unwrap();
    }

    let names: Vec<String> =
        store.all().await.unwrap().into_iter().map(|r| r.contract_name).collect();
    assert_eq!(names, ["TestEnums", "TestHelpers", "TestToken"]);

    assert_eq!(store.reset().await.unwrap(), 3);
    assert!(store.all().await.unwrap().is_empty());
    assert!(store.dir().join(CHAIN_ID_FILE).is_file());
}

#[tokio::test]
async fn unsafe_names_are_rejected() {
    let temp = TempDir::new().unwrap();
    let store = open(&temp).await;

    let err = store.get("../escape").await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidName { .. }));

    let err = FileDeploymentStore::builder().root(temp.path()).network("a/b").connect().await.unwrap_err();
    assert!(matches!(err, StorageError::InvalidName { .. }));
}

#[tokio::test]
async fn dashed_network_names_get_their_own_dir() {
    let temp = TempDir::new().unwrap();
    let store =
        FileDeploymentStore::builder().root(temp.path()).network("base-sepolia").connect().await.unwrap();

    assert_eq!(store.network(), "base-sepolia");
    assert!(temp.path().join("base-sepolia").join(CHAIN_ID_FILE).is_file());
}

#[tokio::test]
async fn corrupted_record_is_a_codec_error() {
    let temp = TempDir::new().unwrap();
    let store = open(&temp).await;
    std::fs::write(store.dir().join("TestReturns.json"), b"{not json").unwrap();

    let err = store.get("TestReturns").await.unwrap_err();
    assert!(matches!(err, StoreError::Codec { .. }));
}
