#![allow(dead_code, unreachable_pub)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tnode_kernel::domain::{Address, Artifact, TxHash};
use tnode_kernel::ports::{
    ChainClient, ChainError, DeploymentReceipt, DeploymentRequest, MemoryArtifacts, NamedAccounts,
    StaticAccounts,
};
use tnode_kernel::{DeploymentContext, DeploymentContextBuilder};

pub const ALICE: Address = Address::new([0xaa; 20]);
pub const BOB: Address = Address::new([0xbb; 20]);

/// Chain double that counts submissions and reverts on empty bytecode.
#[derive(Debug, Default)]
pub struct FakeChain {
    submissions: AtomicUsize,
    deployed: Mutex<Vec<Address>>,
    accounts: Vec<Address>,
}

impl FakeChain {
    pub fn with_accounts(accounts: Vec<Address>) -> Self {
        Self { accounts, ..Self::default() }
    }

    pub fn submissions(&self) -> usize {
        self.submissions.load(Ordering::SeqCst)
    }

    pub fn wipe(&self) {
        self.deployed.lock().clear();
    }
}

#[async_trait]
impl ChainClient for FakeChain {
    async fn accounts(&self) -> Result<Vec<Address>, ChainError> {
        Ok(self.accounts.clone())
    }

    async fn deploy(&self, request: DeploymentRequest) -> Result<DeploymentReceipt, ChainError> {
        let n = self.submissions.fetch_add(1, Ordering::SeqCst) + 1;
        if request.bytecode.is_empty() {
            return Err(ChainError::Reverted { message: "empty bytecode".into(), context: None });
        }
        let address = Address::from_tail(&(n as u64).to_be_bytes());
        self.deployed.lock().push(address);
        Ok(DeploymentReceipt {
            address,
            transaction_hash: TxHash::from_tail(&(n as u64).to_be_bytes()),
            block_number: n as u64,
            gas_used: 21_000,
        })
    }

    async fn has_code(&self, address: Address) -> Result<bool, ChainError> {
        Ok(self.deployed.lock().contains(&address))
    }
}

pub fn artifacts() -> MemoryArtifacts {
    ["TestToken", "TestHelpers", "TestEnums"]
        .into_iter()
        .map(|name| Artifact::new(name, vec![0x60, 0x80, 0x60, 0x40]))
        .chain(std::iter::once(Artifact::new("Broken", Vec::new())))
        .collect()
}

pub fn deployer_accounts(address: Address) -> StaticAccounts {
    StaticAccounts::new(NamedAccounts::from_iter([("deployer", address)]))
}

pub fn builder(chain: &Arc<FakeChain>) -> DeploymentContextBuilder {
    DeploymentContext::builder()
        .chain(chain.clone())
        .artifacts(Arc::new(artifacts()))
        .accounts(Arc::new(deployer_accounts(ALICE)))
}

pub fn context(chain: &Arc<FakeChain>) -> DeploymentContext {
    builder(chain).build().expect("context")
}
