use crate::derive::{account_address, contract_address, transaction_hash};
use async_trait::async_trait;
use fxhash::FxHashMap;
use parking_lot::Mutex;
use std::borrow::Cow;
use std::sync::atomic::{AtomicUsize, Ordering};
use tnode_domain::constants::{
    DEFAULT_ACCOUNT_BALANCE, DEFAULT_ACCOUNT_COUNT, DEFAULT_CHAIN_ID, DEFAULT_GAS_PRICE,
};
use tnode_domain::{Address, Bytecode};
use tnode_kernel::ports::{ChainClient, ChainError, DeploymentReceipt, DeploymentRequest};
use tracing::{debug, trace};

/// Intrinsic gas of a contract-creation transaction.
pub const CREATE_BASE_GAS: u64 = 53_000;

/// Gas charged per byte of deployed code.
pub const CREATE_GAS_PER_BYTE: u64 = 200;

/// Opcode that always aborts execution.
pub const INVALID_OPCODE: u8 = 0xfe;

#[derive(Debug, Default)]
struct ChainState {
    balances: FxHashMap<Address, u128>,
    nonces: FxHashMap<Address, u64>,
    code: FxHashMap<Address, Bytecode>,
    block_number: u64,
}

/// In-memory chain; see the crate docs.
#[derive(Debug)]
pub struct DevChain {
    chain_id: u64,
    gas_price: u128,
    accounts: Vec<Address>,
    state: Mutex<ChainState>,
    submissions: AtomicUsize,
}

impl DevChain {
    #[must_use]
    pub fn builder() -> DevChainBuilder {
        DevChainBuilder::default()
    }

    #[must_use]
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    #[must_use]
    pub fn accounts(&self) -> &[Address] {
        &self.accounts
    }

    #[must_use]
    pub fn balance(&self, address: Address) -> u128 {
        self.state.lock().balances.get(&address).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn nonce(&self, address: Address) -> u64 {
        self.state.lock().nonces.get(&address).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn code_at(&self, address: Address) -> Option<Bytecode> {
        self.state.lock().code.get(&address).cloned()
    }

    #[must_use]
    pub fn block_number(&self) -> u64 {
        self.state.lock().block_number
    }

    /// Creation transactions received, including rejected ones.
    #[must_use]
    pub fn submissions(&self) -> usize {
        self.submissions.load(Ordering::SeqCst)
    }

    /// Gas a creation of `code` costs.
    #[must_use]
    pub fn creation_gas(code: &[u8]) -> u64 {
        CREATE_BASE_GAS + CREATE_GAS_PER_BYTE * code.len() as u64
    }

    fn execute(&self, request: &DeploymentRequest) -> Result<DeploymentReceipt, ChainError> {
        let mut state = self.state.lock();
        let sender = request.from;

        let Some(&balance) = state.balances.get(&sender) else {
            return Err(reverted(format!("unknown sender {sender}")));
        };

        let gas_used = Self::creation_gas(&request.bytecode);
        let fee = u128::from(gas_used) * self.gas_price;
        if fee > balance {
            return Err(reverted(format!("insufficient funds: need {fee} wei, have {balance}")));
        }

        // Past this point the transaction is mined: nonce and fee are spent even on revert.
        let nonce = state.nonces.get(&sender).copied().unwrap_or_default();
        state.nonces.insert(sender, nonce + 1);
        state.balances.insert(sender, balance - fee);
        state.block_number += 1;

        if request.bytecode.is_empty() {
            return Err(reverted("empty bytecode"));
        }
        if request.bytecode.first() == Some(&INVALID_OPCODE) {
            return Err(reverted("invalid opcode 0xfe"));
        }

        let address = contract_address(sender, nonce);
        state.code.insert(address, request.bytecode.clone());

        Ok(DeploymentReceipt {
            address,
            transaction_hash: transaction_hash(sender, nonce, &request.bytecode),
            block_number: state.block_number,
            gas_used,
        })
    }
}

fn reverted(message: impl Into<Cow<'static, str>>) -> ChainError {
    ChainError::Reverted { message: message.into(), context: None }
}

#[async_trait]
impl ChainClient for DevChain {
    async fn accounts(&self) -> Result<Vec<Address>, ChainError> {
        Ok(self.accounts.clone())
    }

    async fn deploy(&self, request: DeploymentRequest) -> Result<DeploymentReceipt, ChainError> {
        self.submissions.fetch_add(1, Ordering::SeqCst);
        trace!(contract = %request.contract_name, from = %request.from, "Creation received");

        let receipt = self.execute(&request)?;
        debug!(
            contract = %request.contract_name,
            address = %receipt.address,
            block = receipt.block_number,
            "Creation mined"
        );
        Ok(receipt)
    }

    async fn has_code(&self, address: Address) -> Result<bool, ChainError> {
        Ok(self.state.lock().code.contains_key(&address))
    }
}

#[derive(Debug, Clone)]
pub struct DevChainBuilder {
    chain_id: u64,
    accounts: usize,
    balance: u128,
    gas_price: u128,
    funded: Vec<(Address, u128)>,
}

impl Default for DevChainBuilder {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID,
            accounts: DEFAULT_ACCOUNT_COUNT,
            balance: DEFAULT_ACCOUNT_BALANCE,
            gas_price: DEFAULT_GAS_PRICE,
            funded: Vec::new(),
        }
    }
}

impl DevChainBuilder {
    #[must_use]
    pub const fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Number of funded accounts.
    #[must_use]
    pub const fn accounts(mut self, count: usize) -> Self {
        self.accounts = count;
        self
    }

    /// Starting balance of every account, in wei.
    #[must_use]
    pub const fn balance(mut self, wei: u128) -> Self {
        self.balance = wei;
        self
    }

    /// Price per unit of gas, in wei.
    #[must_use]
    pub const fn gas_price(mut self, wei: u128) -> Self {
        self.gas_price = wei;
        self
    }

    /// Gives an external address a balance without adding it to the account list.
    #[must_use]
    pub fn fund(mut self, address: Address, wei: u128) -> Self {
        self.funded.push((address, wei));
        self
    }

    #[must_use]
    pub fn build(self) -> DevChain {
        let accounts: Vec<Address> = (0..self.accounts).map(account_address).collect();
        let state = ChainState {
            balances: accounts
                .iter()
                .map(|a| (*a, self.balance))
                .chain(self.funded.iter().copied())
                .collect(),
            ..ChainState::default()
        };

        debug!(chain_id = self.chain_id, accounts = accounts.len(), "Development chain ready");
        DevChain {
            chain_id: self.chain_id,
            gas_price: self.gas_price,
            accounts,
            state: Mutex::new(state),
            submissions: AtomicUsize::new(0),
        }
    }
}
