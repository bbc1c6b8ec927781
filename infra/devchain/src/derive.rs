use sha2::{Digest, Sha256};
use tnode_domain::{Address, TxHash};

const ACCOUNT_SEED: &[u8] = b"tnode-devchain-account";

/// Address of the `index`-th development account.
#[must_use]
pub fn account_address(index: usize) -> Address {
    let mut hasher = Sha256::new();
    hasher.update(ACCOUNT_SEED);
    hasher.update((index as u64).to_be_bytes());
    Address::from_tail(hasher.finalize().as_slice())
}

/// Address of the contract created by `sender` at `nonce`.
#[must_use]
pub fn contract_address(sender: Address, nonce: u64) -> Address {
    let mut hasher = Sha256::new();
    hasher.update(sender.as_bytes());
    hasher.update(nonce.to_be_bytes());
    Address::from_tail(hasher.finalize().as_slice())
}

pub(crate) fn transaction_hash(sender: Address, nonce: u64, code: &[u8]) -> TxHash {
    let mut hasher = Sha256::new();
    hasher.update(sender.as_bytes());
    hasher.update(nonce.to_be_bytes());
    hasher.update(code);
    TxHash::from_tail(hasher.finalize().as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivations_are_stable_and_distinct() {
        assert_eq!(account_address(0), account_address(0));
        assert_ne!(account_address(0), account_address(1));

        let sender = account_address(0);
        assert_ne!(contract_address(sender, 0), contract_address(sender, 1));
        assert_ne!(contract_address(sender, 0), contract_address(account_address(1), 0));
        assert_ne!(transaction_hash(sender, 0, &[1]), transaction_hash(sender, 0, &[2]));
    }
}
