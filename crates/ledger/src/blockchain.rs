//! The blockchain facade the VM executes against.

use crate::account::Account;
use crate::asset::Asset;
use crate::block::{Block, Header};
use crate::contract::Contract;
use crate::storage::{StorageItem, StorageKey};
use crate::transaction::Transaction;
use crate::validator::Validator;
use neo_core::{UInt160, UInt256};
use neo_cryptography::ECPoint;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Read/write view over chain state.
///
/// The VM calls only through this trait. Implementations are expected to be
/// staging views: callers commit the accumulated changes after a successful
/// run and discard them on fault, so the facade itself never exposes a
/// `commit`.
pub trait Blockchain: Send + Sync {
    /// Height of the latest persisted block.
    fn current_height(&self) -> u32;

    /// Asset id of the governing token, used by the vote-eligibility rule.
    fn governing_token(&self) -> UInt256;

    fn try_get_header(&self, hash: &UInt256) -> Option<Arc<Header>>;
    fn try_get_header_by_index(&self, index: u32) -> Option<Arc<Header>>;
    fn try_get_block(&self, hash: &UInt256) -> Option<Arc<Block>>;
    fn try_get_block_by_index(&self, index: u32) -> Option<Arc<Block>>;
    fn try_get_transaction(&self, hash: &UInt256) -> Option<Arc<Transaction>>;

    fn try_get_account(&self, hash: &UInt160) -> Option<Account>;
    fn put_account(&self, account: Account);
    fn delete_account(&self, hash: &UInt160);

    fn try_get_asset(&self, id: &UInt256) -> Option<Asset>;
    fn put_asset(&self, asset: Asset);

    fn try_get_contract(&self, hash: &UInt160) -> Option<Contract>;
    fn put_contract(&self, contract: Contract);
    fn delete_contract(&self, hash: &UInt160);

    fn validators(&self) -> Vec<Validator>;
    fn try_get_validator(&self, key: &ECPoint) -> Option<Validator>;
    fn put_validator(&self, validator: Validator);

    fn try_get_storage_item(&self, key: &StorageKey) -> Option<StorageItem>;
    fn put_storage_item(&self, key: StorageKey, item: StorageItem);
    fn delete_storage_item(&self, key: &StorageKey);
    /// All storage entries owned by a contract, in key order.
    fn storage_items_of(&self, script_hash: &UInt160) -> Vec<(StorageKey, StorageItem)>;
}

#[derive(Default)]
struct Maps {
    height: u32,
    governing_token: UInt256,
    headers: HashMap<UInt256, Arc<Header>>,
    header_index: HashMap<u32, UInt256>,
    blocks: HashMap<UInt256, Arc<Block>>,
    block_index: HashMap<u32, UInt256>,
    transactions: HashMap<UInt256, Arc<Transaction>>,
    accounts: HashMap<UInt160, Account>,
    assets: HashMap<UInt256, Asset>,
    contracts: HashMap<UInt160, Contract>,
    validators: BTreeMap<ECPoint, Validator>,
    storage: BTreeMap<(UInt160, Vec<u8>), StorageItem>,
}

/// In-memory [`Blockchain`] implementation.
///
/// Serves as the staging view during execution and as the test harness
/// store. `snapshot` produces an independent copy, so a caller can run a
/// script against the copy and adopt or discard it wholesale.
#[derive(Default)]
pub struct MemoryBlockchain {
    inner: RwLock<Maps>,
}

impl MemoryBlockchain {
    /// Creates an empty chain view at height zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the governing-token asset id.
    pub fn set_governing_token(&self, id: UInt256) {
        self.inner.write().governing_token = id;
    }

    /// Indexes a block, its header and its transactions, and advances the
    /// height.
    pub fn add_block(&self, block: Block) {
        let mut inner = self.inner.write();
        let hash = block.hash();
        let index = block.index();
        let header = Arc::new(block.header.clone());
        inner.headers.insert(hash, header);
        inner.header_index.insert(index, hash);
        for tx in &block.transactions {
            inner.transactions.insert(tx.hash(), Arc::new(tx.clone()));
        }
        inner.blocks.insert(hash, Arc::new(block));
        inner.block_index.insert(index, hash);
        if index > inner.height {
            inner.height = index;
        }
    }

    /// Registers a standalone transaction, as relayed outside a block.
    pub fn add_transaction(&self, tx: Transaction) {
        let mut inner = self.inner.write();
        inner.transactions.insert(tx.hash(), Arc::new(tx));
    }

    /// An independent deep copy of the current state.
    pub fn snapshot(&self) -> MemoryBlockchain {
        let inner = self.inner.read();
        MemoryBlockchain {
            inner: RwLock::new(Maps {
                height: inner.height,
                governing_token: inner.governing_token,
                headers: inner.headers.clone(),
                header_index: inner.header_index.clone(),
                blocks: inner.blocks.clone(),
                block_index: inner.block_index.clone(),
                transactions: inner.transactions.clone(),
                accounts: inner.accounts.clone(),
                assets: inner.assets.clone(),
                contracts: inner.contracts.clone(),
                validators: inner.validators.clone(),
                storage: inner.storage.clone(),
            }),
        }
    }
}

impl Blockchain for MemoryBlockchain {
    fn current_height(&self) -> u32 {
        self.inner.read().height
    }

    fn governing_token(&self) -> UInt256 {
        self.inner.read().governing_token
    }

    fn try_get_header(&self, hash: &UInt256) -> Option<Arc<Header>> {
        self.inner.read().headers.get(hash).cloned()
    }

    fn try_get_header_by_index(&self, index: u32) -> Option<Arc<Header>> {
        let inner = self.inner.read();
        let hash = inner.header_index.get(&index)?;
        inner.headers.get(hash).cloned()
    }

    fn try_get_block(&self, hash: &UInt256) -> Option<Arc<Block>> {
        self.inner.read().blocks.get(hash).cloned()
    }

    fn try_get_block_by_index(&self, index: u32) -> Option<Arc<Block>> {
        let inner = self.inner.read();
        let hash = inner.block_index.get(&index)?;
        inner.blocks.get(hash).cloned()
    }

    fn try_get_transaction(&self, hash: &UInt256) -> Option<Arc<Transaction>> {
        self.inner.read().transactions.get(hash).cloned()
    }

    fn try_get_account(&self, hash: &UInt160) -> Option<Account> {
        self.inner.read().accounts.get(hash).cloned()
    }

    fn put_account(&self, account: Account) {
        self.inner
            .write()
            .accounts
            .insert(account.script_hash, account);
    }

    fn delete_account(&self, hash: &UInt160) {
        self.inner.write().accounts.remove(hash);
    }

    fn try_get_asset(&self, id: &UInt256) -> Option<Asset> {
        self.inner.read().assets.get(id).cloned()
    }

    fn put_asset(&self, asset: Asset) {
        self.inner.write().assets.insert(asset.id, asset);
    }

    fn try_get_contract(&self, hash: &UInt160) -> Option<Contract> {
        self.inner.read().contracts.get(hash).cloned()
    }

    fn put_contract(&self, contract: Contract) {
        self.inner
            .write()
            .contracts
            .insert(contract.script_hash(), contract);
    }

    fn delete_contract(&self, hash: &UInt160) {
        self.inner.write().contracts.remove(hash);
    }

    fn validators(&self) -> Vec<Validator> {
        self.inner.read().validators.values().cloned().collect()
    }

    fn try_get_validator(&self, key: &ECPoint) -> Option<Validator> {
        self.inner.read().validators.get(key).cloned()
    }

    fn put_validator(&self, validator: Validator) {
        self.inner
            .write()
            .validators
            .insert(validator.public_key.clone(), validator);
    }

    fn try_get_storage_item(&self, key: &StorageKey) -> Option<StorageItem> {
        self.inner
            .read()
            .storage
            .get(&(key.script_hash, key.key.clone()))
            .cloned()
    }

    fn put_storage_item(&self, key: StorageKey, item: StorageItem) {
        self.inner
            .write()
            .storage
            .insert((key.script_hash, key.key), item);
    }

    fn delete_storage_item(&self, key: &StorageKey) {
        self.inner
            .write()
            .storage
            .remove(&(key.script_hash, key.key.clone()));
    }

    fn storage_items_of(&self, script_hash: &UInt160) -> Vec<(StorageKey, StorageItem)> {
        self.inner
            .read()
            .storage
            .range((*script_hash, Vec::new())..)
            .take_while(|((owner, _), _)| owner == script_hash)
            .map(|((owner, key), item)| (StorageKey::new(*owner, key.clone()), item.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TransactionType;

    #[test]
    fn add_block_indexes_everything() {
        let chain = MemoryBlockchain::new();
        let mut block = Block::default();
        block.header.index = 3;
        block
            .transactions
            .push(Transaction::new(TransactionType::Miner));
        let block_hash = block.hash();
        let tx_hash = block.transactions[0].hash();
        chain.add_block(block);

        assert_eq!(chain.current_height(), 3);
        assert!(chain.try_get_block(&block_hash).is_some());
        assert!(chain.try_get_block_by_index(3).is_some());
        assert!(chain.try_get_header_by_index(3).is_some());
        assert!(chain.try_get_transaction(&tx_hash).is_some());
    }

    #[test]
    fn storage_items_of_filters_by_owner() {
        let chain = MemoryBlockchain::new();
        let a = UInt160::from([1u8; 20]);
        let b = UInt160::from([2u8; 20]);
        chain.put_storage_item(StorageKey::new(a, vec![1]), StorageItem::new(vec![10]));
        chain.put_storage_item(StorageKey::new(a, vec![2]), StorageItem::new(vec![20]));
        chain.put_storage_item(StorageKey::new(b, vec![1]), StorageItem::new(vec![30]));

        let items = chain.storage_items_of(&a);
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|(key, _)| key.script_hash == a));
    }

    #[test]
    fn snapshot_is_independent() {
        let chain = MemoryBlockchain::new();
        let key = StorageKey::new(UInt160::zero(), vec![1]);
        chain.put_storage_item(key.clone(), StorageItem::new(vec![1]));

        let staged = chain.snapshot();
        staged.put_storage_item(key.clone(), StorageItem::new(vec![2]));
        staged.delete_account(&UInt160::zero());

        assert_eq!(chain.try_get_storage_item(&key).unwrap().value, vec![1]);
        assert_eq!(staged.try_get_storage_item(&key).unwrap().value, vec![2]);
    }
}
