//! Ledger entities and the blockchain facade consumed by the legacy Neo VM.
//!
//! The VM reads and writes chain state exclusively through the [`Blockchain`]
//! trait; [`MemoryBlockchain`] is the in-memory staging implementation used
//! by tests and by callers that batch commits externally.

pub mod account;
pub mod action;
pub mod asset;
pub mod block;
pub mod blockchain;
pub mod container;
pub mod contract;
pub mod error;
pub mod storage;
pub mod transaction;
pub mod trigger;
pub mod validator;
pub mod witness;

pub use account::Account;
pub use action::{Action, ActionBase, ContractParameter, LogAction, NotificationAction};
pub use asset::{Asset, AssetType};
pub use block::{Block, Header};
pub use blockchain::{Blockchain, MemoryBlockchain};
pub use container::ScriptContainer;
pub use contract::{Contract, ContractParameterType, ContractPropertyState};
pub use error::LedgerError;
pub use storage::{StorageItem, StorageKey};
pub use transaction::{
    AttributeUsage, Transaction, TransactionAttribute, TransactionInput, TransactionOutput,
    TransactionType,
};
pub use trigger::TriggerType;
pub use validator::Validator;
pub use witness::Witness;

/// The result type for ledger operations.
pub type LedgerResult<T> = std::result::Result<T, LedgerError>;
