//! Opaque ledger objects carried on the stack.

use neo_core::{UInt160, UInt256};
use neo_cryptography::ECPoint;
use neo_ledger::{
    Account, Asset, Block, Contract, Header, Transaction, TransactionAttribute, TransactionInput,
    TransactionOutput, Validator,
};
use std::sync::Arc;

/// A capability authorising storage access for one contract.
///
/// Obtainable only through `Neo.Storage.GetContext` (bound to the executing
/// script) or `Neo.Contract.GetStorageContext` (bound to a contract the
/// executing script created).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageContext {
    /// The contract whose storage this context unlocks.
    pub script_hash: UInt160,
}

/// A typed ledger entity wrapped as a stack item.
///
/// Entity wrappers compare by reference identity; the small value wrappers
/// (hashes, public keys, storage contexts) compare by value and support the
/// byte-string coercion.
#[derive(Debug, Clone)]
pub enum InteropObject {
    Block(Arc<Block>),
    Header(Arc<Header>),
    Transaction(Arc<Transaction>),
    Input(Arc<TransactionInput>),
    Output(Arc<TransactionOutput>),
    Attribute(Arc<TransactionAttribute>),
    Account(Arc<Account>),
    Asset(Arc<Asset>),
    Contract(Arc<Contract>),
    Validator(Arc<Validator>),
    EcPoint(ECPoint),
    Hash160(UInt160),
    Hash256(UInt256),
    StorageContext(StorageContext),
}

impl InteropObject {
    /// The name used in type-fault messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            InteropObject::Block(_) => "Block",
            InteropObject::Header(_) => "Header",
            InteropObject::Transaction(_) => "Transaction",
            InteropObject::Input(_) => "Input",
            InteropObject::Output(_) => "Output",
            InteropObject::Attribute(_) => "Attribute",
            InteropObject::Account(_) => "Account",
            InteropObject::Asset(_) => "Asset",
            InteropObject::Contract(_) => "Contract",
            InteropObject::Validator(_) => "Validator",
            InteropObject::EcPoint(_) => "ECPoint",
            InteropObject::Hash160(_) => "UInt160",
            InteropObject::Hash256(_) => "UInt256",
            InteropObject::StorageContext(_) => "StorageContext",
        }
    }

    /// Equality: identity for entity wrappers, value for the small ones.
    pub fn equals(&self, other: &InteropObject) -> bool {
        use InteropObject::*;
        match (self, other) {
            (Block(a), Block(b)) => Arc::ptr_eq(a, b),
            (Header(a), Header(b)) => Arc::ptr_eq(a, b),
            (Transaction(a), Transaction(b)) => Arc::ptr_eq(a, b),
            (Input(a), Input(b)) => Arc::ptr_eq(a, b),
            (Output(a), Output(b)) => Arc::ptr_eq(a, b),
            (Attribute(a), Attribute(b)) => Arc::ptr_eq(a, b),
            (Account(a), Account(b)) => Arc::ptr_eq(a, b),
            (Asset(a), Asset(b)) => Arc::ptr_eq(a, b),
            (Contract(a), Contract(b)) => Arc::ptr_eq(a, b),
            (Validator(a), Validator(b)) => Arc::ptr_eq(a, b),
            (EcPoint(a), EcPoint(b)) => a == b,
            (Hash160(a), Hash160(b)) => a == b,
            (Hash256(a), Hash256(b)) => a == b,
            (StorageContext(a), StorageContext(b)) => a == b,
            _ => false,
        }
    }

    /// The byte-string coercion, defined only for the value wrappers.
    pub fn try_as_bytes(&self) -> Option<Vec<u8>> {
        match self {
            InteropObject::EcPoint(point) => Some(point.encode()),
            InteropObject::Hash160(hash) => Some(hash.to_vec()),
            InteropObject::Hash256(hash) => Some(hash.to_vec()),
            _ => None,
        }
    }
}
