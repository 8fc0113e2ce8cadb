//! Contract storage keys and items.

use neo_core::UInt160;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A key in contract storage, scoped to the owning contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct StorageKey {
    /// The contract that owns this entry.
    pub script_hash: UInt160,
    /// The key bytes.
    pub key: Vec<u8>,
}

impl StorageKey {
    /// Creates a storage key.
    pub fn new(script_hash: UInt160, key: Vec<u8>) -> Self {
        Self { script_hash, key }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.script_hash, hex::encode(&self.key))
    }
}

/// A value in contract storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StorageItem {
    /// The value bytes.
    pub value: Vec<u8>,
}

impl StorageItem {
    /// Creates a storage item.
    pub fn new(value: Vec<u8>) -> Self {
        Self { value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_owner_and_key() {
        let key = StorageKey::new(UInt160::zero(), vec![0xAB, 0xCD]);
        let text = key.to_string();
        assert!(text.ends_with(":abcd"));
    }
}
