//! Accounts: per-script-hash state for the UTXO-era governance model.

use neo_core::{Fixed8, UInt160, UInt256};
use neo_cryptography::ECPoint;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-address ledger state: freeze flag, validator votes and confirmed
/// balances per asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub script_hash: UInt160,
    pub is_frozen: bool,
    pub votes: Vec<ECPoint>,
    pub balances: HashMap<UInt256, Fixed8>,
}

impl Account {
    /// Creates an empty account for the given script hash.
    pub fn new(script_hash: UInt160) -> Self {
        Self {
            script_hash,
            ..Default::default()
        }
    }

    /// The confirmed balance for an asset, zero when absent.
    pub fn balance_of(&self, asset_id: &UInt256) -> Fixed8 {
        self.balances.get(asset_id).copied().unwrap_or(Fixed8::ZERO)
    }

    /// An account can be garbage-collected once it is unfrozen, votes for
    /// nobody and holds nothing.
    pub fn is_deletable(&self) -> bool {
        !self.is_frozen
            && self.votes.is_empty()
            && self.balances.values().all(|v| *v <= Fixed8::ZERO)
    }
}
