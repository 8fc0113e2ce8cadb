//! Block headers and blocks.

use crate::transaction::Transaction;
use neo_core::{BinaryWriter, UInt160, UInt256};
use neo_cryptography::hash;
use serde::{Deserialize, Serialize};

/// A block header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub version: u32,
    pub prev_hash: UInt256,
    pub merkle_root: UInt256,
    /// Seconds since the Unix epoch.
    pub timestamp: u32,
    /// Height of the block.
    pub index: u32,
    pub consensus_data: u64,
    /// Script hash of the next consensus node set.
    pub next_consensus: UInt160,
}

impl Header {
    /// The canonical unsigned encoding: the bytes consensus nodes sign.
    pub fn message(&self) -> Vec<u8> {
        let mut w = BinaryWriter::new();
        w.write_u32(self.version);
        w.write_bytes(self.prev_hash.as_bytes());
        w.write_bytes(self.merkle_root.as_bytes());
        w.write_u32(self.timestamp);
        w.write_u32(self.index);
        w.write_u64(self.consensus_data);
        w.write_bytes(self.next_consensus.as_bytes());
        w.into_bytes()
    }

    /// The header hash: hash256 of the unsigned encoding.
    pub fn hash(&self) -> UInt256 {
        UInt256::from(hash::hash256(&self.message()))
    }
}

/// A block: a header plus its transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub header: Header,
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// The block hash is the header hash.
    pub fn hash(&self) -> UInt256 {
        self.header.hash()
    }

    /// The height of the block.
    pub fn index(&self) -> u32 {
        self.header.index
    }

    /// The canonical signed message, shared with the header.
    pub fn message(&self) -> Vec<u8> {
        self.header.message()
    }
}
