//! Transactions and their component records.

use crate::witness::Witness;
use crate::{LedgerError, LedgerResult};
use neo_core::{BinaryWriter, Fixed8, UInt160, UInt256};
use neo_cryptography::hash;
use serde::{Deserialize, Serialize};

const MAX_ATTRIBUTE_DATA: u64 = 65535;

/// The kind of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TransactionType {
    Miner = 0x00,
    Issue = 0x01,
    Claim = 0x02,
    Enrollment = 0x20,
    Register = 0x40,
    Contract = 0x80,
    Publish = 0xd0,
    Invocation = 0xd1,
}

impl TransactionType {
    /// Decodes the wire byte.
    pub fn from_byte(value: u8) -> LedgerResult<Self> {
        match value {
            0x00 => Ok(TransactionType::Miner),
            0x01 => Ok(TransactionType::Issue),
            0x02 => Ok(TransactionType::Claim),
            0x20 => Ok(TransactionType::Enrollment),
            0x40 => Ok(TransactionType::Register),
            0x80 => Ok(TransactionType::Contract),
            0xd0 => Ok(TransactionType::Publish),
            0xd1 => Ok(TransactionType::Invocation),
            other => Err(LedgerError::UnknownValue {
                kind: "transaction type",
                value: other,
            }),
        }
    }
}

/// The usage tag of a transaction attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AttributeUsage {
    ContractHash = 0x00,
    ECDH02 = 0x02,
    ECDH03 = 0x03,
    Script = 0x20,
    Vote = 0x30,
    DescriptionUrl = 0x81,
    Description = 0x90,
    Hash1 = 0xa1,
    Remark = 0xf0,
}

impl AttributeUsage {
    /// Decodes the wire byte.
    pub fn from_byte(value: u8) -> LedgerResult<Self> {
        match value {
            0x00 => Ok(AttributeUsage::ContractHash),
            0x02 => Ok(AttributeUsage::ECDH02),
            0x03 => Ok(AttributeUsage::ECDH03),
            0x20 => Ok(AttributeUsage::Script),
            0x30 => Ok(AttributeUsage::Vote),
            0x81 => Ok(AttributeUsage::DescriptionUrl),
            0x90 => Ok(AttributeUsage::Description),
            0xa1 => Ok(AttributeUsage::Hash1),
            0xf0 => Ok(AttributeUsage::Remark),
            other => Err(LedgerError::UnknownValue {
                kind: "attribute usage",
                value: other,
            }),
        }
    }
}

/// An auxiliary tagged payload carried by a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionAttribute {
    pub usage: AttributeUsage,
    pub data: Vec<u8>,
}

/// A reference to an output of a previous transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionInput {
    /// Hash of the transaction being spent.
    pub prev_hash: UInt256,
    /// Index of the output within that transaction.
    pub prev_index: u16,
}

/// A value sent to a script hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    /// The asset being transferred.
    pub asset_id: UInt256,
    /// The amount transferred.
    pub value: Fixed8,
    /// The receiving script hash.
    pub script_hash: UInt160,
}

/// A ledger transaction.
///
/// Only the fields the VM consumes are modeled; `script` carries the
/// executable payload of Invocation transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub tx_type: TransactionType,
    pub version: u8,
    pub attributes: Vec<TransactionAttribute>,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    /// Invocation payload; empty for other transaction types.
    pub script: Vec<u8>,
    /// Witnesses authenticating this transaction.
    pub scripts: Vec<Witness>,
}

impl Transaction {
    /// Creates a transaction with no attributes, inputs, outputs or
    /// witnesses.
    pub fn new(tx_type: TransactionType) -> Self {
        Self {
            tx_type,
            version: 0,
            attributes: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            script: Vec::new(),
            scripts: Vec::new(),
        }
    }

    /// The canonical unsigned encoding: the bytes that witnesses sign.
    pub fn message(&self) -> Vec<u8> {
        let mut w = BinaryWriter::new();
        w.write_u8(self.tx_type as u8);
        w.write_u8(self.version);
        if self.tx_type == TransactionType::Invocation {
            w.write_var_bytes(&self.script);
        }
        w.write_var_int(self.attributes.len() as u64);
        for attribute in &self.attributes {
            w.write_u8(attribute.usage as u8);
            debug_assert!(attribute.data.len() as u64 <= MAX_ATTRIBUTE_DATA);
            w.write_var_bytes(&attribute.data);
        }
        w.write_var_int(self.inputs.len() as u64);
        for input in &self.inputs {
            w.write_bytes(input.prev_hash.as_bytes());
            w.write_u16(input.prev_index);
        }
        w.write_var_int(self.outputs.len() as u64);
        for output in &self.outputs {
            w.write_bytes(output.asset_id.as_bytes());
            w.write_i64(output.value.raw());
            w.write_bytes(output.script_hash.as_bytes());
        }
        w.into_bytes()
    }

    /// The transaction hash: hash256 of the unsigned encoding.
    pub fn hash(&self) -> UInt256 {
        UInt256::from(hash::hash256(&self.message()))
    }

    /// The script hashes authenticated by this transaction's witnesses.
    pub fn witness_hashes(&self) -> Vec<UInt160> {
        self.scripts.iter().map(Witness::script_hash).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transaction {
        let mut tx = Transaction::new(TransactionType::Contract);
        tx.inputs.push(TransactionInput {
            prev_hash: UInt256::from([7u8; 32]),
            prev_index: 2,
        });
        tx.outputs.push(TransactionOutput {
            asset_id: UInt256::from([9u8; 32]),
            value: Fixed8::from_int(10).unwrap(),
            script_hash: UInt160::from([3u8; 20]),
        });
        tx
    }

    #[test]
    fn hash_is_stable_and_ignores_witnesses() {
        let mut tx = sample();
        let before = tx.hash();
        tx.scripts.push(Witness::new(vec![1], vec![2]));
        assert_eq!(tx.hash(), before);
    }

    #[test]
    fn invocation_script_is_signed() {
        let mut tx = Transaction::new(TransactionType::Invocation);
        let empty = tx.hash();
        tx.script = vec![0x61];
        assert_ne!(tx.hash(), empty);
    }

    #[test]
    fn witness_hashes_follow_witnesses() {
        let mut tx = sample();
        assert!(tx.witness_hashes().is_empty());
        let witness = Witness::new(vec![], vec![0x51]);
        let expected = witness.script_hash();
        tx.scripts.push(witness);
        assert_eq!(tx.witness_hashes(), vec![expected]);
    }

    #[test]
    fn type_bytes_round_trip() {
        for t in [
            TransactionType::Miner,
            TransactionType::Issue,
            TransactionType::Claim,
            TransactionType::Enrollment,
            TransactionType::Register,
            TransactionType::Contract,
            TransactionType::Publish,
            TransactionType::Invocation,
        ] {
            assert_eq!(TransactionType::from_byte(t as u8).unwrap(), t);
        }
        assert!(TransactionType::from_byte(0x77).is_err());
    }
}
