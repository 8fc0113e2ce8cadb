//! The script container: the transaction or block whose execution
//! triggered the VM.

use crate::block::Block;
use crate::transaction::Transaction;
use neo_core::UInt160;
use std::sync::Arc;

/// The entity on whose behalf a script runs.
///
/// It supplies the canonical signed message for `CHECKSIG`/`CHECKMULTISIG`
/// and the authenticated script-hash set for witness checks.
#[derive(Debug, Clone)]
pub enum ScriptContainer {
    Transaction(Arc<Transaction>),
    Block(Arc<Block>),
}

impl ScriptContainer {
    /// The canonical pre-witness serialization signed by witnesses.
    pub fn message(&self) -> Vec<u8> {
        match self {
            ScriptContainer::Transaction(tx) => tx.message(),
            ScriptContainer::Block(block) => block.message(),
        }
    }

    /// The script hashes authenticated by the container's witnesses.
    pub fn witness_hashes(&self) -> Vec<UInt160> {
        match self {
            ScriptContainer::Transaction(tx) => tx.witness_hashes(),
            // Blocks are authenticated by the consensus node set.
            ScriptContainer::Block(block) => vec![block.header.next_consensus],
        }
    }

    /// The contained transaction, if any.
    pub fn as_transaction(&self) -> Option<&Arc<Transaction>> {
        match self {
            ScriptContainer::Transaction(tx) => Some(tx),
            ScriptContainer::Block(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TransactionType;
    use crate::witness::Witness;

    #[test]
    fn transaction_container_exposes_witness_hashes() {
        let mut tx = Transaction::new(TransactionType::Contract);
        let witness = Witness::new(vec![], vec![0x51]);
        let expected = witness.script_hash();
        tx.scripts.push(witness);
        let container = ScriptContainer::Transaction(Arc::new(tx));
        assert_eq!(container.witness_hashes(), vec![expected]);
        assert!(container.as_transaction().is_some());
    }

    #[test]
    fn block_container_message_is_header_message() {
        let block = Block::default();
        let expected = block.message();
        let container = ScriptContainer::Block(Arc::new(block));
        assert_eq!(container.message(), expected);
        assert!(container.as_transaction().is_none());
    }
}
