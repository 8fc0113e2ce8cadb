#![allow(dead_code)]

//! Shared helpers for the VM integration tests.

use neo_core::Fixed8;
use neo_ledger::{
    MemoryBlockchain, ScriptContainer, Transaction, TransactionType, TriggerType, Witness,
};
use neo_vm::{EngineConfig, ExecutionEngine, ExecutionResult, VmState};
use num_bigint::BigInt;
use std::sync::Arc;

/// A budget large enough for every test script.
pub fn gas() -> Fixed8 {
    Fixed8::from_int(100).expect("constant budget fits")
}

pub fn chain() -> Arc<MemoryBlockchain> {
    Arc::new(MemoryBlockchain::new())
}

/// An Application-trigger engine with no container.
pub fn app_engine(chain: Arc<MemoryBlockchain>) -> ExecutionEngine {
    ExecutionEngine::new(chain, EngineConfig::default())
}

/// An Application-trigger engine executing on behalf of `tx`.
pub fn engine_with_tx(chain: Arc<MemoryBlockchain>, tx: Transaction) -> ExecutionEngine {
    ExecutionEngine::new(
        chain,
        EngineConfig {
            container: Some(ScriptContainer::Transaction(Arc::new(tx))),
            ..Default::default()
        },
    )
}

/// A Verification-trigger engine.
pub fn verification_engine(chain: Arc<MemoryBlockchain>) -> ExecutionEngine {
    ExecutionEngine::new(
        chain,
        EngineConfig {
            trigger: TriggerType::Verification,
            ..Default::default()
        },
    )
}

/// Runs a script on a fresh chain with the default configuration.
pub fn run(script: Vec<u8>) -> ExecutionResult {
    app_engine(chain()).execute_script(script, gas())
}

/// A transaction whose witnesses authenticate the given verification
/// scripts.
pub fn tx_with_witnesses(verification_scripts: &[&[u8]]) -> Transaction {
    let mut tx = Transaction::new(TransactionType::Contract);
    for script in verification_scripts {
        tx.scripts.push(Witness::new(Vec::new(), script.to_vec()));
    }
    tx
}

pub fn assert_halted(result: &ExecutionResult) {
    assert_eq!(
        result.state,
        VmState::Halt,
        "expected halt, got fault: {:?}",
        result.fault
    );
}

pub fn top_int(result: &ExecutionResult) -> BigInt {
    result
        .stack
        .last()
        .expect("stack should not be empty")
        .as_bigint()
        .expect("top of stack should be numeric")
}

pub fn top_bool(result: &ExecutionResult) -> bool {
    result
        .stack
        .last()
        .expect("stack should not be empty")
        .as_bool()
        .expect("top of stack should be boolean")
}

pub fn top_bytes(result: &ExecutionResult) -> Vec<u8> {
    result
        .stack
        .last()
        .expect("stack should not be empty")
        .as_bytes()
        .expect("top of stack should be a byte string")
}

/// The single-signature verification script for a compressed public key.
pub fn redeem_script(public_key: &[u8]) -> Vec<u8> {
    let mut script = Vec::with_capacity(public_key.len() + 2);
    script.push(0x21);
    script.extend_from_slice(public_key);
    script.push(0xAC);
    script
}
