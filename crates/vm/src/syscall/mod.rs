//! The system-call catalogue.
//!
//! Canonical names live in the primary table; the legacy `AntShares.*`
//! names resolve through the alias table first. Lookup happens on every
//! SYSCALL instruction, so both tables are built once.

mod accessors;
mod account;
mod asset;
mod blockchain;
mod contract;
mod engine;
mod runtime;
mod storage;
mod validator;

use crate::execution_context::ExecutionContext;
use crate::execution_engine::ExecutionEngine;
use crate::limits::fee;
use crate::op_code::OpCode;
use crate::stack_item::StackItem;
use crate::VmResult;
use lazy_static::lazy_static;
use neo_cryptography::ECPoint;
use std::collections::HashMap;

/// A system call's behavior: receives the popped arguments (top-first) and
/// returns the items to push.
pub type SyscallHandler =
    fn(&mut ExecutionEngine, &mut ExecutionContext, Vec<StackItem>) -> VmResult<Vec<StackItem>>;

/// Descriptor of one system call, sharing the opcode-descriptor shape.
pub struct SyscallDescriptor {
    pub name: &'static str,
    pub num_in: usize,
    pub num_out: usize,
    pub fee: i64,
    pub handler: SyscallHandler,
}

impl SyscallDescriptor {
    const fn new(
        name: &'static str,
        num_in: usize,
        num_out: usize,
        fee: i64,
        handler: SyscallHandler,
    ) -> Self {
        Self {
            name,
            num_in,
            num_out,
            fee,
            handler,
        }
    }
}

macro_rules! descriptors {
    ($(($name:literal, $num_in:expr, $num_out:expr, $fee:expr, $handler:path)),* $(,)?) => {
        &[$(SyscallDescriptor::new($name, $num_in, $num_out, $fee, $handler)),*]
    };
}

static TABLE: &[SyscallDescriptor] = descriptors![
    // Runtime.
    ("Neo.Runtime.GetTrigger", 0, 1, fee::RUNTIME, runtime::get_trigger),
    ("Neo.Runtime.CheckWitness", 1, 1, fee::CHECK_WITNESS, runtime::check_witness),
    ("Neo.Runtime.Notify", 1, 0, fee::RUNTIME, runtime::notify),
    ("Neo.Runtime.Log", 1, 0, fee::RUNTIME, runtime::log),
    // Blockchain readers.
    ("Neo.Blockchain.GetHeight", 0, 1, fee::BLOCKCHAIN_READ, blockchain::get_height),
    ("Neo.Blockchain.GetHeader", 1, 1, fee::BLOCKCHAIN_READ, blockchain::get_header),
    ("Neo.Blockchain.GetBlock", 1, 1, fee::BLOCKCHAIN_READ, blockchain::get_block),
    ("Neo.Blockchain.GetTransaction", 1, 1, fee::BLOCKCHAIN_READ, blockchain::get_transaction),
    ("Neo.Blockchain.GetAccount", 1, 1, fee::BLOCKCHAIN_READ, blockchain::get_account),
    ("Neo.Blockchain.GetValidators", 0, 1, fee::BLOCKCHAIN_READ, blockchain::get_validators),
    ("Neo.Blockchain.GetAsset", 1, 1, fee::BLOCKCHAIN_READ, blockchain::get_asset),
    ("Neo.Blockchain.GetContract", 1, 1, fee::BLOCKCHAIN_READ, blockchain::get_contract),
    // Header accessors.
    ("Neo.Header.GetHash", 1, 1, fee::RUNTIME, accessors::header_hash),
    ("Neo.Header.GetVersion", 1, 1, fee::RUNTIME, accessors::header_version),
    ("Neo.Header.GetPrevHash", 1, 1, fee::RUNTIME, accessors::header_prev_hash),
    ("Neo.Header.GetMerkleRoot", 1, 1, fee::RUNTIME, accessors::header_merkle_root),
    ("Neo.Header.GetTimestamp", 1, 1, fee::RUNTIME, accessors::header_timestamp),
    ("Neo.Header.GetConsensusData", 1, 1, fee::RUNTIME, accessors::header_consensus_data),
    ("Neo.Header.GetNextConsensus", 1, 1, fee::RUNTIME, accessors::header_next_consensus),
    ("Neo.Header.GetIndex", 1, 1, fee::RUNTIME, accessors::header_index),
    // Block accessors.
    ("Neo.Block.GetTransactionCount", 1, 1, fee::RUNTIME, accessors::block_transaction_count),
    ("Neo.Block.GetTransactions", 1, 1, fee::RUNTIME, accessors::block_transactions),
    ("Neo.Block.GetTransaction", 2, 1, fee::RUNTIME, accessors::block_transaction),
    // Transaction accessors.
    ("Neo.Transaction.GetHash", 1, 1, fee::RUNTIME, accessors::transaction_hash),
    ("Neo.Transaction.GetType", 1, 1, fee::RUNTIME, accessors::transaction_type),
    ("Neo.Transaction.GetAttributes", 1, 1, fee::RUNTIME, accessors::transaction_attributes),
    ("Neo.Transaction.GetInputs", 1, 1, fee::RUNTIME, accessors::transaction_inputs),
    ("Neo.Transaction.GetOutputs", 1, 1, fee::RUNTIME, accessors::transaction_outputs),
    ("Neo.Transaction.GetReferences", 1, 1, fee::BLOCKCHAIN_READ, accessors::transaction_references),
    // Attribute, input, output accessors.
    ("Neo.Attribute.GetUsage", 1, 1, fee::RUNTIME, accessors::attribute_usage),
    ("Neo.Attribute.GetData", 1, 1, fee::RUNTIME, accessors::attribute_data),
    ("Neo.Input.GetHash", 1, 1, fee::RUNTIME, accessors::input_hash),
    ("Neo.Input.GetIndex", 1, 1, fee::RUNTIME, accessors::input_index),
    ("Neo.Output.GetAssetId", 1, 1, fee::RUNTIME, accessors::output_asset_id),
    ("Neo.Output.GetValue", 1, 1, fee::RUNTIME, accessors::output_value),
    ("Neo.Output.GetScriptHash", 1, 1, fee::RUNTIME, accessors::output_script_hash),
    // Account.
    ("Neo.Account.GetScriptHash", 1, 1, fee::RUNTIME, accessors::account_script_hash),
    ("Neo.Account.GetVotes", 1, 1, fee::RUNTIME, accessors::account_votes),
    ("Neo.Account.GetBalance", 2, 1, fee::RUNTIME, accessors::account_balance),
    ("Neo.Account.SetVotes", 2, 0, fee::MANAGEMENT, account::set_votes),
    // Asset.
    ("Neo.Asset.GetAssetId", 1, 1, fee::RUNTIME, accessors::asset_id),
    ("Neo.Asset.GetAssetType", 1, 1, fee::RUNTIME, accessors::asset_type),
    ("Neo.Asset.GetAmount", 1, 1, fee::RUNTIME, accessors::asset_amount),
    ("Neo.Asset.GetAvailable", 1, 1, fee::RUNTIME, accessors::asset_available),
    ("Neo.Asset.GetPrecision", 1, 1, fee::RUNTIME, accessors::asset_precision),
    ("Neo.Asset.GetOwner", 1, 1, fee::RUNTIME, accessors::asset_owner),
    ("Neo.Asset.GetAdmin", 1, 1, fee::RUNTIME, accessors::asset_admin),
    ("Neo.Asset.GetIssuer", 1, 1, fee::RUNTIME, accessors::asset_issuer),
    ("Neo.Asset.Create", 7, 1, fee::MANAGEMENT, asset::create),
    ("Neo.Asset.Renew", 2, 1, fee::MANAGEMENT, asset::renew),
    // Contract.
    ("Neo.Contract.GetScript", 1, 1, fee::RUNTIME, accessors::contract_script),
    ("Neo.Contract.Create", 9, 1, fee::MANAGEMENT, contract::create),
    ("Neo.Contract.Migrate", 9, 1, fee::MANAGEMENT, contract::migrate),
    ("Neo.Contract.GetStorageContext", 1, 1, fee::RUNTIME, contract::get_storage_context),
    ("Neo.Contract.Destroy", 0, 0, fee::MANAGEMENT, contract::destroy),
    // Storage.
    ("Neo.Storage.GetContext", 0, 1, fee::RUNTIME, storage::get_context),
    ("Neo.Storage.Get", 2, 1, fee::STORAGE_GET, storage::get),
    ("Neo.Storage.Put", 3, 0, fee::STORAGE_WRITE, storage::put),
    ("Neo.Storage.Delete", 2, 0, fee::STORAGE_WRITE, storage::delete),
    // Validator.
    ("Neo.Validator.Register", 1, 1, fee::MANAGEMENT, validator::register),
    // Execution engine introspection.
    ("System.ExecutionEngine.GetScriptContainer", 0, 1, fee::RUNTIME, engine::get_script_container),
    ("System.ExecutionEngine.GetExecutingScriptHash", 0, 1, fee::RUNTIME, engine::get_executing_script_hash),
    ("System.ExecutionEngine.GetCallingScriptHash", 0, 1, fee::RUNTIME, engine::get_calling_script_hash),
    ("System.ExecutionEngine.GetEntryScriptHash", 0, 1, fee::RUNTIME, engine::get_entry_script_hash),
];

lazy_static! {
    static ref SYSCALLS: HashMap<&'static str, &'static SyscallDescriptor> =
        TABLE.iter().map(|d| (d.name, d)).collect();

    /// Legacy aliases: every `Neo.*` name is also reachable as
    /// `AntShares.*`.
    static ref ALIASES: HashMap<String, &'static str> = TABLE
        .iter()
        .filter_map(|d| {
            d.name
                .strip_prefix("Neo.")
                .map(|rest| (format!("AntShares.{rest}"), d.name))
        })
        .collect();
}

/// Resolves a syscall name through the alias table, then the primary
/// table.
pub fn resolve(name: &str) -> Option<&'static SyscallDescriptor> {
    let canonical = ALIASES.get(name).copied().unwrap_or(name);
    SYSCALLS.get(canonical).copied()
}

/// The single-signature verification script for a public key, whose
/// hash160 is the key's address.
pub(crate) fn signature_redeem_script(point: &ECPoint) -> Vec<u8> {
    let encoded = point.encode();
    let mut script = Vec::with_capacity(encoded.len() + 2);
    script.push(OpCode::PUSHBYTES33.as_byte());
    script.extend_from_slice(&encoded);
    script.push(OpCode::CHECKSIG.as_byte());
    script
}
