//! `Neo.Blockchain.*`: ledger readers.

use crate::execution_context::ExecutionContext;
use crate::execution_engine::ExecutionEngine;
use crate::stack_item::{bigint_from_bytes, InteropObject, StackItem};
use crate::{VmError, VmResult};
use neo_core::{UInt160, UInt256};
use neo_ledger::Account;
use num_traits::ToPrimitive;
use std::sync::Arc;

enum HashOrIndex {
    Hash(UInt256),
    Index(u32),
}

/// A 32-byte argument is a hash in display (big-endian) order; anything up
/// to 5 bytes is a little-endian block index.
fn hash_or_index(item: &StackItem) -> VmResult<HashOrIndex> {
    let bytes = item.as_bytes()?;
    match bytes.len() {
        32 => {
            let mut reversed = bytes;
            reversed.reverse();
            let hash = UInt256::from_bytes(&reversed)
                .map_err(|e| VmError::invalid_arguments("GetHeader", e.to_string()))?;
            Ok(HashOrIndex::Hash(hash))
        }
        0..=5 => {
            let index = bigint_from_bytes(&bytes).to_u32().ok_or_else(|| {
                VmError::invalid_arguments("GetHeader", "index out of range".to_string())
            })?;
            Ok(HashOrIndex::Index(index))
        }
        other => Err(VmError::invalid_arguments(
            "GetHeader",
            format!("expected a hash or an index, got {other} bytes"),
        )),
    }
}

fn uint256_arg(item: &StackItem, operation: &'static str) -> VmResult<UInt256> {
    item.as_uint256()
        .map_err(|_| VmError::invalid_arguments(operation, "expected a 32-byte hash"))
}

fn uint160_arg(item: &StackItem, operation: &'static str) -> VmResult<UInt160> {
    item.as_uint160()
        .map_err(|_| VmError::invalid_arguments(operation, "expected a 20-byte hash"))
}

pub(super) fn get_height(
    engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    _args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    Ok(vec![StackItem::integer(
        engine.blockchain().current_height(),
    )])
}

pub(super) fn get_header(
    engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    let header = match hash_or_index(&args[0])? {
        HashOrIndex::Hash(hash) => engine.blockchain().try_get_header(&hash),
        HashOrIndex::Index(index) => engine.blockchain().try_get_header_by_index(index),
    }
    .ok_or(VmError::ItemNotFound {
        kind: "header",
        key: String::new(),
    })?;
    Ok(vec![StackItem::Interop(InteropObject::Header(header))])
}

pub(super) fn get_block(
    engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    let block = match hash_or_index(&args[0])? {
        HashOrIndex::Hash(hash) => engine.blockchain().try_get_block(&hash),
        HashOrIndex::Index(index) => engine.blockchain().try_get_block_by_index(index),
    }
    .ok_or(VmError::ItemNotFound {
        kind: "block",
        key: String::new(),
    })?;
    Ok(vec![StackItem::Interop(InteropObject::Block(block))])
}

pub(super) fn get_transaction(
    engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    let hash = uint256_arg(&args[0], "GetTransaction")?;
    let tx = engine
        .blockchain()
        .try_get_transaction(&hash)
        .ok_or(VmError::ItemNotFound {
            kind: "transaction",
            key: hash.to_string(),
        })?;
    Ok(vec![StackItem::Interop(InteropObject::Transaction(tx))])
}

/// Missing accounts materialize as empty state rather than faulting.
pub(super) fn get_account(
    engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    let hash = uint160_arg(&args[0], "GetAccount")?;
    let account = engine
        .blockchain()
        .try_get_account(&hash)
        .unwrap_or_else(|| Account::new(hash));
    Ok(vec![StackItem::Interop(InteropObject::Account(Arc::new(
        account,
    )))])
}

pub(super) fn get_validators(
    engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    _args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    let points = engine
        .blockchain()
        .validators()
        .into_iter()
        .map(|validator| StackItem::Interop(InteropObject::EcPoint(validator.public_key)))
        .collect();
    Ok(vec![StackItem::array(points)])
}

pub(super) fn get_asset(
    engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    let id = uint256_arg(&args[0], "GetAsset")?;
    let asset = engine
        .blockchain()
        .try_get_asset(&id)
        .ok_or(VmError::ItemNotFound {
            kind: "asset",
            key: id.to_string(),
        })?;
    Ok(vec![StackItem::Interop(InteropObject::Asset(Arc::new(
        asset,
    )))])
}

/// A missing contract yields an empty byte string, so scripts can probe
/// for deployment.
pub(super) fn get_contract(
    engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    let hash = uint160_arg(&args[0], "GetContract")?;
    Ok(vec![match engine.blockchain().try_get_contract(&hash) {
        Some(contract) => StackItem::Interop(InteropObject::Contract(Arc::new(contract))),
        None => StackItem::bytes(Vec::new()),
    }])
}
