//! `Neo.Storage.*`: contract storage through the context capability.

use crate::execution_context::ExecutionContext;
use crate::execution_engine::ExecutionEngine;
use crate::limits::{MAX_ITEM_SIZE, MAX_STORAGE_KEY_SIZE};
use crate::stack_item::{InteropObject, StackItem, StorageContext};
use crate::{VmError, VmResult};
use neo_ledger::{StorageItem, StorageKey};

/// The contract behind a storage context must exist and be declared with
/// storage.
fn check_storage_context(engine: &ExecutionEngine, context: &StorageContext) -> VmResult<()> {
    let contract = engine
        .blockchain()
        .try_get_contract(&context.script_hash)
        .ok_or(VmError::ContractNoStorage {
            hash: context.script_hash.to_string(),
        })?;
    if !contract.has_storage() {
        return Err(VmError::ContractNoStorage {
            hash: context.script_hash.to_string(),
        });
    }
    Ok(())
}

fn key_arg(item: &StackItem) -> VmResult<Vec<u8>> {
    let key = item.as_bytes()?;
    if key.len() > MAX_STORAGE_KEY_SIZE {
        return Err(VmError::ItemTooLarge {
            size: key.len(),
            max: MAX_STORAGE_KEY_SIZE,
        });
    }
    Ok(key)
}

pub(super) fn get_context(
    _engine: &mut ExecutionEngine,
    ctx: &mut ExecutionContext,
    _args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    Ok(vec![StackItem::Interop(InteropObject::StorageContext(
        StorageContext {
            script_hash: ctx.script_hash(),
        },
    ))])
}

/// A missing key reads as the empty byte string.
pub(super) fn get(
    engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    let key = key_arg(&args[0])?;
    let context = args[1].as_storage_context()?;
    check_storage_context(engine, &context)?;
    let value = engine
        .blockchain()
        .try_get_storage_item(&StorageKey::new(context.script_hash, key))
        .map(|item| item.value)
        .unwrap_or_default();
    Ok(vec![StackItem::bytes(value)])
}

pub(super) fn put(
    engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    engine.require_application_trigger()?;
    let value = args[0].as_bytes()?;
    if value.len() > MAX_ITEM_SIZE {
        return Err(VmError::ItemTooLarge {
            size: value.len(),
            max: MAX_ITEM_SIZE,
        });
    }
    let key = key_arg(&args[1])?;
    let context = args[2].as_storage_context()?;
    check_storage_context(engine, &context)?;
    engine
        .blockchain()
        .put_storage_item(StorageKey::new(context.script_hash, key), StorageItem::new(value));
    Ok(Vec::new())
}

pub(super) fn delete(
    engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    engine.require_application_trigger()?;
    let key = key_arg(&args[0])?;
    let context = args[1].as_storage_context()?;
    check_storage_context(engine, &context)?;
    engine
        .blockchain()
        .delete_storage_item(&StorageKey::new(context.script_hash, key));
    Ok(Vec::new())
}
