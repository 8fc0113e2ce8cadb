//! `Neo.Contract.*`: deployment, migration and the storage-context
//! capability.

use crate::execution_context::ExecutionContext;
use crate::execution_engine::ExecutionEngine;
use crate::limits::MAX_SCRIPT_LENGTH;
use crate::stack_item::{InteropObject, StackItem};
use crate::{VmError, VmResult};
use crate::stack_item::StorageContext;
use neo_ledger::{Contract, ContractParameterType, ContractPropertyState, StorageKey};
use std::sync::Arc;
use tracing::debug;

const MAX_METADATA_LENGTH: usize = 252;
const MAX_DESCRIPTION_LENGTH: usize = 65536;

/// Arguments, top-first: description, email, author, code version, name,
/// properties, return type, parameter list, script.
fn parse_contract(args: &[StackItem]) -> VmResult<Contract> {
    let script = args[8].as_bytes()?;
    if script.len() > MAX_SCRIPT_LENGTH {
        return Err(VmError::ScriptTooLarge {
            size: script.len(),
            max: MAX_SCRIPT_LENGTH,
        });
    }

    let parameter_bytes = args[7].as_bytes()?;
    let mut parameter_list = Vec::with_capacity(parameter_bytes.len());
    for byte in parameter_bytes {
        parameter_list.push(
            ContractParameterType::from_byte(byte)
                .map_err(|e| VmError::invalid_arguments("Contract.Create", e.to_string()))?,
        );
    }
    let return_type = ContractParameterType::from_byte(args[6].as_i64()? as u8)
        .map_err(|e| VmError::invalid_arguments("Contract.Create", e.to_string()))?;
    let properties = ContractPropertyState(args[5].as_i64()? as u8);

    Ok(Contract {
        script,
        parameter_list,
        return_type,
        properties,
        name: metadata_string(&args[4], MAX_METADATA_LENGTH)?,
        code_version: metadata_string(&args[3], MAX_METADATA_LENGTH)?,
        author: metadata_string(&args[2], MAX_METADATA_LENGTH)?,
        email: metadata_string(&args[1], MAX_METADATA_LENGTH)?,
        description: metadata_string(&args[0], MAX_DESCRIPTION_LENGTH)?,
    })
}

fn metadata_string(item: &StackItem, max: usize) -> VmResult<String> {
    let bytes = item.as_bytes()?;
    if bytes.len() > max {
        return Err(VmError::ItemTooLarge {
            size: bytes.len(),
            max,
        });
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Deploys the contract if its script hash is new; a redeploy of an
/// existing hash returns the existing state untouched.
fn get_or_create(
    engine: &mut ExecutionEngine,
    ctx: &ExecutionContext,
    contract: Contract,
) -> VmResult<(Contract, bool)> {
    engine.require_application_trigger()?;
    let hash = contract.script_hash();
    if let Some(existing) = engine.blockchain().try_get_contract(&hash) {
        return Ok((existing, false));
    }
    debug!(target: "vm", contract = %hash, creator = %ctx.script_hash(), "contract created");
    engine.blockchain().put_contract(contract.clone());
    engine.record_created_contract(hash, ctx.script_hash());
    Ok((contract, true))
}

pub(super) fn create(
    engine: &mut ExecutionEngine,
    ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    let (contract, _) = get_or_create(engine, ctx, parse_contract(&args)?)?;
    Ok(vec![StackItem::Interop(InteropObject::Contract(Arc::new(
        contract,
    )))])
}

/// Like `create`, but a newly created storage-enabled contract inherits
/// the storage entries of the migrating contract.
pub(super) fn migrate(
    engine: &mut ExecutionEngine,
    ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    let (contract, created) = get_or_create(engine, ctx, parse_contract(&args)?)?;
    if created && contract.has_storage() {
        let new_hash = contract.script_hash();
        let source = ctx.script_hash();
        for (key, item) in engine.blockchain().storage_items_of(&source) {
            engine
                .blockchain()
                .put_storage_item(StorageKey::new(new_hash, key.key), item);
        }
    }
    Ok(vec![StackItem::Interop(InteropObject::Contract(Arc::new(
        contract,
    )))])
}

/// The storage context of a contract is handed out only to the script
/// that created it within this run.
pub(super) fn get_storage_context(
    engine: &mut ExecutionEngine,
    ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    let contract = args[0].as_contract()?;
    let hash = contract.script_hash();
    match engine.contract_creator(&hash) {
        Some(creator) if creator == ctx.script_hash() => Ok(vec![StackItem::Interop(
            InteropObject::StorageContext(StorageContext { script_hash: hash }),
        )]),
        _ => Err(VmError::InvalidStorageContext),
    }
}

/// Removes the executing contract and all of its storage.
pub(super) fn destroy(
    engine: &mut ExecutionEngine,
    ctx: &mut ExecutionContext,
    _args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    engine.require_application_trigger()?;
    let hash = ctx.script_hash();
    if let Some(contract) = engine.blockchain().try_get_contract(&hash) {
        engine.blockchain().delete_contract(&hash);
        if contract.has_storage() {
            for (key, _) in engine.blockchain().storage_items_of(&hash) {
                engine.blockchain().delete_storage_item(&key);
            }
        }
        debug!(target: "vm", contract = %hash, "contract destroyed");
    }
    Ok(Vec::new())
}
