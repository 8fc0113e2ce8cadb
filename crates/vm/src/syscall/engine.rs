//! `System.ExecutionEngine.*`: introspection of the running invocation.

use crate::execution_context::ExecutionContext;
use crate::execution_engine::ExecutionEngine;
use crate::stack_item::{InteropObject, StackItem};
use crate::{VmError, VmResult};
use neo_ledger::ScriptContainer;

pub(super) fn get_script_container(
    engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    _args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    let item = match engine.container() {
        Some(ScriptContainer::Transaction(tx)) => {
            StackItem::Interop(InteropObject::Transaction(tx.clone()))
        }
        Some(ScriptContainer::Block(block)) => {
            StackItem::Interop(InteropObject::Block(block.clone()))
        }
        None => return Err(VmError::UnexpectedScriptContainer),
    };
    Ok(vec![item])
}

pub(super) fn get_executing_script_hash(
    _engine: &mut ExecutionEngine,
    ctx: &mut ExecutionContext,
    _args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    Ok(vec![StackItem::Interop(InteropObject::Hash160(
        ctx.script_hash(),
    ))])
}

/// The root frame has no caller; scripts receive an empty byte string.
pub(super) fn get_calling_script_hash(
    _engine: &mut ExecutionEngine,
    ctx: &mut ExecutionContext,
    _args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    Ok(vec![match ctx.calling_script_hash {
        Some(hash) => StackItem::Interop(InteropObject::Hash160(hash)),
        None => StackItem::bytes(Vec::new()),
    }])
}

pub(super) fn get_entry_script_hash(
    _engine: &mut ExecutionEngine,
    ctx: &mut ExecutionContext,
    _args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    Ok(vec![StackItem::Interop(InteropObject::Hash160(
        ctx.entry_script_hash,
    ))])
}
