//! `Neo.Runtime.*`: trigger introspection, witness checks and actions.

use super::signature_redeem_script;
use crate::execution_context::ExecutionContext;
use crate::execution_engine::ExecutionEngine;
use crate::stack_item::StackItem;
use crate::{VmError, VmResult};
use neo_core::UInt160;
use neo_cryptography::{hash, ECPoint};

pub(super) fn get_trigger(
    engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    _args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    Ok(vec![StackItem::integer(engine.trigger().as_byte())])
}

/// The argument is either a 20-byte script hash or a 33-byte public key;
/// a key is reduced to the hash of its single-signature redeem script.
pub(super) fn check_witness(
    engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    let bytes = args[0].as_bytes()?;
    let hash = match bytes.len() {
        20 => UInt160::from_bytes(&bytes)
            .map_err(|e| VmError::invalid_arguments("CheckWitness", e.to_string()))?,
        33 => {
            let point = ECPoint::decode(&bytes)
                .map_err(|e| VmError::invalid_arguments("CheckWitness", e.to_string()))?;
            UInt160::from(hash::hash160(&signature_redeem_script(&point)))
        }
        other => {
            return Err(VmError::invalid_arguments(
                "CheckWitness",
                format!("expected 20 or 33 bytes, got {other}"),
            ))
        }
    };
    Ok(vec![StackItem::Boolean(engine.check_witness(&hash)?)])
}

pub(super) fn notify(
    engine: &mut ExecutionEngine,
    ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    let parameter = args[0].to_contract_parameter()?;
    engine.emit_notification(ctx.script_hash(), parameter);
    Ok(Vec::new())
}

pub(super) fn log(
    engine: &mut ExecutionEngine,
    ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    let message = String::from_utf8_lossy(&args[0].as_bytes()?).into_owned();
    engine.emit_log(ctx.script_hash(), message);
    Ok(Vec::new())
}
