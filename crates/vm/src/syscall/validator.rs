//! `Neo.Validator.Register`: consensus-candidate registration.

use super::signature_redeem_script;
use crate::execution_context::ExecutionContext;
use crate::execution_engine::ExecutionEngine;
use crate::stack_item::{InteropObject, StackItem};
use crate::{VmError, VmResult};
use neo_core::UInt160;
use neo_cryptography::hash;
use neo_ledger::Validator;
use std::sync::Arc;

pub(super) fn register(
    engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    let public_key = args[0].as_ec_point()?;
    if public_key.is_infinity() {
        return Err(VmError::invalid_arguments(
            "Validator.Register",
            "infinity is not a validator key",
        ));
    }
    let owner = UInt160::from(hash::hash160(&signature_redeem_script(&public_key)));
    if !engine.check_witness(&owner)? {
        return Err(VmError::BadWitness);
    }
    engine.require_application_trigger()?;

    let validator = match engine.blockchain().try_get_validator(&public_key) {
        Some(existing) => existing,
        None => {
            let validator = Validator::new(public_key);
            engine.blockchain().put_validator(validator.clone());
            validator
        }
    };
    Ok(vec![StackItem::Interop(InteropObject::Validator(Arc::new(
        validator,
    )))])
}
