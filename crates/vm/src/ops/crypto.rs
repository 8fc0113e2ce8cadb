//! Hash and signature opcodes.

use super::{DecodedOp, OpArgs, OpOutput};
use crate::execution_context::ExecutionContext;
use crate::execution_engine::ExecutionEngine;
use crate::limits::{fee, MAX_ARRAY_SIZE};
use crate::op_code::OpCode;
use crate::stack_item::StackItem;
use crate::{VmError, VmResult};
use neo_cryptography::{ecdsa, hash, ECPoint};

pub(super) fn decode(op: OpCode, ctx: &ExecutionContext) -> VmResult<DecodedOp> {
    Ok(match op {
        OpCode::SHA1 => DecodedOp::simple(op, 1, 1, sha1),
        OpCode::SHA256 => DecodedOp::simple(op, 1, 1, sha256),
        OpCode::HASH160 => DecodedOp::simple(op, 1, 1, hash160),
        OpCode::HASH256 => DecodedOp::simple(op, 1, 1, hash256),
        OpCode::CHECKSIG => {
            DecodedOp::simple(op, 2, 1, check_sig).with_fee(fee::SIGNATURE_VERIFY)
        }
        OpCode::CHECKMULTISIG => {
            // Two stack-encoded groups, keys on top of signatures; the
            // arity must be discovered before anything is popped.
            let (key_slots, key_count) = group_shape(ctx, 0)?;
            let (sig_slots, _) = group_shape(ctx, key_slots)?;
            DecodedOp::simple(op, key_slots + sig_slots, 1, check_multisig)
                .with_fee(fee::SIGNATURE_VERIFY * key_count.max(1) as i64)
        }
        other => {
            return Err(VmError::UnknownOpCode {
                opcode: other.as_byte(),
            })
        }
    })
}

/// Shape of a group argument starting at `depth`: either one Array item or
/// a count followed by that many items. Returns (slots occupied, element
/// count).
fn group_shape(ctx: &ExecutionContext, depth: usize) -> VmResult<(usize, usize)> {
    let head = ctx.stack.peek(depth)?;
    match head.as_array() {
        Ok(array) => Ok((1, array.len())),
        Err(_) => {
            let count = head.as_index("CHECKMULTISIG")?;
            if count > MAX_ARRAY_SIZE {
                return Err(VmError::ArrayTooLarge {
                    size: count,
                    max: MAX_ARRAY_SIZE,
                });
            }
            Ok((1 + count, count))
        }
    }
}

fn hash_op(args: &OpArgs, digest: impl FnOnce(&[u8]) -> Vec<u8>) -> VmResult<OpOutput> {
    let data = args.main[0].as_bytes()?;
    Ok(OpOutput::one(StackItem::ByteArray(digest(&data))))
}

fn sha1(_e: &mut ExecutionEngine, _c: &mut ExecutionContext, args: OpArgs) -> VmResult<OpOutput> {
    hash_op(&args, |data| hash::sha1(data).to_vec())
}

fn sha256(_e: &mut ExecutionEngine, _c: &mut ExecutionContext, args: OpArgs) -> VmResult<OpOutput> {
    hash_op(&args, |data| hash::sha256(data).to_vec())
}

fn hash160(
    _e: &mut ExecutionEngine,
    _c: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    hash_op(&args, |data| hash::hash160(data).to_vec())
}

fn hash256(
    _e: &mut ExecutionEngine,
    _c: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    hash_op(&args, |data| hash::hash256(data).to_vec())
}

fn check_sig(
    engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    let message = engine.container_message()?;
    let result = verify_one(&message, &args.main[0], &args.main[1]);
    Ok(OpOutput::one(StackItem::Boolean(result)))
}

/// A malformed key or signature fails the check rather than faulting.
fn verify_one(message: &[u8], key_item: &StackItem, sig_item: &StackItem) -> bool {
    let Ok(key) = key_item.as_ec_point() else {
        return false;
    };
    let Ok(signature) = sig_item.as_bytes() else {
        return false;
    };
    verify_point(message, &key, &signature)
}

fn verify_point(message: &[u8], key: &ECPoint, signature: &[u8]) -> bool {
    ecdsa::verify_signature(message, signature, key).unwrap_or(false)
}

/// Reads one group out of the popped arguments, advancing the cursor.
fn take_group(args: &[StackItem], cursor: &mut usize) -> VmResult<Vec<StackItem>> {
    let head = &args[*cursor];
    *cursor += 1;
    match head.as_array() {
        Ok(array) => Ok(array.items()),
        Err(_) => {
            let count = head.as_index("CHECKMULTISIG")?;
            let group = args[*cursor..*cursor + count].to_vec();
            *cursor += count;
            Ok(group)
        }
    }
}

fn check_multisig(
    engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    let mut cursor = 0;
    let key_items = take_group(&args.main, &mut cursor)?;
    let sig_items = take_group(&args.main, &mut cursor)?;
    let message = engine.container_message()?;

    let mut keys = Vec::with_capacity(key_items.len());
    for item in &key_items {
        match item.as_ec_point() {
            Ok(point) => keys.push(point),
            Err(_) => return Ok(OpOutput::one(StackItem::Boolean(false))),
        }
    }
    let mut signatures = Vec::with_capacity(sig_items.len());
    for item in &sig_items {
        signatures.push(item.as_bytes()?);
    }

    if signatures.is_empty() || signatures.len() > keys.len() {
        return Ok(OpOutput::one(StackItem::Boolean(false)));
    }

    // Single forward pass: each signature must match a later key than the
    // previous one.
    let mut i = 0;
    let mut j = 0;
    let mut ok = true;
    while ok && i < signatures.len() && j < keys.len() {
        if verify_point(&message, &keys[j], &signatures[i]) {
            i += 1;
        }
        j += 1;
        if signatures.len() - i > keys.len() - j {
            ok = false;
        }
    }
    Ok(OpOutput::one(StackItem::Boolean(ok && i == signatures.len())))
}
