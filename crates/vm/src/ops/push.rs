//! Constant-push opcodes.

use super::{DecodedOp, OpArgs, OpOutput};
use crate::execution_context::ExecutionContext;
use crate::execution_engine::ExecutionEngine;
use crate::limits::MAX_ITEM_SIZE;
use crate::op_code::OpCode;
use crate::stack_item::{bigint_from_bytes, bigint_to_bytes, StackItem};
use crate::{VmError, VmResult};
use num_bigint::BigInt;

pub(super) fn decode(op: OpCode, ctx: &mut ExecutionContext) -> VmResult<DecodedOp> {
    let byte = op.as_byte();
    match op {
        OpCode::PUSH0 => Ok(DecodedOp::simple(op, 0, 1, push_bytes)),
        OpCode::PUSHM1 => Ok(DecodedOp::simple(op, 0, 1, push_int)
            .with_operand(bigint_to_bytes(&BigInt::from(-1)))),
        _ if byte >= OpCode::PUSH1.as_byte() && byte <= OpCode::PUSH16.as_byte() => {
            let value = BigInt::from(byte - OpCode::PUSH1.as_byte() + 1);
            Ok(DecodedOp::simple(op, 0, 1, push_int).with_operand(bigint_to_bytes(&value)))
        }
        _ if byte >= OpCode::PUSHBYTES1.as_byte() && byte <= OpCode::PUSHBYTES75.as_byte() => {
            let operand = read_operand(ctx, byte as usize)?;
            Ok(DecodedOp::simple(op, 0, 1, push_bytes).with_operand(operand))
        }
        OpCode::PUSHDATA1 => {
            let length = ctx.script.byte_at(ctx.pc)? as usize;
            ctx.pc += 1;
            decode_data(op, ctx, length)
        }
        OpCode::PUSHDATA2 => {
            let bytes = read_operand(ctx, 2)?;
            let length = u16::from_le_bytes([bytes[0], bytes[1]]) as usize;
            decode_data(op, ctx, length)
        }
        OpCode::PUSHDATA4 => {
            let bytes = read_operand(ctx, 4)?;
            let length = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
            decode_data(op, ctx, length)
        }
        other => Err(VmError::UnknownOpCode {
            opcode: other.as_byte(),
        }),
    }
}

fn decode_data(op: OpCode, ctx: &mut ExecutionContext, length: usize) -> VmResult<DecodedOp> {
    if length > MAX_ITEM_SIZE {
        return Err(VmError::ItemTooLarge {
            size: length,
            max: MAX_ITEM_SIZE,
        });
    }
    let operand = read_operand(ctx, length)?;
    Ok(DecodedOp::simple(op, 0, 1, push_bytes).with_operand(operand))
}

fn read_operand(ctx: &mut ExecutionContext, count: usize) -> VmResult<Vec<u8>> {
    let bytes = ctx.script.slice(ctx.pc, count)?.to_vec();
    ctx.pc += count;
    Ok(bytes)
}

fn push_bytes(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    Ok(OpOutput::one(StackItem::ByteArray(args.operand)))
}

fn push_int(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    Ok(OpOutput::one(StackItem::Integer(bigint_from_bytes(
        &args.operand,
    ))))
}
