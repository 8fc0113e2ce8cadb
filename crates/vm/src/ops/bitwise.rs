//! Bitwise opcodes and the structural EQUAL.

use super::{DecodedOp, OpArgs, OpOutput};
use crate::execution_context::ExecutionContext;
use crate::execution_engine::ExecutionEngine;
use crate::op_code::OpCode;
use crate::stack_item::StackItem;
use crate::{VmError, VmResult};
use num_bigint::BigInt;

pub(super) fn decode(op: OpCode) -> VmResult<DecodedOp> {
    Ok(match op {
        OpCode::INVERT => DecodedOp::simple(op, 1, 1, invert),
        OpCode::AND => DecodedOp::simple(op, 2, 1, and),
        OpCode::OR => DecodedOp::simple(op, 2, 1, or),
        OpCode::XOR => DecodedOp::simple(op, 2, 1, xor),
        OpCode::EQUAL => DecodedOp::simple(op, 2, 1, equal),
        other => {
            return Err(VmError::UnknownOpCode {
                opcode: other.as_byte(),
            })
        }
    })
}

fn invert(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    let value = args.main[0].as_bigint()?;
    // Two's-complement inversion.
    Ok(OpOutput::one(StackItem::Integer(-value - BigInt::from(1))))
}

fn binary_op(
    args: &OpArgs,
    op: impl FnOnce(BigInt, BigInt) -> BigInt,
) -> VmResult<OpOutput> {
    let b = args.main[0].as_bigint()?;
    let a = args.main[1].as_bigint()?;
    Ok(OpOutput::one(StackItem::Integer(op(a, b))))
}

fn and(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    binary_op(&args, |a, b| a & b)
}

fn or(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    binary_op(&args, |a, b| a | b)
}

fn xor(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    binary_op(&args, |a, b| a ^ b)
}

fn equal(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    Ok(OpOutput::one(StackItem::Boolean(
        args.main[0].equals(&args.main[1]),
    )))
}
