//! Arithmetic, comparison and boolean opcodes.
//!
//! Integers are arbitrary-precision; DIV truncates toward zero and MOD
//! takes the sign of the dividend.

use super::{DecodedOp, OpArgs, OpOutput};
use crate::execution_context::ExecutionContext;
use crate::execution_engine::ExecutionEngine;
use crate::limits::MAX_SHIFT;
use crate::op_code::OpCode;
use crate::stack_item::StackItem;
use crate::{VmError, VmResult};
use num_bigint::BigInt;
use num_traits::{Signed, Zero};

pub(super) fn decode(op: OpCode) -> VmResult<DecodedOp> {
    Ok(match op {
        OpCode::INC => DecodedOp::simple(op, 1, 1, inc),
        OpCode::DEC => DecodedOp::simple(op, 1, 1, dec),
        OpCode::SIGN => DecodedOp::simple(op, 1, 1, sign),
        OpCode::NEGATE => DecodedOp::simple(op, 1, 1, negate),
        OpCode::ABS => DecodedOp::simple(op, 1, 1, abs),
        OpCode::NOT => DecodedOp::simple(op, 1, 1, not),
        OpCode::NZ => DecodedOp::simple(op, 1, 1, nz),
        OpCode::ADD => DecodedOp::simple(op, 2, 1, add),
        OpCode::SUB => DecodedOp::simple(op, 2, 1, sub),
        OpCode::MUL => DecodedOp::simple(op, 2, 1, mul),
        OpCode::DIV => DecodedOp::simple(op, 2, 1, div),
        OpCode::MOD => DecodedOp::simple(op, 2, 1, rem),
        OpCode::SHL => DecodedOp::simple(op, 2, 1, shl),
        OpCode::SHR => DecodedOp::simple(op, 2, 1, shr),
        OpCode::BOOLAND => DecodedOp::simple(op, 2, 1, bool_and),
        OpCode::BOOLOR => DecodedOp::simple(op, 2, 1, bool_or),
        OpCode::NUMEQUAL => DecodedOp::simple(op, 2, 1, num_equal),
        OpCode::NUMNOTEQUAL => DecodedOp::simple(op, 2, 1, num_not_equal),
        OpCode::LT => DecodedOp::simple(op, 2, 1, lt),
        OpCode::GT => DecodedOp::simple(op, 2, 1, gt),
        OpCode::LTE => DecodedOp::simple(op, 2, 1, lte),
        OpCode::GTE => DecodedOp::simple(op, 2, 1, gte),
        OpCode::MIN => DecodedOp::simple(op, 2, 1, min),
        OpCode::MAX => DecodedOp::simple(op, 2, 1, max),
        OpCode::WITHIN => DecodedOp::simple(op, 3, 1, within),
        other => {
            return Err(VmError::UnknownOpCode {
                opcode: other.as_byte(),
            })
        }
    })
}

fn unary(args: &OpArgs, op: impl FnOnce(BigInt) -> BigInt) -> VmResult<OpOutput> {
    let value = args.main[0].as_bigint()?;
    Ok(OpOutput::one(StackItem::Integer(op(value))))
}

/// Pops the two operands: the top of the stack is the right-hand side.
fn operands(args: &OpArgs) -> VmResult<(BigInt, BigInt)> {
    let b = args.main[0].as_bigint()?;
    let a = args.main[1].as_bigint()?;
    Ok((a, b))
}

fn binary(args: &OpArgs, op: impl FnOnce(BigInt, BigInt) -> BigInt) -> VmResult<OpOutput> {
    let (a, b) = operands(args)?;
    Ok(OpOutput::one(StackItem::Integer(op(a, b))))
}

fn compare(args: &OpArgs, op: impl FnOnce(&BigInt, &BigInt) -> bool) -> VmResult<OpOutput> {
    let (a, b) = operands(args)?;
    Ok(OpOutput::one(StackItem::Boolean(op(&a, &b))))
}

fn inc(_e: &mut ExecutionEngine, _c: &mut ExecutionContext, args: OpArgs) -> VmResult<OpOutput> {
    unary(&args, |n| n + 1)
}

fn dec(_e: &mut ExecutionEngine, _c: &mut ExecutionContext, args: OpArgs) -> VmResult<OpOutput> {
    unary(&args, |n| n - 1)
}

fn sign(_e: &mut ExecutionEngine, _c: &mut ExecutionContext, args: OpArgs) -> VmResult<OpOutput> {
    unary(&args, |n| n.signum())
}

fn negate(_e: &mut ExecutionEngine, _c: &mut ExecutionContext, args: OpArgs) -> VmResult<OpOutput> {
    unary(&args, |n| -n)
}

fn abs(_e: &mut ExecutionEngine, _c: &mut ExecutionContext, args: OpArgs) -> VmResult<OpOutput> {
    unary(&args, |n| n.abs())
}

fn not(_e: &mut ExecutionEngine, _c: &mut ExecutionContext, args: OpArgs) -> VmResult<OpOutput> {
    Ok(OpOutput::one(StackItem::Boolean(!args.main[0].as_bool()?)))
}

fn nz(_e: &mut ExecutionEngine, _c: &mut ExecutionContext, args: OpArgs) -> VmResult<OpOutput> {
    let value = args.main[0].as_bigint()?;
    Ok(OpOutput::one(StackItem::Boolean(!value.is_zero())))
}

fn add(_e: &mut ExecutionEngine, _c: &mut ExecutionContext, args: OpArgs) -> VmResult<OpOutput> {
    binary(&args, |a, b| a + b)
}

fn sub(_e: &mut ExecutionEngine, _c: &mut ExecutionContext, args: OpArgs) -> VmResult<OpOutput> {
    binary(&args, |a, b| a - b)
}

fn mul(_e: &mut ExecutionEngine, _c: &mut ExecutionContext, args: OpArgs) -> VmResult<OpOutput> {
    binary(&args, |a, b| a * b)
}

fn div(_e: &mut ExecutionEngine, _c: &mut ExecutionContext, args: OpArgs) -> VmResult<OpOutput> {
    let (a, b) = operands(&args)?;
    if b.is_zero() {
        return Err(VmError::DivisionByZero);
    }
    Ok(OpOutput::one(StackItem::Integer(a / b)))
}

fn rem(_e: &mut ExecutionEngine, _c: &mut ExecutionContext, args: OpArgs) -> VmResult<OpOutput> {
    let (a, b) = operands(&args)?;
    if b.is_zero() {
        return Err(VmError::DivisionByZero);
    }
    Ok(OpOutput::one(StackItem::Integer(a % b)))
}

fn shift_count(item: &StackItem) -> VmResult<i64> {
    let count = item.as_i64()?;
    if count > MAX_SHIFT || count < -MAX_SHIFT {
        return Err(VmError::invalid_arguments(
            "shift",
            format!("count {count} exceeds {MAX_SHIFT}"),
        ));
    }
    Ok(count)
}

fn shift_left(value: BigInt, count: i64) -> BigInt {
    if count >= 0 {
        value << (count as u64)
    } else {
        value >> ((-count) as u64)
    }
}

fn shl(_e: &mut ExecutionEngine, _c: &mut ExecutionContext, args: OpArgs) -> VmResult<OpOutput> {
    let count = shift_count(&args.main[0])?;
    let value = args.main[1].as_bigint()?;
    Ok(OpOutput::one(StackItem::Integer(shift_left(value, count))))
}

fn shr(_e: &mut ExecutionEngine, _c: &mut ExecutionContext, args: OpArgs) -> VmResult<OpOutput> {
    let count = shift_count(&args.main[0])?;
    let value = args.main[1].as_bigint()?;
    Ok(OpOutput::one(StackItem::Integer(shift_left(value, -count))))
}

fn bool_and(
    _e: &mut ExecutionEngine,
    _c: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    let b = args.main[0].as_bool()?;
    let a = args.main[1].as_bool()?;
    Ok(OpOutput::one(StackItem::Boolean(a && b)))
}

fn bool_or(
    _e: &mut ExecutionEngine,
    _c: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    let b = args.main[0].as_bool()?;
    let a = args.main[1].as_bool()?;
    Ok(OpOutput::one(StackItem::Boolean(a || b)))
}

fn num_equal(
    _e: &mut ExecutionEngine,
    _c: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    compare(&args, |a, b| a == b)
}

fn num_not_equal(
    _e: &mut ExecutionEngine,
    _c: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    compare(&args, |a, b| a != b)
}

fn lt(_e: &mut ExecutionEngine, _c: &mut ExecutionContext, args: OpArgs) -> VmResult<OpOutput> {
    compare(&args, |a, b| a < b)
}

fn gt(_e: &mut ExecutionEngine, _c: &mut ExecutionContext, args: OpArgs) -> VmResult<OpOutput> {
    compare(&args, |a, b| a > b)
}

fn lte(_e: &mut ExecutionEngine, _c: &mut ExecutionContext, args: OpArgs) -> VmResult<OpOutput> {
    compare(&args, |a, b| a <= b)
}

fn gte(_e: &mut ExecutionEngine, _c: &mut ExecutionContext, args: OpArgs) -> VmResult<OpOutput> {
    compare(&args, |a, b| a >= b)
}

fn min(_e: &mut ExecutionEngine, _c: &mut ExecutionContext, args: OpArgs) -> VmResult<OpOutput> {
    binary(&args, BigInt::min)
}

fn max(_e: &mut ExecutionEngine, _c: &mut ExecutionContext, args: OpArgs) -> VmResult<OpOutput> {
    binary(&args, BigInt::max)
}

fn within(_e: &mut ExecutionEngine, _c: &mut ExecutionContext, args: OpArgs) -> VmResult<OpOutput> {
    // x a b WITHIN pushes a <= x < b.
    let upper = args.main[0].as_bigint()?;
    let lower = args.main[1].as_bigint()?;
    let x = args.main[2].as_bigint()?;
    Ok(OpOutput::one(StackItem::Boolean(lower <= x && x < upper)))
}
