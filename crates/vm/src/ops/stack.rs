//! Alt-stack moves and stack shuffling.

use super::{DecodedOp, OpArgs, OpOutput};
use crate::execution_context::ExecutionContext;
use crate::execution_engine::ExecutionEngine;
use crate::op_code::OpCode;
use crate::stack_item::StackItem;
use crate::{VmError, VmResult};

pub(super) fn decode(op: OpCode) -> VmResult<DecodedOp> {
    Ok(match op {
        OpCode::TOALTSTACK => DecodedOp::simple(op, 1, 0, to_alt).with_alt(0, 1),
        OpCode::FROMALTSTACK => DecodedOp::simple(op, 0, 1, from_alt).with_alt(1, 0),
        OpCode::DUPFROMALTSTACK => DecodedOp::simple(op, 0, 1, dup_from_alt).with_alt(1, 1),
        OpCode::XDROP => DecodedOp::simple(op, 1, 0, xdrop).with_modify(-1),
        OpCode::XSWAP => DecodedOp::simple(op, 1, 0, xswap),
        OpCode::XTUCK => DecodedOp::simple(op, 1, 0, xtuck).with_modify(1),
        OpCode::DEPTH => DecodedOp::simple(op, 0, 1, depth),
        OpCode::DROP => DecodedOp::simple(op, 1, 0, drop_top),
        OpCode::DUP => DecodedOp::simple(op, 1, 2, dup),
        OpCode::NIP => DecodedOp::simple(op, 2, 1, nip),
        OpCode::OVER => DecodedOp::simple(op, 2, 3, over),
        OpCode::PICK => DecodedOp::simple(op, 1, 1, pick),
        OpCode::ROLL => DecodedOp::simple(op, 1, 1, roll).with_modify(-1),
        OpCode::ROT => DecodedOp::simple(op, 3, 3, rot),
        OpCode::SWAP => DecodedOp::simple(op, 2, 2, swap),
        OpCode::TUCK => DecodedOp::simple(op, 2, 3, tuck),
        other => {
            return Err(VmError::UnknownOpCode {
                opcode: other.as_byte(),
            })
        }
    })
}

fn to_alt(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    mut args: OpArgs,
) -> VmResult<OpOutput> {
    Ok(OpOutput {
        main: Vec::new(),
        alt: vec![args.main.remove(0)],
    })
}

fn from_alt(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    mut args: OpArgs,
) -> VmResult<OpOutput> {
    Ok(OpOutput::one(args.alt.remove(0)))
}

fn dup_from_alt(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    mut args: OpArgs,
) -> VmResult<OpOutput> {
    let item = args.alt.remove(0);
    Ok(OpOutput {
        main: vec![item.clone()],
        alt: vec![item],
    })
}

fn xdrop(
    _engine: &mut ExecutionEngine,
    ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    let n = args.main[0].as_index("XDROP")?;
    ctx.stack.remove(n)?;
    Ok(OpOutput::none())
}

fn xswap(
    _engine: &mut ExecutionEngine,
    ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    let n = args.main[0].as_index("XSWAP")?;
    ctx.stack.swap(n)?;
    Ok(OpOutput::none())
}

fn xtuck(
    _engine: &mut ExecutionEngine,
    ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    let n = args.main[0].as_index("XTUCK")?;
    let top = ctx.stack.peek(0)?;
    ctx.stack.insert(n, top)?;
    Ok(OpOutput::none())
}

fn depth(
    _engine: &mut ExecutionEngine,
    ctx: &mut ExecutionContext,
    _args: OpArgs,
) -> VmResult<OpOutput> {
    Ok(OpOutput::one(StackItem::integer(ctx.stack.len() as i64)))
}

fn drop_top(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    _args: OpArgs,
) -> VmResult<OpOutput> {
    Ok(OpOutput::none())
}

fn dup(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    mut args: OpArgs,
) -> VmResult<OpOutput> {
    let item = args.main.remove(0);
    Ok(OpOutput::many(vec![item.clone(), item]))
}

fn nip(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    mut args: OpArgs,
) -> VmResult<OpOutput> {
    Ok(OpOutput::one(args.main.remove(0)))
}

fn over(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    // x1 x2 -> x1 x2 x1
    let [top, below] = take_two(args);
    Ok(OpOutput::many(vec![below.clone(), top, below]))
}

fn pick(
    _engine: &mut ExecutionEngine,
    ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    let n = args.main[0].as_index("PICK")?;
    Ok(OpOutput::one(ctx.stack.peek(n)?))
}

fn roll(
    _engine: &mut ExecutionEngine,
    ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    let n = args.main[0].as_index("ROLL")?;
    Ok(OpOutput::one(ctx.stack.remove(n)?))
}

fn rot(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    mut args: OpArgs,
) -> VmResult<OpOutput> {
    // x1 x2 x3 -> x2 x3 x1
    let x3 = args.main.remove(0);
    let x2 = args.main.remove(0);
    let x1 = args.main.remove(0);
    Ok(OpOutput::many(vec![x2, x3, x1]))
}

fn swap(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    let [top, below] = take_two(args);
    Ok(OpOutput::many(vec![top, below]))
}

fn tuck(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    // x1 x2 -> x2 x1 x2
    let [top, below] = take_two(args);
    Ok(OpOutput::many(vec![top.clone(), below, top]))
}

fn take_two(mut args: OpArgs) -> [StackItem; 2] {
    let top = args.main.remove(0);
    let below = args.main.remove(0);
    [top, below]
}
