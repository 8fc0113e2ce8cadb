//! Collection opcodes.

use super::{DecodedOp, OpArgs, OpOutput};
use crate::execution_context::ExecutionContext;
use crate::execution_engine::ExecutionEngine;
use crate::op_code::OpCode;
use crate::stack_item::{check_array_size, StackItem};
use crate::{VmError, VmResult};

pub(super) fn decode(op: OpCode, ctx: &ExecutionContext) -> VmResult<DecodedOp> {
    Ok(match op {
        OpCode::ARRAYSIZE => DecodedOp::simple(op, 1, 1, array_size),
        OpCode::PACK => {
            // The count under the top of the stack fixes the arity.
            let count = ctx.stack.peek(0)?.as_index("PACK")?;
            check_array_size(count)?;
            DecodedOp::simple(op, 1 + count, 1, pack)
        }
        OpCode::UNPACK => {
            // The element count is only known when the top is a compound.
            let num_out = match ctx.stack.peek(0)?.as_array() {
                Ok(array) => array.len() + 1,
                Err(_) => 1,
            };
            DecodedOp::simple(op, 1, num_out, unpack)
        }
        OpCode::PICKITEM => DecodedOp::simple(op, 2, 1, pick_item),
        OpCode::SETITEM => DecodedOp::simple(op, 3, 0, set_item),
        OpCode::NEWARRAY => DecodedOp::simple(op, 1, 1, new_array),
        OpCode::NEWSTRUCT => DecodedOp::simple(op, 1, 1, new_struct),
        other => {
            return Err(VmError::UnknownOpCode {
                opcode: other.as_byte(),
            })
        }
    })
}

fn array_size(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    let length = match args.main[0].as_array() {
        Ok(array) => array.len(),
        Err(_) => args.main[0].as_bytes()?.len(),
    };
    Ok(OpOutput::one(StackItem::integer(length as i64)))
}

fn pack(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    mut args: OpArgs,
) -> VmResult<OpOutput> {
    // args[0] is the count; the remaining items become the array, former
    // top first.
    args.main.remove(0);
    Ok(OpOutput::one(StackItem::array(args.main)))
}

fn unpack(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    let array = args.main[0].as_array()?;
    let items = array.items();
    let count = items.len();
    let mut results: Vec<StackItem> = items.into_iter().rev().collect();
    results.push(StackItem::integer(count as i64));
    Ok(OpOutput::many(results))
}

fn pick_item(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    let index = args.main[0].as_index("PICKITEM")?;
    let array = args.main[1].as_array()?;
    Ok(OpOutput::one(array.get(index)?))
}

fn set_item(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    mut args: OpArgs,
) -> VmResult<OpOutput> {
    let value = args.main.remove(0);
    let index = args.main[0].as_index("SETITEM")?;
    let array = args.main[1].as_array()?;
    // Structs are stored as deep copies; everything else keeps identity.
    let stored = value.clone_for_struct();
    array.set(index, stored)?;
    Ok(OpOutput::none())
}

fn new_array(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    Ok(OpOutput::one(StackItem::array(default_items(&args)?)))
}

fn new_struct(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    Ok(OpOutput::one(StackItem::structured(default_items(&args)?)))
}

fn default_items(args: &OpArgs) -> VmResult<Vec<StackItem>> {
    let count = args.main[0].as_index("NEWARRAY")?;
    check_array_size(count)?;
    Ok(vec![StackItem::Boolean(false); count])
}
