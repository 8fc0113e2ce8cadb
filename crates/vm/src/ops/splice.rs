//! Byte-string opcodes.

use super::{DecodedOp, OpArgs, OpOutput};
use crate::execution_context::ExecutionContext;
use crate::execution_engine::ExecutionEngine;
use crate::limits::MAX_ITEM_SIZE;
use crate::op_code::OpCode;
use crate::stack_item::StackItem;
use crate::{VmError, VmResult};

pub(super) fn decode(op: OpCode) -> VmResult<DecodedOp> {
    Ok(match op {
        OpCode::CAT => DecodedOp::simple(op, 2, 1, cat),
        OpCode::SUBSTR => DecodedOp::simple(op, 3, 1, substr),
        OpCode::LEFT => DecodedOp::simple(op, 2, 1, left),
        OpCode::RIGHT => DecodedOp::simple(op, 2, 1, right),
        OpCode::SIZE => DecodedOp::simple(op, 1, 1, size),
        other => {
            return Err(VmError::UnknownOpCode {
                opcode: other.as_byte(),
            })
        }
    })
}

fn cat(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    let tail = args.main[0].as_bytes()?;
    let mut head = args.main[1].as_bytes()?;
    let combined = head.len() + tail.len();
    if combined > MAX_ITEM_SIZE {
        return Err(VmError::ItemTooLarge {
            size: combined,
            max: MAX_ITEM_SIZE,
        });
    }
    head.extend_from_slice(&tail);
    Ok(OpOutput::one(StackItem::ByteArray(head)))
}

fn substr(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    let end = args.main[0].as_index("SUBSTR")?;
    let start = args.main[1].as_index("SUBSTR")?;
    let bytes = args.main[2].as_bytes()?;
    let start = start.min(bytes.len());
    let end = end.min(bytes.len()).max(start);
    Ok(OpOutput::one(StackItem::ByteArray(
        bytes[start..end].to_vec(),
    )))
}

fn left(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    let count = args.main[0].as_index("LEFT")?;
    let bytes = args.main[1].as_bytes()?;
    let count = count.min(bytes.len());
    Ok(OpOutput::one(StackItem::ByteArray(bytes[..count].to_vec())))
}

fn right(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    let count = args.main[0].as_index("RIGHT")?;
    let bytes = args.main[1].as_bytes()?;
    if bytes.len() < count {
        return Err(VmError::invalid_arguments(
            "RIGHT",
            format!("buffer of {} bytes is shorter than {count}", bytes.len()),
        ));
    }
    Ok(OpOutput::one(StackItem::ByteArray(
        bytes[bytes.len() - count..].to_vec(),
    )))
}

fn size(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    let bytes = args.main[0].as_bytes()?;
    Ok(OpOutput::one(StackItem::integer(bytes.len() as i64)))
}
