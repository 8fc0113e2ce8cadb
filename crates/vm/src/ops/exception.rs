//! THROW and THROWIFNOT.

use super::{DecodedOp, OpArgs, OpOutput};
use crate::execution_context::ExecutionContext;
use crate::execution_engine::ExecutionEngine;
use crate::op_code::OpCode;
use crate::{VmError, VmResult};

pub(super) fn decode(op: OpCode) -> VmResult<DecodedOp> {
    Ok(match op {
        OpCode::THROW => DecodedOp::simple(op, 0, 0, throw),
        OpCode::THROWIFNOT => DecodedOp::simple(op, 1, 0, throw_if_not),
        other => {
            return Err(VmError::UnknownOpCode {
                opcode: other.as_byte(),
            })
        }
    })
}

fn throw(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    _args: OpArgs,
) -> VmResult<OpOutput> {
    Err(VmError::Throw)
}

fn throw_if_not(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    if !args.main[0].as_bool()? {
        return Err(VmError::Throw);
    }
    Ok(OpOutput::none())
}
