//! Flow control: jumps, calls, nested contract invocation and syscalls.

use super::{DecodedOp, OpArgs, OpOutput};
use crate::execution_context::ExecutionContext;
use crate::execution_engine::ExecutionEngine;
use crate::limits::MAX_SYSCALL_NAME_LENGTH;
use crate::op_code::OpCode;
use crate::script::Script;
use crate::syscall;
use crate::{VmError, VmResult};
use neo_core::{BinaryReader, UInt160};
use tracing::debug;

const JUMP_OPERAND_SIZE: usize = 2;
const HASH_OPERAND_SIZE: usize = 20;

pub(super) fn decode(op: OpCode, ctx: &mut ExecutionContext) -> VmResult<DecodedOp> {
    match op {
        OpCode::NOP => Ok(DecodedOp::simple(op, 0, 0, nop)),
        OpCode::RET => Ok(DecodedOp::simple(op, 0, 0, ret)),
        OpCode::JMP => {
            let operand = read_operand(ctx, JUMP_OPERAND_SIZE)?;
            Ok(DecodedOp::simple(op, 0, 0, jmp).with_operand(operand))
        }
        OpCode::JMPIF | OpCode::JMPIFNOT => {
            let operand = read_operand(ctx, JUMP_OPERAND_SIZE)?;
            let handler = if op == OpCode::JMPIF { jmp_if } else { jmp_if_not };
            Ok(DecodedOp::simple(op, 1, 0, handler).with_operand(operand))
        }
        OpCode::CALL => {
            let operand = read_operand(ctx, JUMP_OPERAND_SIZE)?;
            Ok(DecodedOp::simple(op, 0, 0, call)
                .with_operand(operand)
                .with_invocation(1))
        }
        OpCode::APPCALL | OpCode::TAILCALL => {
            let operand = read_operand(ctx, HASH_OPERAND_SIZE)?;
            // A zero hash takes the target from the stack (dynamic invoke).
            let num_in = if operand.iter().all(|b| *b == 0) { 1 } else { 0 };
            let (handler, invocation): (super::OpHandler, u32) = if op == OpCode::APPCALL {
                (appcall, 1)
            } else {
                (tailcall, 0)
            };
            Ok(DecodedOp::simple(op, num_in, 0, handler)
                .with_operand(operand)
                .with_invocation(invocation))
        }
        OpCode::SYSCALL => {
            let mut reader = BinaryReader::new(&ctx.script.as_bytes()[ctx.pc..]);
            let name_bytes = reader
                .read_var_bytes(MAX_SYSCALL_NAME_LENGTH)
                .map_err(|e| VmError::invalid_arguments("SYSCALL", e.to_string()))?;
            ctx.pc += reader.position();
            let name = String::from_utf8(name_bytes).map_err(|_| VmError::UnknownSyscall {
                name: "<non-utf8>".into(),
            })?;
            let descriptor = syscall::resolve(&name).ok_or(VmError::UnknownSyscall {
                name: name.clone(),
            })?;
            Ok(
                DecodedOp::simple(op, descriptor.num_in, descriptor.num_out, invoke_syscall)
                    .with_fee(descriptor.fee)
                    .with_operand(name.into_bytes()),
            )
        }
        other => Err(VmError::UnknownOpCode {
            opcode: other.as_byte(),
        }),
    }
}

fn read_operand(ctx: &mut ExecutionContext, count: usize) -> VmResult<Vec<u8>> {
    let bytes = ctx.script.slice(ctx.pc, count)?.to_vec();
    ctx.pc += count;
    Ok(bytes)
}

/// Jump offsets are relative to the opcode byte; after decode the program
/// counter sits three bytes past it.
fn jump_target(ctx: &ExecutionContext, operand: &[u8]) -> VmResult<usize> {
    let offset = i16::from_le_bytes([operand[0], operand[1]]) as i64;
    let base = ctx.pc as i64 - (JUMP_OPERAND_SIZE as i64 + 1);
    let target = base + offset;
    if target < 0 || target > ctx.script.len() as i64 {
        return Err(VmError::CodeOverflow {
            position: target.max(0) as usize,
        });
    }
    Ok(target as usize)
}

fn nop(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    _args: OpArgs,
) -> VmResult<OpOutput> {
    Ok(OpOutput::none())
}

fn ret(
    _engine: &mut ExecutionEngine,
    ctx: &mut ExecutionContext,
    _args: OpArgs,
) -> VmResult<OpOutput> {
    ctx.done = true;
    Ok(OpOutput::none())
}

fn jmp(
    _engine: &mut ExecutionEngine,
    ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    ctx.pc = jump_target(ctx, &args.operand)?;
    Ok(OpOutput::none())
}

fn jmp_if(
    _engine: &mut ExecutionEngine,
    ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    if args.main[0].as_bool()? {
        ctx.pc = jump_target(ctx, &args.operand)?;
    }
    Ok(OpOutput::none())
}

fn jmp_if_not(
    _engine: &mut ExecutionEngine,
    ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    if !args.main[0].as_bool()? {
        ctx.pc = jump_target(ctx, &args.operand)?;
    }
    Ok(OpOutput::none())
}

fn call(
    engine: &mut ExecutionEngine,
    ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    let target = jump_target(ctx, &args.operand)?;
    let mut frame = ctx.derive_call(target);
    engine.run(&mut frame)?;
    Ok(OpOutput::none())
}

fn invoke_contract(
    engine: &mut ExecutionEngine,
    ctx: &mut ExecutionContext,
    args: OpArgs,
    tail: bool,
) -> VmResult<OpOutput> {
    let hash = if args.operand.iter().all(|b| *b == 0) {
        args.main[0].as_uint160()?
    } else {
        UInt160::from_bytes(&args.operand)
            .map_err(|e| VmError::invalid_arguments("APPCALL", e.to_string()))?
    };
    let contract = engine
        .blockchain()
        .try_get_contract(&hash)
        .ok_or(VmError::ItemNotFound {
            kind: "contract",
            key: hash.to_string(),
        })?;
    debug!(target: "vm", contract = %hash, tail, "invoking contract");
    let script = Script::new(contract.script)?;
    if tail {
        // Replace this frame in place: same depth, and when the callee
        // returns the caller is finished too.
        ctx.calling_script_hash = Some(ctx.script_hash());
        ctx.script = script;
        ctx.pc = 0;
        ctx.push_only = false;
    } else {
        let mut frame = ctx.derive(script);
        engine.run(&mut frame)?;
    }
    Ok(OpOutput::none())
}

fn appcall(
    engine: &mut ExecutionEngine,
    ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    invoke_contract(engine, ctx, args, false)
}

fn tailcall(
    engine: &mut ExecutionEngine,
    ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    invoke_contract(engine, ctx, args, true)
}

fn invoke_syscall(
    engine: &mut ExecutionEngine,
    ctx: &mut ExecutionContext,
    args: OpArgs,
) -> VmResult<OpOutput> {
    let name = String::from_utf8_lossy(&args.operand).into_owned();
    let descriptor = syscall::resolve(&name).ok_or(VmError::UnknownSyscall {
        name: name.clone(),
    })?;
    debug!(target: "vm", syscall = %descriptor.name, "dispatching syscall");
    let results = (descriptor.handler)(engine, ctx, args.main)?;
    Ok(OpOutput::many(results))
}
