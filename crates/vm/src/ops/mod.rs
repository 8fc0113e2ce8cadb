//! Opcode decoding and the per-family handlers.
//!
//! `decode` reads one opcode (plus its immediates) at the program counter
//! and produces a [`DecodedOp`] describing its stack shape, gas fee and
//! behavior. The engine applies the uniform per-step checks before running
//! the handler.

mod arithmetic;
mod array;
mod bitwise;
mod control;
mod crypto;
mod exception;
mod push;
mod splice;
mod stack;

use crate::execution_context::ExecutionContext;
use crate::execution_engine::ExecutionEngine;
use crate::limits::fee;
use crate::op_code::OpCode;
use crate::stack_item::StackItem;
use crate::{VmError, VmResult};

/// Inputs handed to an opcode handler: the immediate bytes and the popped
/// stack arguments, top-first.
pub(crate) struct OpArgs {
    pub operand: Vec<u8>,
    pub main: Vec<StackItem>,
    pub alt: Vec<StackItem>,
}

/// Items a handler pushes back, bottom-first (the last element ends on
/// top).
#[derive(Default)]
pub(crate) struct OpOutput {
    pub main: Vec<StackItem>,
    pub alt: Vec<StackItem>,
}

impl OpOutput {
    /// No stack effect.
    pub fn none() -> Self {
        Self::default()
    }

    /// A single item pushed onto the main stack.
    pub fn one(item: StackItem) -> Self {
        Self {
            main: vec![item],
            alt: Vec::new(),
        }
    }

    /// Several items pushed onto the main stack, bottom-first.
    pub fn many(items: Vec<StackItem>) -> Self {
        Self {
            main: items,
            alt: Vec::new(),
        }
    }
}

/// An opcode's behavior.
pub(crate) type OpHandler =
    fn(&mut ExecutionEngine, &mut ExecutionContext, OpArgs) -> VmResult<OpOutput>;

/// A decoded instruction: stack shape, accounting data and behavior.
pub(crate) struct DecodedOp {
    pub op: OpCode,
    /// Items popped from the main stack before the handler runs.
    pub num_in: usize,
    /// Items popped from the alt stack.
    pub num_in_alt: usize,
    /// Upper bound on items the handler pushes to the main stack.
    pub num_out: usize,
    /// Upper bound on items pushed to the alt stack.
    pub num_out_alt: usize,
    /// Extra main-stack depth delta applied inside the handler.
    pub modify: isize,
    /// Extra alt-stack depth delta applied inside the handler.
    pub modify_alt: isize,
    /// Invocation frames this opcode adds.
    pub invocation: u32,
    /// Gas fee in raw units.
    pub fee: i64,
    /// Immediate bytes read during decode.
    pub operand: Vec<u8>,
    pub handler: OpHandler,
}

impl DecodedOp {
    /// A descriptor with the default fee and no alt-stack or frame effects.
    pub fn simple(op: OpCode, num_in: usize, num_out: usize, handler: OpHandler) -> Self {
        Self {
            op,
            num_in,
            num_in_alt: 0,
            num_out,
            num_out_alt: 0,
            modify: 0,
            modify_alt: 0,
            invocation: 0,
            fee: fee::DEFAULT,
            operand: Vec::new(),
            handler,
        }
    }

    pub fn with_operand(mut self, operand: Vec<u8>) -> Self {
        self.operand = operand;
        self
    }

    pub fn with_modify(mut self, modify: isize) -> Self {
        self.modify = modify;
        self
    }

    pub fn with_fee(mut self, fee: i64) -> Self {
        self.fee = fee;
        self
    }

    pub fn with_invocation(mut self, invocation: u32) -> Self {
        self.invocation = invocation;
        self
    }

    pub fn with_alt(mut self, num_in_alt: usize, num_out_alt: usize) -> Self {
        self.num_in_alt = num_in_alt;
        self.num_out_alt = num_out_alt;
        self
    }
}

/// Decodes the instruction at the program counter, advancing it past the
/// opcode byte and any immediates.
pub(crate) fn decode(ctx: &mut ExecutionContext) -> VmResult<DecodedOp> {
    let byte = ctx.script.byte_at(ctx.pc)?;
    if ctx.push_only && !OpCode::is_push_allowed(byte) {
        return Err(VmError::PushOnlyViolation { opcode: byte });
    }
    let op = OpCode::from_byte(byte)?;
    ctx.pc += 1;

    use OpCode::*;
    match op {
        PUSH0 | PUSHDATA1 | PUSHDATA2 | PUSHDATA4 | PUSHM1 => push::decode(op, ctx),
        op if (op.as_byte() >= PUSHBYTES1.as_byte() && op.as_byte() <= PUSHBYTES75.as_byte())
            || (op.as_byte() >= PUSH1.as_byte() && op.as_byte() <= PUSH16.as_byte()) =>
        {
            push::decode(op, ctx)
        }
        NOP | JMP | JMPIF | JMPIFNOT | CALL | RET | APPCALL | SYSCALL | TAILCALL => {
            control::decode(op, ctx)
        }
        DUPFROMALTSTACK | TOALTSTACK | FROMALTSTACK | XDROP | XSWAP | XTUCK | DEPTH | DROP
        | DUP | NIP | OVER | PICK | ROLL | ROT | SWAP | TUCK => stack::decode(op),
        CAT | SUBSTR | LEFT | RIGHT | SIZE => splice::decode(op),
        INVERT | AND | OR | XOR | EQUAL => bitwise::decode(op),
        INC | DEC | SIGN | NEGATE | ABS | NOT | NZ | ADD | SUB | MUL | DIV | MOD | SHL | SHR
        | BOOLAND | BOOLOR | NUMEQUAL | NUMNOTEQUAL | LT | GT | LTE | GTE | MIN | MAX | WITHIN => {
            arithmetic::decode(op)
        }
        SHA1 | SHA256 | HASH160 | HASH256 | CHECKSIG | CHECKMULTISIG => crypto::decode(op, ctx),
        ARRAYSIZE | PACK | UNPACK | PICKITEM | SETITEM | NEWARRAY | NEWSTRUCT => {
            array::decode(op, ctx)
        }
        THROW | THROWIFNOT => exception::decode(op),
        _ => Err(VmError::UnknownOpCode {
            opcode: op.as_byte(),
        }),
    }
}
