//! End-to-end scenarios covering the core execution contract: arithmetic,
//! jumps, struct cloning, runtime actions, gas exhaustion and the stack
//! size limit.

mod common;

use common::*;
use neo_core::Fixed8;
use neo_ledger::Action;
use neo_vm::{OpCode, ScriptBuilder, VmError, VmState};
use num_bigint::BigInt;

#[test]
fn add_two_constants() {
    let mut builder = ScriptBuilder::new();
    builder
        .emit(OpCode::PUSH2)
        .emit(OpCode::PUSH3)
        .emit(OpCode::ADD)
        .emit(OpCode::RET);

    let result = run(builder.into_bytes());
    assert_halted(&result);
    assert_eq!(result.stack.len(), 1);
    assert_eq!(top_int(&result), BigInt::from(5));
}

#[test]
fn conditional_jump_skips_the_fallthrough_branch() {
    // 0: PUSH1; 1: JMPIF +5 (to offset 6); 4: PUSH7; 5: RET; 6: PUSH9; 7: RET
    let mut builder = ScriptBuilder::new();
    builder
        .emit(OpCode::PUSH1)
        .emit_jump(OpCode::JMPIF, 5)
        .emit(OpCode::PUSH7)
        .emit(OpCode::RET)
        .emit(OpCode::PUSH9)
        .emit(OpCode::RET);

    let result = run(builder.into_bytes());
    assert_halted(&result);
    assert_eq!(result.stack.len(), 1);
    assert_eq!(top_int(&result), BigInt::from(9));
}

#[test]
fn backward_jump_loops() {
    // Count down from 3: the loop body decrements until NZ fails.
    // 0: PUSH3; 1: DEC; 2: DUP; 3: NZ; 4: JMPIF -3 (to offset 1); 7: RET
    let mut builder = ScriptBuilder::new();
    builder
        .emit(OpCode::PUSH3)
        .emit(OpCode::DEC)
        .emit(OpCode::DUP)
        .emit(OpCode::NZ)
        .emit_jump(OpCode::JMPIF, -3)
        .emit(OpCode::RET);

    let result = run(builder.into_bytes());
    assert_halted(&result);
    assert_eq!(top_int(&result), BigInt::from(0));
}

/// Assigning a struct into another struct stores a deep copy, so mutating
/// the source afterwards must not show through the destination.
#[test]
fn struct_assignment_clones() {
    let mut builder = ScriptBuilder::new();
    builder
        .emit(OpCode::PUSH1)
        .emit(OpCode::NEWSTRUCT) // B (destination)
        .emit(OpCode::DUP)
        .emit(OpCode::TOALTSTACK)
        .emit(OpCode::PUSH1)
        .emit(OpCode::NEWSTRUCT) // A (source)
        .emit(OpCode::DUP)
        .emit(OpCode::TOALTSTACK)
        // stack: B A; arrange B 0 A and assign B[0] = A (cloned)
        .emit(OpCode::PUSH0)
        .emit(OpCode::SWAP)
        .emit(OpCode::SETITEM)
        // mutate A[0] = 5
        .emit(OpCode::FROMALTSTACK)
        .emit(OpCode::PUSH0)
        .emit(OpCode::PUSH5)
        .emit(OpCode::SETITEM)
        // read B[0][0]
        .emit(OpCode::FROMALTSTACK)
        .emit(OpCode::PUSH0)
        .emit(OpCode::PICKITEM)
        .emit(OpCode::PUSH0)
        .emit(OpCode::PICKITEM)
        .emit(OpCode::RET);

    let result = run(builder.into_bytes());
    assert_halted(&result);
    // The copy still holds the pristine Boolean(false) element.
    assert!(!top_bool(&result));
}

/// The same shape with arrays aliases instead of cloning.
#[test]
fn array_assignment_aliases() {
    let mut builder = ScriptBuilder::new();
    builder
        .emit(OpCode::PUSH1)
        .emit(OpCode::NEWARRAY)
        .emit(OpCode::DUP)
        .emit(OpCode::TOALTSTACK)
        .emit(OpCode::PUSH1)
        .emit(OpCode::NEWARRAY)
        .emit(OpCode::DUP)
        .emit(OpCode::TOALTSTACK)
        .emit(OpCode::PUSH0)
        .emit(OpCode::SWAP)
        .emit(OpCode::SETITEM)
        .emit(OpCode::FROMALTSTACK)
        .emit(OpCode::PUSH0)
        .emit(OpCode::PUSH5)
        .emit(OpCode::SETITEM)
        .emit(OpCode::FROMALTSTACK)
        .emit(OpCode::PUSH0)
        .emit(OpCode::PICKITEM)
        .emit(OpCode::PUSH0)
        .emit(OpCode::PICKITEM)
        .emit(OpCode::RET);

    let result = run(builder.into_bytes());
    assert_halted(&result);
    assert_eq!(top_int(&result), BigInt::from(5));
}

#[test]
fn runtime_log_emits_one_action() {
    let mut builder = ScriptBuilder::new();
    builder.emit_push_bytes(b"hi\0");
    builder.emit_syscall("Neo.Runtime.Log").unwrap();
    builder.emit(OpCode::RET);

    let result = run(builder.into_bytes());
    assert_halted(&result);
    assert_eq!(result.actions.len(), 1);
    match &result.actions[0] {
        Action::Log(log) => {
            assert_eq!(log.message, "hi\0");
            assert_eq!(log.base.index, 0);
        }
        other => panic!("expected a log action, got {other:?}"),
    }
}

#[test]
fn legacy_alias_behaves_like_the_canonical_name() {
    let mut builder = ScriptBuilder::new();
    builder.emit_push_bytes(b"hi\0");
    builder.emit_syscall("AntShares.Runtime.Log").unwrap();
    builder.emit(OpCode::RET);

    let result = run(builder.into_bytes());
    assert_halted(&result);
    assert_eq!(result.actions.len(), 1);
    match &result.actions[0] {
        Action::Log(log) => assert_eq!(log.message, "hi\0"),
        other => panic!("expected a log action, got {other:?}"),
    }
}

#[test]
fn gas_exhaustion_faults_and_reports_the_full_budget() {
    let script = vec![OpCode::NOP.as_byte(); 1_000_000];
    let budget = Fixed8::from_raw(10_000);

    let result = app_engine(chain()).execute_script(script, budget);
    assert_eq!(result.state, VmState::Fault);
    assert_eq!(result.fault, Some(VmError::OutOfGas));
    assert_eq!(result.gas_consumed, budget);
}

#[test]
fn stack_size_limit_faults_on_the_overflowing_step() {
    let mut script = vec![OpCode::PUSH1.as_byte()];
    script.extend(std::iter::repeat(OpCode::DUP.as_byte()).take(2049));

    let result = run(script);
    assert_eq!(result.state, VmState::Fault);
    assert_eq!(result.fault, Some(VmError::StackOverflow { max: 2048 }));
    // The stack never exceeded the limit.
    assert_eq!(result.stack.len(), 2048);
}

#[test]
fn gas_is_monotonically_consumed() {
    let mut builder = ScriptBuilder::new();
    builder
        .emit(OpCode::PUSH1)
        .emit(OpCode::PUSH2)
        .emit(OpCode::ADD)
        .emit(OpCode::RET);

    let budget = gas();
    let result = app_engine(chain()).execute_script(builder.into_bytes(), budget);
    assert_halted(&result);
    assert!(result.gas_consumed > Fixed8::ZERO);
    assert!(result.gas_consumed < budget);
}
