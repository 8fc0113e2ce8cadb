//! Nested invocation: CALL frames, contract calls, tail calls and the
//! shared operand stacks.

mod common;

use common::*;
use neo_ledger::{Action, Blockchain, Contract};
use neo_vm::{OpCode, Script, ScriptBuilder, VmError, VmState};
use num_bigint::BigInt;

fn deploy(chain: &std::sync::Arc<neo_ledger::MemoryBlockchain>, script: Vec<u8>) -> Contract {
    let contract = Contract {
        script,
        ..Default::default()
    };
    chain.put_contract(contract.clone());
    contract
}

/// The callee operates on the caller's stack: arguments flow in, results
/// flow out.
#[test]
fn appcall_shares_the_operand_stack() {
    let chain = chain();
    let mut callee = ScriptBuilder::new();
    callee.emit(OpCode::ADD).emit(OpCode::RET);
    let contract = deploy(&chain, callee.into_bytes());

    let mut caller = ScriptBuilder::new();
    caller
        .emit(OpCode::PUSH2)
        .emit(OpCode::PUSH3)
        .emit_appcall(&contract.script_hash())
        .emit(OpCode::RET);

    let result = app_engine(chain).execute_script(caller.into_bytes(), gas());
    assert_halted(&result);
    assert_eq!(result.stack.len(), 1);
    assert_eq!(top_int(&result), BigInt::from(5));
}

#[test]
fn appcall_to_a_missing_contract_faults() {
    let mut caller = ScriptBuilder::new();
    caller
        .emit_appcall(&neo_core::UInt160::from([0x99; 20]))
        .emit(OpCode::RET);

    let result = run(caller.into_bytes());
    assert_eq!(result.state, VmState::Fault);
    assert!(matches!(result.fault, Some(VmError::ItemNotFound { .. })));
}

#[test]
fn dynamic_appcall_takes_the_target_from_the_stack() {
    let chain = chain();
    let mut callee = ScriptBuilder::new();
    callee.emit(OpCode::PUSH7).emit(OpCode::RET);
    let contract = deploy(&chain, callee.into_bytes());

    let mut caller = ScriptBuilder::new();
    caller.emit_push_bytes(contract.script_hash().as_bytes());
    caller.emit_dynamic_appcall().emit(OpCode::RET);

    let result = app_engine(chain).execute_script(caller.into_bytes(), gas());
    assert_halted(&result);
    assert_eq!(top_int(&result), BigInt::from(7));
}

/// After a tail call the caller's frame is finished: trailing code never
/// runs.
#[test]
fn tailcall_replaces_the_calling_frame() {
    let chain = chain();
    let mut callee = ScriptBuilder::new();
    callee.emit(OpCode::ADD).emit(OpCode::RET);
    let contract = deploy(&chain, callee.into_bytes());

    let mut caller = ScriptBuilder::new();
    caller
        .emit(OpCode::PUSH2)
        .emit(OpCode::PUSH3)
        .emit_tailcall(&contract.script_hash())
        .emit(OpCode::PUSH9)
        .emit(OpCode::RET);

    let result = app_engine(chain).execute_script(caller.into_bytes(), gas());
    assert_halted(&result);
    assert_eq!(result.stack.len(), 1);
    assert_eq!(top_int(&result), BigInt::from(5));
}

#[test]
fn call_runs_a_subroutine_within_the_script() {
    // 0: PUSH2; 1: PUSH3; 2: CALL +4 (to 6); 5: RET; 6: ADD; 7: RET
    let mut builder = ScriptBuilder::new();
    builder
        .emit(OpCode::PUSH2)
        .emit(OpCode::PUSH3)
        .emit_jump(OpCode::CALL, 4)
        .emit(OpCode::RET)
        .emit(OpCode::ADD)
        .emit(OpCode::RET);

    let result = run(builder.into_bytes());
    assert_halted(&result);
    assert_eq!(result.stack.len(), 1);
    assert_eq!(top_int(&result), BigInt::from(5));
}

#[test]
fn unbounded_recursion_hits_the_depth_limit() {
    // CALL back to itself forever.
    let mut builder = ScriptBuilder::new();
    builder.emit_jump(OpCode::CALL, 0).emit(OpCode::RET);

    let result = run(builder.into_bytes());
    assert_eq!(result.state, VmState::Fault);
    assert_eq!(
        result.fault,
        Some(VmError::InvocationStackOverflow { max: 1024 })
    );
}

#[test]
fn nested_calls_see_caller_and_entry_hashes() {
    let chain = chain();
    let mut callee = ScriptBuilder::new();
    callee
        .emit_syscall("System.ExecutionEngine.GetCallingScriptHash")
        .unwrap();
    callee
        .emit_syscall("System.ExecutionEngine.GetEntryScriptHash")
        .unwrap();
    callee
        .emit_syscall("System.ExecutionEngine.GetExecutingScriptHash")
        .unwrap();
    callee.emit(OpCode::RET);
    let contract = deploy(&chain, callee.into_bytes());

    let mut caller = ScriptBuilder::new();
    caller.emit_appcall(&contract.script_hash()).emit(OpCode::RET);
    let caller_code = caller.into_bytes();
    let caller_hash = Script::new(caller_code.clone()).unwrap().hash();

    let result = app_engine(chain).execute_script(caller_code, gas());
    assert_halted(&result);
    assert_eq!(result.stack.len(), 3);
    assert_eq!(result.stack[0].as_uint160().unwrap(), caller_hash);
    assert_eq!(result.stack[1].as_uint160().unwrap(), caller_hash);
    assert_eq!(
        result.stack[2].as_uint160().unwrap(),
        contract.script_hash()
    );
}

/// Action indices stay monotonic across the whole invocation tree.
#[test]
fn actions_are_ordered_across_nested_calls() {
    let chain = chain();
    let mut callee = ScriptBuilder::new();
    callee.emit_push_bytes(b"inner");
    callee.emit_syscall("Neo.Runtime.Log").unwrap();
    callee.emit(OpCode::RET);
    let contract = deploy(&chain, callee.into_bytes());

    let mut caller = ScriptBuilder::new();
    caller.emit_push_bytes(b"before");
    caller.emit_syscall("Neo.Runtime.Log").unwrap();
    caller.emit_appcall(&contract.script_hash());
    caller.emit_push_bytes(b"after");
    caller.emit_syscall("Neo.Runtime.Log").unwrap();
    caller.emit(OpCode::RET);

    let result = app_engine(chain).execute_script(caller.into_bytes(), gas());
    assert_halted(&result);
    let logs: Vec<(u32, String)> = result
        .actions
        .iter()
        .map(|action| match action {
            Action::Log(log) => (log.base.index, log.message.clone()),
            other => panic!("unexpected action {other:?}"),
        })
        .collect();
    assert_eq!(
        logs,
        vec![
            (0, "before".into()),
            (1, "inner".into()),
            (2, "after".into())
        ]
    );
}

/// A fault inside a nested call unwinds the entire tree.
#[test]
fn nested_fault_unwinds_everything() {
    let chain = chain();
    let mut callee = ScriptBuilder::new();
    callee.emit(OpCode::THROW);
    let contract = deploy(&chain, callee.into_bytes());

    let mut caller = ScriptBuilder::new();
    caller
        .emit_appcall(&contract.script_hash())
        .emit(OpCode::PUSH1)
        .emit(OpCode::RET);

    let result = app_engine(chain).execute_script(caller.into_bytes(), gas());
    assert_eq!(result.state, VmState::Fault);
    assert_eq!(result.fault, Some(VmError::Throw));
}
