//! Runtime and execution-engine syscalls: trigger introspection, witness
//! checks, notifications and script-hash queries.

mod common;

use common::*;
use neo_ledger::{Action, ContractParameter, TriggerType};
use neo_vm::{OpCode, ScriptBuilder, Script, VmError, VmState};
use num_bigint::BigInt;

#[test]
fn get_trigger_reports_the_configured_trigger() {
    let mut builder = ScriptBuilder::new();
    builder.emit_syscall("Neo.Runtime.GetTrigger").unwrap();
    builder.emit(OpCode::RET);
    let script = builder.into_bytes();

    let result = app_engine(chain()).execute_script(script.clone(), gas());
    assert_halted(&result);
    assert_eq!(
        top_int(&result),
        BigInt::from(TriggerType::Application.as_byte())
    );

    let result = verification_engine(chain()).execute_script(script, gas());
    assert_halted(&result);
    assert_eq!(
        top_int(&result),
        BigInt::from(TriggerType::Verification.as_byte())
    );
}

#[test]
fn check_witness_by_script_hash() {
    let verification = vec![OpCode::PUSH1.as_byte()];
    let tx = tx_with_witnesses(&[&verification]);
    let witnessed = tx.witness_hashes()[0];

    let mut builder = ScriptBuilder::new();
    builder.emit_push_bytes(witnessed.as_bytes());
    builder.emit_syscall("Neo.Runtime.CheckWitness").unwrap();
    builder.emit(OpCode::RET);

    let result = engine_with_tx(chain(), tx.clone()).execute_script(builder.into_bytes(), gas());
    assert_halted(&result);
    assert!(top_bool(&result));

    // A hash outside the witness set is rejected.
    let mut builder = ScriptBuilder::new();
    builder.emit_push_bytes(&[0x42; 20]);
    builder.emit_syscall("Neo.Runtime.CheckWitness").unwrap();
    builder.emit(OpCode::RET);

    let result = engine_with_tx(chain(), tx).execute_script(builder.into_bytes(), gas());
    assert_halted(&result);
    assert!(!top_bool(&result));
}

#[test]
fn check_witness_by_public_key() {
    let private = p256::ecdsa::SigningKey::random(&mut rand_core::OsRng);
    let public = private
        .verifying_key()
        .to_encoded_point(true)
        .as_bytes()
        .to_vec();
    let redeem = redeem_script(&public);
    let tx = tx_with_witnesses(&[&redeem]);

    let mut builder = ScriptBuilder::new();
    builder.emit_push_bytes(&public);
    builder.emit_syscall("Neo.Runtime.CheckWitness").unwrap();
    builder.emit(OpCode::RET);

    let result = engine_with_tx(chain(), tx).execute_script(builder.into_bytes(), gas());
    assert_halted(&result);
    assert!(top_bool(&result));
}

#[test]
fn check_witness_without_container_faults() {
    let mut builder = ScriptBuilder::new();
    builder.emit_push_bytes(&[0x42; 20]);
    builder.emit_syscall("Neo.Runtime.CheckWitness").unwrap();
    builder.emit(OpCode::RET);

    let result = app_engine(chain()).execute_script(builder.into_bytes(), gas());
    assert_eq!(result.state, VmState::Fault);
    assert_eq!(result.fault, Some(VmError::UnexpectedScriptContainer));
}

#[test]
fn notify_carries_the_contract_parameter_tree() {
    // Notify an array of [7, "ok"].
    let mut builder = ScriptBuilder::new();
    builder.emit_push_int(7);
    builder.emit_push_bytes(b"ok");
    builder.emit(OpCode::PUSH2).emit(OpCode::PACK);
    builder.emit_syscall("Neo.Runtime.Notify").unwrap();
    builder.emit(OpCode::RET);

    let result = run(builder.into_bytes());
    assert_halted(&result);
    assert_eq!(result.actions.len(), 1);
    match &result.actions[0] {
        Action::Notification(notification) => match &notification.args {
            ContractParameter::Array(items) => {
                assert_eq!(items.len(), 2);
                // PACK keeps the former top first.
                assert_eq!(items[0], ContractParameter::ByteArray(b"ok".to_vec()));
                assert_eq!(items[1], ContractParameter::Integer(BigInt::from(7)));
            }
            other => panic!("expected an array payload, got {other:?}"),
        },
        other => panic!("expected a notification, got {other:?}"),
    }
}

#[test]
fn action_indices_increase_across_emissions() {
    let mut builder = ScriptBuilder::new();
    for message in [b"one".as_slice(), b"two", b"three"] {
        builder.emit_push_bytes(message);
        builder.emit_syscall("Neo.Runtime.Log").unwrap();
    }
    builder.emit(OpCode::RET);

    let result = run(builder.into_bytes());
    assert_halted(&result);
    let indices: Vec<u32> = result.actions.iter().map(|a| a.base().index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn script_hash_introspection() {
    let mut builder = ScriptBuilder::new();
    builder
        .emit_syscall("System.ExecutionEngine.GetExecutingScriptHash")
        .unwrap();
    builder
        .emit_syscall("System.ExecutionEngine.GetEntryScriptHash")
        .unwrap();
    builder
        .emit_syscall("System.ExecutionEngine.GetCallingScriptHash")
        .unwrap();
    builder.emit(OpCode::RET);
    let code = builder.into_bytes();
    let expected = Script::new(code.clone()).unwrap().hash();

    let result = run(code);
    assert_halted(&result);
    assert_eq!(result.stack.len(), 3);
    assert_eq!(result.stack[0].as_uint160().unwrap(), expected);
    assert_eq!(result.stack[1].as_uint160().unwrap(), expected);
    // The root frame has no caller.
    assert!(result.stack[2].as_bytes().unwrap().is_empty());
}

#[test]
fn unknown_syscall_faults() {
    let mut builder = ScriptBuilder::new();
    builder.emit_syscall("Neo.Runtime.NoSuchCall").unwrap();
    builder.emit(OpCode::RET);

    let result = run(builder.into_bytes());
    assert_eq!(result.state, VmState::Fault);
    assert_eq!(
        result.fault,
        Some(VmError::UnknownSyscall {
            name: "Neo.Runtime.NoSuchCall".into()
        })
    );
}
