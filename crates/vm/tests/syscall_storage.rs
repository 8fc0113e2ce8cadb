//! Storage syscalls and contract lifecycle: get/put/delete, the context
//! capability, migration and destruction.

mod common;

use common::*;
use neo_ledger::{
    Blockchain, Contract, ContractPropertyState, StorageItem, StorageKey,
};
use neo_vm::{OpCode, Script, ScriptBuilder, VmError, VmState};

/// A contract whose script stores then reloads a value.
fn storage_roundtrip_script() -> Vec<u8> {
    let mut builder = ScriptBuilder::new();
    builder.emit_syscall("Neo.Storage.GetContext").unwrap();
    builder.emit_push_bytes(b"key");
    builder.emit_push_bytes(b"value");
    builder.emit_syscall("Neo.Storage.Put").unwrap();
    builder.emit_syscall("Neo.Storage.GetContext").unwrap();
    builder.emit_push_bytes(b"key");
    builder.emit_syscall("Neo.Storage.Get").unwrap();
    builder.emit(OpCode::RET);
    builder.into_bytes()
}

fn deploy(chain: &std::sync::Arc<neo_ledger::MemoryBlockchain>, script: Vec<u8>) -> Contract {
    let contract = Contract {
        script,
        properties: ContractPropertyState::HAS_STORAGE,
        name: "test".into(),
        ..Default::default()
    };
    chain.put_contract(contract.clone());
    contract
}

#[test]
fn storage_put_then_get_round_trips() {
    let chain = chain();
    let code = storage_roundtrip_script();
    let contract = deploy(&chain, code.clone());

    let result = app_engine(chain.clone()).execute_script(code, gas());
    assert_halted(&result);
    assert_eq!(top_bytes(&result), b"value");

    let stored = chain
        .try_get_storage_item(&StorageKey::new(contract.script_hash(), b"key".to_vec()))
        .expect("the write must persist");
    assert_eq!(stored.value, b"value");
}

#[test]
fn missing_keys_read_as_empty() {
    let chain = chain();
    let mut builder = ScriptBuilder::new();
    builder.emit_syscall("Neo.Storage.GetContext").unwrap();
    builder.emit_push_bytes(b"absent");
    builder.emit_syscall("Neo.Storage.Get").unwrap();
    builder.emit(OpCode::RET);
    let code = builder.into_bytes();
    deploy(&chain, code.clone());

    let result = app_engine(chain).execute_script(code, gas());
    assert_halted(&result);
    assert!(top_bytes(&result).is_empty());
}

#[test]
fn storage_delete_removes_the_entry() {
    let chain = chain();
    let mut builder = ScriptBuilder::new();
    builder.emit_syscall("Neo.Storage.GetContext").unwrap();
    builder.emit_push_bytes(b"key");
    builder.emit_syscall("Neo.Storage.Delete").unwrap();
    builder.emit(OpCode::RET);
    let code = builder.into_bytes();
    let contract = deploy(&chain, code.clone());
    let key = StorageKey::new(contract.script_hash(), b"key".to_vec());
    chain.put_storage_item(key.clone(), StorageItem::new(b"old".to_vec()));

    let result = app_engine(chain.clone()).execute_script(code, gas());
    assert_halted(&result);
    assert!(chain.try_get_storage_item(&key).is_none());
}

#[test]
fn contracts_without_storage_cannot_use_it() {
    let chain = chain();
    let code = storage_roundtrip_script();
    // Deployed with no storage property.
    chain.put_contract(Contract {
        script: code.clone(),
        ..Default::default()
    });

    let result = app_engine(chain).execute_script(code, gas());
    assert_eq!(result.state, VmState::Fault);
    assert!(matches!(
        result.fault,
        Some(VmError::ContractNoStorage { .. })
    ));
}

#[test]
fn verification_trigger_cannot_write() {
    let chain = chain();
    let code = storage_roundtrip_script();
    deploy(&chain, code.clone());

    let result = verification_engine(chain.clone()).execute_script(code, gas());
    assert_eq!(result.state, VmState::Fault);
    assert_eq!(result.fault, Some(VmError::InvalidTrigger));

    // Reads alone are fine under Verification.
    let mut builder = ScriptBuilder::new();
    builder.emit_syscall("Neo.Storage.GetContext").unwrap();
    builder.emit_push_bytes(b"key");
    builder.emit_syscall("Neo.Storage.Get").unwrap();
    builder.emit(OpCode::RET);
    let read_only = builder.into_bytes();
    deploy(&chain, read_only.clone());
    let result = verification_engine(chain).execute_script(read_only, gas());
    assert_halted(&result);
}

/// Emits the nine Contract.Create arguments (script deepest) followed by
/// the syscall itself.
fn emit_contract_create(builder: &mut ScriptBuilder, script: &[u8], properties: u8, call: &str) {
    builder.emit_push_bytes(script);
    builder.emit_push_bytes(&[]); // parameter list
    builder.emit_push_int(0xff); // return type: void
    builder.emit_push_int(properties);
    builder.emit_push_bytes(b"name");
    builder.emit_push_bytes(b"1.0");
    builder.emit_push_bytes(b"author");
    builder.emit_push_bytes(b"a@b.c");
    builder.emit_push_bytes(b"description");
    builder.emit_syscall(call).unwrap();
}

#[test]
fn contract_create_records_the_deployment() {
    let chain = chain();
    let deployed_script = vec![OpCode::PUSH1.as_byte(), OpCode::RET.as_byte()];
    let expected_hash = Script::new(deployed_script.clone()).unwrap().hash();

    let mut builder = ScriptBuilder::new();
    emit_contract_create(
        &mut builder,
        &deployed_script,
        ContractPropertyState::HAS_STORAGE.0,
        "Neo.Contract.Create",
    );
    builder.emit(OpCode::RET);

    let result = app_engine(chain.clone()).execute_script(builder.into_bytes(), gas());
    assert_halted(&result);
    assert_eq!(
        result.stack.last().unwrap().as_contract().unwrap().script,
        deployed_script
    );

    let stored = chain.try_get_contract(&expected_hash).expect("deployed");
    assert!(stored.has_storage());
    assert_eq!(stored.name, "name");
}

#[test]
fn created_contract_yields_a_usable_storage_context() {
    let chain = chain();
    let deployed_script = vec![OpCode::PUSH2.as_byte(), OpCode::RET.as_byte()];
    let deployed_hash = Script::new(deployed_script.clone()).unwrap().hash();

    let mut builder = ScriptBuilder::new();
    emit_contract_create(
        &mut builder,
        &deployed_script,
        ContractPropertyState::HAS_STORAGE.0,
        "Neo.Contract.Create",
    );
    // contract -> its storage context -> write through it
    builder.emit_syscall("Neo.Contract.GetStorageContext").unwrap();
    builder.emit_push_bytes(b"seed");
    builder.emit_push_bytes(b"payload");
    builder.emit_syscall("Neo.Storage.Put").unwrap();
    builder.emit(OpCode::RET);

    let result = app_engine(chain.clone()).execute_script(builder.into_bytes(), gas());
    assert_halted(&result);
    let stored = chain
        .try_get_storage_item(&StorageKey::new(deployed_hash, b"seed".to_vec()))
        .expect("write through the granted context");
    assert_eq!(stored.value, b"payload");
}

#[test]
fn storage_context_is_denied_to_non_creators() {
    let chain = chain();
    // The contract exists, but the running script did not create it.
    let deployed_script = vec![OpCode::PUSH3.as_byte(), OpCode::RET.as_byte()];
    deploy(&chain, deployed_script.clone());

    let mut builder = ScriptBuilder::new();
    builder.emit_push_bytes(
        Script::new(deployed_script).unwrap().hash().as_bytes(),
    );
    builder.emit_syscall("Neo.Blockchain.GetContract").unwrap();
    builder.emit_syscall("Neo.Contract.GetStorageContext").unwrap();
    builder.emit(OpCode::RET);

    let result = app_engine(chain).execute_script(builder.into_bytes(), gas());
    assert_eq!(result.state, VmState::Fault);
    assert_eq!(result.fault, Some(VmError::InvalidStorageContext));
}

#[test]
fn migrate_copies_storage_to_the_new_contract() {
    let chain = chain();
    let new_script = vec![OpCode::PUSH4.as_byte(), OpCode::RET.as_byte()];
    let new_hash = Script::new(new_script.clone()).unwrap().hash();

    let mut builder = ScriptBuilder::new();
    emit_contract_create(
        &mut builder,
        &new_script,
        ContractPropertyState::HAS_STORAGE.0,
        "Neo.Contract.Migrate",
    );
    builder.emit(OpCode::RET);
    let migrating = builder.into_bytes();
    let migrating_hash = Script::new(migrating.clone()).unwrap().hash();

    // The migrating contract owns two storage entries.
    chain.put_storage_item(
        StorageKey::new(migrating_hash, b"a".to_vec()),
        StorageItem::new(b"1".to_vec()),
    );
    chain.put_storage_item(
        StorageKey::new(migrating_hash, b"b".to_vec()),
        StorageItem::new(b"2".to_vec()),
    );

    let result = app_engine(chain.clone()).execute_script(migrating, gas());
    assert_halted(&result);

    for (key, value) in [(b"a".to_vec(), b"1".to_vec()), (b"b".to_vec(), b"2".to_vec())] {
        let copied = chain
            .try_get_storage_item(&StorageKey::new(new_hash, key))
            .expect("storage must be copied");
        assert_eq!(copied.value, value);
    }
}

#[test]
fn destroy_removes_contract_and_storage() {
    let chain = chain();
    let mut builder = ScriptBuilder::new();
    builder.emit_syscall("Neo.Contract.Destroy").unwrap();
    builder.emit(OpCode::RET);
    let code = builder.into_bytes();
    let contract = deploy(&chain, code.clone());
    let hash = contract.script_hash();
    let key = StorageKey::new(hash, b"k".to_vec());
    chain.put_storage_item(key.clone(), StorageItem::new(b"v".to_vec()));

    let result = app_engine(chain.clone()).execute_script(code, gas());
    assert_halted(&result);
    assert!(chain.try_get_contract(&hash).is_none());
    assert!(chain.try_get_storage_item(&key).is_none());
}
