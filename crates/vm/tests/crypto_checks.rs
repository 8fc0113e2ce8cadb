//! CHECKSIG and CHECKMULTISIG against the container's signed message.

mod common;

use common::*;
use neo_vm::{OpCode, ScriptBuilder, VmError, VmState};
use p256::ecdsa::SigningKey;
use rand_core::OsRng;

struct Signer {
    public: Vec<u8>,
    private: Vec<u8>,
}

fn signer() -> Signer {
    let key = SigningKey::random(&mut OsRng);
    Signer {
        public: key
            .verifying_key()
            .to_encoded_point(true)
            .as_bytes()
            .to_vec(),
        private: key.to_bytes().to_vec(),
    }
}

fn sign(message: &[u8], signer: &Signer) -> Vec<u8> {
    neo_cryptography::ecdsa::sign(message, &signer.private).expect("test key signs")
}

#[test]
fn checksig_accepts_a_valid_signature() {
    let signer = signer();
    let tx = tx_with_witnesses(&[&redeem_script(&signer.public)]);
    let signature = sign(&tx.message(), &signer);

    let mut builder = ScriptBuilder::new();
    builder.emit_push_bytes(&signature);
    builder.emit_push_bytes(&signer.public);
    builder.emit(OpCode::CHECKSIG).emit(OpCode::RET);

    let result = engine_with_tx(chain(), tx).execute_script(builder.into_bytes(), gas());
    assert_halted(&result);
    assert!(top_bool(&result));
}

#[test]
fn checksig_rejects_a_wrong_signature() {
    let signer = signer();
    let other = self::signer();
    let tx = tx_with_witnesses(&[&redeem_script(&signer.public)]);
    let signature = sign(&tx.message(), &other);

    let mut builder = ScriptBuilder::new();
    builder.emit_push_bytes(&signature);
    builder.emit_push_bytes(&signer.public);
    builder.emit(OpCode::CHECKSIG).emit(OpCode::RET);

    let result = engine_with_tx(chain(), tx).execute_script(builder.into_bytes(), gas());
    assert_halted(&result);
    assert!(!top_bool(&result));
}

#[test]
fn checksig_without_container_faults() {
    let signer = signer();
    let mut builder = ScriptBuilder::new();
    builder.emit_push_bytes(&[0u8; 64]);
    builder.emit_push_bytes(&signer.public);
    builder.emit(OpCode::CHECKSIG).emit(OpCode::RET);

    let result = run(builder.into_bytes());
    assert_eq!(result.state, VmState::Fault);
    assert_eq!(result.fault, Some(VmError::UnexpectedScriptContainer));
}

/// CHECKMULTISIG with a single key and signature agrees with CHECKSIG.
#[test]
fn multisig_agrees_with_checksig_for_one_key() {
    let signer = signer();
    let tx = tx_with_witnesses(&[&redeem_script(&signer.public)]);
    let signature = sign(&tx.message(), &signer);

    // Count-encoded groups: sig, 1, key, 1.
    let mut builder = ScriptBuilder::new();
    builder.emit_push_bytes(&signature);
    builder.emit(OpCode::PUSH1);
    builder.emit_push_bytes(&signer.public);
    builder.emit(OpCode::PUSH1);
    builder.emit(OpCode::CHECKMULTISIG).emit(OpCode::RET);

    let result = engine_with_tx(chain(), tx).execute_script(builder.into_bytes(), gas());
    assert_halted(&result);
    assert!(top_bool(&result));
}

/// The same check with both groups passed as arrays.
#[test]
fn multisig_accepts_array_encoded_groups() {
    let signer = signer();
    let tx = tx_with_witnesses(&[&redeem_script(&signer.public)]);
    let signature = sign(&tx.message(), &signer);

    let mut builder = ScriptBuilder::new();
    builder.emit_push_bytes(&signature);
    builder.emit(OpCode::PUSH1).emit(OpCode::PACK);
    builder.emit_push_bytes(&signer.public);
    builder.emit(OpCode::PUSH1).emit(OpCode::PACK);
    builder.emit(OpCode::CHECKMULTISIG).emit(OpCode::RET);

    let result = engine_with_tx(chain(), tx).execute_script(builder.into_bytes(), gas());
    assert_halted(&result);
    assert!(top_bool(&result));
}

/// Two-of-three: signatures must appear in key order.
#[test]
fn multisig_two_of_three() {
    let signers = [signer(), signer(), signer()];
    let tx = tx_with_witnesses(&[&redeem_script(&signers[0].public)]);
    let message = tx.message();

    // Sign with the first and third key, pushed in the same relative
    // order as the keys.
    let sig_a = sign(&message, &signers[0]);
    let sig_c = sign(&message, &signers[2]);

    let mut builder = ScriptBuilder::new();
    builder.emit_push_bytes(&sig_a);
    builder.emit_push_bytes(&sig_c);
    builder.emit(OpCode::PUSH2);
    for s in &signers {
        builder.emit_push_bytes(&s.public);
    }
    builder.emit(OpCode::PUSH3);
    builder.emit(OpCode::CHECKMULTISIG).emit(OpCode::RET);

    let result = engine_with_tx(chain(), tx.clone()).execute_script(builder.into_bytes(), gas());
    assert_halted(&result);
    assert!(top_bool(&result));

    // Out-of-order signatures fail the forward cursor.
    let mut builder = ScriptBuilder::new();
    builder.emit_push_bytes(&sig_c);
    builder.emit_push_bytes(&sig_a);
    builder.emit(OpCode::PUSH2);
    for s in &signers {
        builder.emit_push_bytes(&s.public);
    }
    builder.emit(OpCode::PUSH3);
    builder.emit(OpCode::CHECKMULTISIG).emit(OpCode::RET);

    let result = engine_with_tx(chain(), tx).execute_script(builder.into_bytes(), gas());
    assert_halted(&result);
    assert!(!top_bool(&result));
}

/// More signatures than keys can never verify.
#[test]
fn multisig_rejects_excess_signatures() {
    let signer = signer();
    let tx = tx_with_witnesses(&[&redeem_script(&signer.public)]);
    let signature = sign(&tx.message(), &signer);

    let mut builder = ScriptBuilder::new();
    builder.emit_push_bytes(&signature);
    builder.emit_push_bytes(&signature);
    builder.emit(OpCode::PUSH2);
    builder.emit_push_bytes(&signer.public);
    builder.emit(OpCode::PUSH1);
    builder.emit(OpCode::CHECKMULTISIG).emit(OpCode::RET);

    let result = engine_with_tx(chain(), tx).execute_script(builder.into_bytes(), gas());
    assert_halted(&result);
    assert!(!top_bool(&result));
}
