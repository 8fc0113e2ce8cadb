//! Programmatic construction of legacy scripts, used by tests and by
//! embedders assembling invocation scripts.

use crate::limits::MAX_SYSCALL_NAME_LENGTH;
use crate::op_code::OpCode;
use crate::stack_item::bigint_to_bytes;
use crate::{VmError, VmResult};
use neo_core::UInt160;
use num_bigint::BigInt;
use num_traits::ToPrimitive;

/// Accumulates script bytes, choosing minimal push encodings.
#[derive(Debug, Default)]
pub struct ScriptBuilder {
    script: Vec<u8>,
}

impl ScriptBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits a bare opcode.
    pub fn emit(&mut self, op: OpCode) -> &mut Self {
        self.script.push(op.as_byte());
        self
    }

    /// Emits raw bytes without interpretation.
    pub fn emit_raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.script.extend_from_slice(bytes);
        self
    }

    /// Pushes an integer with the shortest encoding: PUSHM1/PUSH0/PUSH1-16
    /// where possible, otherwise its canonical bytes.
    pub fn emit_push_int(&mut self, value: impl Into<BigInt>) -> &mut Self {
        let value = value.into();
        if value == BigInt::from(-1) {
            return self.emit(OpCode::PUSHM1);
        }
        if value == BigInt::from(0) {
            return self.emit(OpCode::PUSH0);
        }
        if let Some(small @ 1..=16) = value.to_u8() {
            self.script.push(OpCode::PUSH1.as_byte() + small - 1);
            return self;
        }
        let bytes = bigint_to_bytes(&value);
        self.emit_push_bytes(&bytes)
    }

    /// Pushes a byte string with the shortest encoding.
    pub fn emit_push_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        match bytes.len() {
            0 => {
                self.emit(OpCode::PUSH0);
            }
            1..=75 => {
                self.script.push(bytes.len() as u8);
                self.script.extend_from_slice(bytes);
            }
            76..=0xFF => {
                self.emit(OpCode::PUSHDATA1);
                self.script.push(bytes.len() as u8);
                self.script.extend_from_slice(bytes);
            }
            0x100..=0xFFFF => {
                self.emit(OpCode::PUSHDATA2);
                self.script
                    .extend_from_slice(&(bytes.len() as u16).to_le_bytes());
                self.script.extend_from_slice(bytes);
            }
            _ => {
                self.emit(OpCode::PUSHDATA4);
                self.script
                    .extend_from_slice(&(bytes.len() as u32).to_le_bytes());
                self.script.extend_from_slice(bytes);
            }
        }
        self
    }

    /// Pushes a boolean as PUSH0/PUSH1.
    pub fn emit_push_bool(&mut self, value: bool) -> &mut Self {
        self.emit(if value { OpCode::PUSH1 } else { OpCode::PUSH0 })
    }

    /// Emits a jump or CALL with its 2-byte offset, relative to the
    /// opcode byte.
    pub fn emit_jump(&mut self, op: OpCode, offset: i16) -> &mut Self {
        self.emit(op);
        self.script.extend_from_slice(&offset.to_le_bytes());
        self
    }

    /// Emits APPCALL with a static target.
    pub fn emit_appcall(&mut self, hash: &UInt160) -> &mut Self {
        self.emit(OpCode::APPCALL);
        self.script.extend_from_slice(hash.as_bytes());
        self
    }

    /// Emits TAILCALL with a static target.
    pub fn emit_tailcall(&mut self, hash: &UInt160) -> &mut Self {
        self.emit(OpCode::TAILCALL);
        self.script.extend_from_slice(hash.as_bytes());
        self
    }

    /// Emits APPCALL with a zero hash; the target is taken from the stack.
    pub fn emit_dynamic_appcall(&mut self) -> &mut Self {
        self.emit(OpCode::APPCALL);
        self.script.extend_from_slice(&[0u8; 20]);
        self
    }

    /// Emits SYSCALL with a var-length name.
    pub fn emit_syscall(&mut self, name: &str) -> VmResult<&mut Self> {
        if name.len() as u64 > MAX_SYSCALL_NAME_LENGTH {
            return Err(VmError::invalid_arguments(
                "SYSCALL",
                format!("name of {} bytes is too long", name.len()),
            ));
        }
        self.emit(OpCode::SYSCALL);
        self.script.push(name.len() as u8);
        self.script.extend_from_slice(name.as_bytes());
        Ok(self)
    }

    /// The accumulated bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.script.clone()
    }

    /// Consumes the builder.
    pub fn into_bytes(self) -> Vec<u8> {
        self.script
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_integer_encodings() {
        let mut builder = ScriptBuilder::new();
        builder
            .emit_push_int(-1)
            .emit_push_int(0)
            .emit_push_int(16)
            .emit_push_int(17);
        assert_eq!(builder.to_bytes(), vec![0x4F, 0x00, 0x60, 0x01, 0x11]);
    }

    #[test]
    fn push_bytes_encodings() {
        let mut builder = ScriptBuilder::new();
        builder.emit_push_bytes(&[0xAB; 3]);
        assert_eq!(&builder.to_bytes()[..1], &[0x03]);

        let mut builder = ScriptBuilder::new();
        builder.emit_push_bytes(&[0xAB; 80]);
        assert_eq!(&builder.to_bytes()[..2], &[0x4C, 80]);

        let mut builder = ScriptBuilder::new();
        builder.emit_push_bytes(&[0xAB; 300]);
        assert_eq!(&builder.to_bytes()[..3], &[0x4D, 0x2C, 0x01]);
    }

    #[test]
    fn syscall_encoding() {
        let mut builder = ScriptBuilder::new();
        builder.emit_syscall("Neo.Runtime.Log").unwrap();
        let bytes = builder.to_bytes();
        assert_eq!(bytes[0], OpCode::SYSCALL.as_byte());
        assert_eq!(bytes[1] as usize, "Neo.Runtime.Log".len());
        assert_eq!(&bytes[2..], b"Neo.Runtime.Log");
    }

    #[test]
    fn syscall_name_length_is_capped() {
        let long = "N".repeat(300);
        assert!(ScriptBuilder::new().emit_syscall(&long).is_err());
    }

    #[test]
    fn jumps_carry_little_endian_offsets() {
        let mut builder = ScriptBuilder::new();
        builder.emit_jump(OpCode::JMP, -3);
        assert_eq!(builder.to_bytes(), vec![0x62, 0xFD, 0xFF]);
    }
}
