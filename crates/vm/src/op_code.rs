//! The legacy opcode byte map.
//!
//! The byte values are consensus-critical and must match other
//! implementations byte-for-byte.

use crate::{VmError, VmResult};

/// An instruction of the legacy VM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(clippy::upper_case_acronyms)]
pub enum OpCode {
    /// Pushes an empty byte string onto the stack.
    PUSH0 = 0x00,
    // PUSHBYTES1 through PUSHBYTES75 copy that many immediate bytes.
    PUSHBYTES1 = 0x01,
    PUSHBYTES2 = 0x02,
    PUSHBYTES3 = 0x03,
    PUSHBYTES4 = 0x04,
    PUSHBYTES5 = 0x05,
    PUSHBYTES6 = 0x06,
    PUSHBYTES7 = 0x07,
    PUSHBYTES8 = 0x08,
    PUSHBYTES9 = 0x09,
    PUSHBYTES10 = 0x0A,
    PUSHBYTES11 = 0x0B,
    PUSHBYTES12 = 0x0C,
    PUSHBYTES13 = 0x0D,
    PUSHBYTES14 = 0x0E,
    PUSHBYTES15 = 0x0F,
    PUSHBYTES16 = 0x10,
    PUSHBYTES17 = 0x11,
    PUSHBYTES18 = 0x12,
    PUSHBYTES19 = 0x13,
    PUSHBYTES20 = 0x14,
    PUSHBYTES21 = 0x15,
    PUSHBYTES22 = 0x16,
    PUSHBYTES23 = 0x17,
    PUSHBYTES24 = 0x18,
    PUSHBYTES25 = 0x19,
    PUSHBYTES26 = 0x1A,
    PUSHBYTES27 = 0x1B,
    PUSHBYTES28 = 0x1C,
    PUSHBYTES29 = 0x1D,
    PUSHBYTES30 = 0x1E,
    PUSHBYTES31 = 0x1F,
    PUSHBYTES32 = 0x20,
    PUSHBYTES33 = 0x21,
    PUSHBYTES34 = 0x22,
    PUSHBYTES35 = 0x23,
    PUSHBYTES36 = 0x24,
    PUSHBYTES37 = 0x25,
    PUSHBYTES38 = 0x26,
    PUSHBYTES39 = 0x27,
    PUSHBYTES40 = 0x28,
    PUSHBYTES41 = 0x29,
    PUSHBYTES42 = 0x2A,
    PUSHBYTES43 = 0x2B,
    PUSHBYTES44 = 0x2C,
    PUSHBYTES45 = 0x2D,
    PUSHBYTES46 = 0x2E,
    PUSHBYTES47 = 0x2F,
    PUSHBYTES48 = 0x30,
    PUSHBYTES49 = 0x31,
    PUSHBYTES50 = 0x32,
    PUSHBYTES51 = 0x33,
    PUSHBYTES52 = 0x34,
    PUSHBYTES53 = 0x35,
    PUSHBYTES54 = 0x36,
    PUSHBYTES55 = 0x37,
    PUSHBYTES56 = 0x38,
    PUSHBYTES57 = 0x39,
    PUSHBYTES58 = 0x3A,
    PUSHBYTES59 = 0x3B,
    PUSHBYTES60 = 0x3C,
    PUSHBYTES61 = 0x3D,
    PUSHBYTES62 = 0x3E,
    PUSHBYTES63 = 0x3F,
    PUSHBYTES64 = 0x40,
    PUSHBYTES65 = 0x41,
    PUSHBYTES66 = 0x42,
    PUSHBYTES67 = 0x43,
    PUSHBYTES68 = 0x44,
    PUSHBYTES69 = 0x45,
    PUSHBYTES70 = 0x46,
    PUSHBYTES71 = 0x47,
    PUSHBYTES72 = 0x48,
    PUSHBYTES73 = 0x49,
    PUSHBYTES74 = 0x4A,
    PUSHBYTES75 = 0x4B,
    /// Pushes data with a 1-byte length prefix.
    PUSHDATA1 = 0x4C,
    /// Pushes data with a 2-byte little-endian length prefix.
    PUSHDATA2 = 0x4D,
    /// Pushes data with a 4-byte little-endian length prefix.
    PUSHDATA4 = 0x4E,
    /// Pushes the integer -1.
    PUSHM1 = 0x4F,
    PUSH1 = 0x51,
    PUSH2 = 0x52,
    PUSH3 = 0x53,
    PUSH4 = 0x54,
    PUSH5 = 0x55,
    PUSH6 = 0x56,
    PUSH7 = 0x57,
    PUSH8 = 0x58,
    PUSH9 = 0x59,
    PUSH10 = 0x5A,
    PUSH11 = 0x5B,
    PUSH12 = 0x5C,
    PUSH13 = 0x5D,
    PUSH14 = 0x5E,
    PUSH15 = 0x5F,
    PUSH16 = 0x60,

    // Flow control.
    NOP = 0x61,
    /// Unconditional jump with a 2-byte signed offset relative to the opcode.
    JMP = 0x62,
    JMPIF = 0x63,
    JMPIFNOT = 0x64,
    /// Jump into a new invocation frame; RET returns past the offset.
    CALL = 0x65,
    RET = 0x66,
    /// Invoke the contract named by a 20-byte script hash.
    APPCALL = 0x67,
    /// Invoke a named system call.
    SYSCALL = 0x68,
    /// Like APPCALL, but replaces the current frame.
    TAILCALL = 0x69,

    // Alt stack.
    DUPFROMALTSTACK = 0x6A,
    TOALTSTACK = 0x6B,
    FROMALTSTACK = 0x6C,

    // Stack manipulation.
    XDROP = 0x6D,
    XSWAP = 0x72,
    XTUCK = 0x73,
    DEPTH = 0x74,
    DROP = 0x75,
    DUP = 0x76,
    NIP = 0x77,
    OVER = 0x78,
    PICK = 0x79,
    ROLL = 0x7A,
    ROT = 0x7B,
    SWAP = 0x7C,
    TUCK = 0x7D,

    // Byte strings.
    CAT = 0x7E,
    SUBSTR = 0x7F,
    LEFT = 0x80,
    RIGHT = 0x81,
    SIZE = 0x82,

    // Bitwise and equality.
    INVERT = 0x83,
    AND = 0x84,
    OR = 0x85,
    XOR = 0x86,
    EQUAL = 0x87,

    // Unary arithmetic.
    INC = 0x8B,
    DEC = 0x8C,
    SIGN = 0x8D,
    NEGATE = 0x8F,
    ABS = 0x90,
    NOT = 0x91,
    NZ = 0x92,

    // Binary arithmetic and comparison.
    ADD = 0x93,
    SUB = 0x94,
    MUL = 0x95,
    DIV = 0x96,
    MOD = 0x97,
    SHL = 0x98,
    SHR = 0x99,
    BOOLAND = 0x9A,
    BOOLOR = 0x9B,
    NUMEQUAL = 0x9C,
    NUMNOTEQUAL = 0x9E,
    LT = 0x9F,
    GT = 0xA0,
    LTE = 0xA1,
    GTE = 0xA2,
    MIN = 0xA3,
    MAX = 0xA4,
    WITHIN = 0xA5,

    // Cryptography.
    SHA1 = 0xA7,
    SHA256 = 0xA8,
    HASH160 = 0xA9,
    HASH256 = 0xAA,
    CHECKSIG = 0xAC,
    CHECKMULTISIG = 0xAE,

    // Collections.
    ARRAYSIZE = 0xC0,
    PACK = 0xC1,
    UNPACK = 0xC2,
    PICKITEM = 0xC3,
    SETITEM = 0xC4,
    NEWARRAY = 0xC5,
    NEWSTRUCT = 0xC6,

    // Exceptions.
    THROW = 0xF0,
    THROWIFNOT = 0xF1,
}

impl OpCode {
    /// Decodes an opcode byte.
    pub fn from_byte(byte: u8) -> VmResult<OpCode> {
        use OpCode::*;
        Ok(match byte {
            0x00 => PUSH0,
            // The PUSHBYTES discriminants are the byte values themselves.
            0x01..=0x4B => Self::push_bytes(byte as usize),
            0x4C => PUSHDATA1,
            0x4D => PUSHDATA2,
            0x4E => PUSHDATA4,
            0x4F => PUSHM1,
            0x51 => PUSH1,
            0x52 => PUSH2,
            0x53 => PUSH3,
            0x54 => PUSH4,
            0x55 => PUSH5,
            0x56 => PUSH6,
            0x57 => PUSH7,
            0x58 => PUSH8,
            0x59 => PUSH9,
            0x5A => PUSH10,
            0x5B => PUSH11,
            0x5C => PUSH12,
            0x5D => PUSH13,
            0x5E => PUSH14,
            0x5F => PUSH15,
            0x60 => PUSH16,
            0x61 => NOP,
            0x62 => JMP,
            0x63 => JMPIF,
            0x64 => JMPIFNOT,
            0x65 => CALL,
            0x66 => RET,
            0x67 => APPCALL,
            0x68 => SYSCALL,
            0x69 => TAILCALL,
            0x6A => DUPFROMALTSTACK,
            0x6B => TOALTSTACK,
            0x6C => FROMALTSTACK,
            0x6D => XDROP,
            0x72 => XSWAP,
            0x73 => XTUCK,
            0x74 => DEPTH,
            0x75 => DROP,
            0x76 => DUP,
            0x77 => NIP,
            0x78 => OVER,
            0x79 => PICK,
            0x7A => ROLL,
            0x7B => ROT,
            0x7C => SWAP,
            0x7D => TUCK,
            0x7E => CAT,
            0x7F => SUBSTR,
            0x80 => LEFT,
            0x81 => RIGHT,
            0x82 => SIZE,
            0x83 => INVERT,
            0x84 => AND,
            0x85 => OR,
            0x86 => XOR,
            0x87 => EQUAL,
            0x8B => INC,
            0x8C => DEC,
            0x8D => SIGN,
            0x8F => NEGATE,
            0x90 => ABS,
            0x91 => NOT,
            0x92 => NZ,
            0x93 => ADD,
            0x94 => SUB,
            0x95 => MUL,
            0x96 => DIV,
            0x97 => MOD,
            0x98 => SHL,
            0x99 => SHR,
            0x9A => BOOLAND,
            0x9B => BOOLOR,
            0x9C => NUMEQUAL,
            0x9E => NUMNOTEQUAL,
            0x9F => LT,
            0xA0 => GT,
            0xA1 => LTE,
            0xA2 => GTE,
            0xA3 => MIN,
            0xA4 => MAX,
            0xA5 => WITHIN,
            0xA7 => SHA1,
            0xA8 => SHA256,
            0xA9 => HASH160,
            0xAA => HASH256,
            0xAC => CHECKSIG,
            0xAE => CHECKMULTISIG,
            0xC0 => ARRAYSIZE,
            0xC1 => PACK,
            0xC2 => UNPACK,
            0xC3 => PICKITEM,
            0xC4 => SETITEM,
            0xC5 => NEWARRAY,
            0xC6 => NEWSTRUCT,
            0xF0 => THROW,
            0xF1 => THROWIFNOT,
            other => return Err(VmError::UnknownOpCode { opcode: other }),
        })
    }

    fn push_bytes(count: usize) -> OpCode {
        use OpCode::*;
        const TABLE: [OpCode; 75] = [
            PUSHBYTES1,
            PUSHBYTES2,
            PUSHBYTES3,
            PUSHBYTES4,
            PUSHBYTES5,
            PUSHBYTES6,
            PUSHBYTES7,
            PUSHBYTES8,
            PUSHBYTES9,
            PUSHBYTES10,
            PUSHBYTES11,
            PUSHBYTES12,
            PUSHBYTES13,
            PUSHBYTES14,
            PUSHBYTES15,
            PUSHBYTES16,
            PUSHBYTES17,
            PUSHBYTES18,
            PUSHBYTES19,
            PUSHBYTES20,
            PUSHBYTES21,
            PUSHBYTES22,
            PUSHBYTES23,
            PUSHBYTES24,
            PUSHBYTES25,
            PUSHBYTES26,
            PUSHBYTES27,
            PUSHBYTES28,
            PUSHBYTES29,
            PUSHBYTES30,
            PUSHBYTES31,
            PUSHBYTES32,
            PUSHBYTES33,
            PUSHBYTES34,
            PUSHBYTES35,
            PUSHBYTES36,
            PUSHBYTES37,
            PUSHBYTES38,
            PUSHBYTES39,
            PUSHBYTES40,
            PUSHBYTES41,
            PUSHBYTES42,
            PUSHBYTES43,
            PUSHBYTES44,
            PUSHBYTES45,
            PUSHBYTES46,
            PUSHBYTES47,
            PUSHBYTES48,
            PUSHBYTES49,
            PUSHBYTES50,
            PUSHBYTES51,
            PUSHBYTES52,
            PUSHBYTES53,
            PUSHBYTES54,
            PUSHBYTES55,
            PUSHBYTES56,
            PUSHBYTES57,
            PUSHBYTES58,
            PUSHBYTES59,
            PUSHBYTES60,
            PUSHBYTES61,
            PUSHBYTES62,
            PUSHBYTES63,
            PUSHBYTES64,
            PUSHBYTES65,
            PUSHBYTES66,
            PUSHBYTES67,
            PUSHBYTES68,
            PUSHBYTES69,
            PUSHBYTES70,
            PUSHBYTES71,
            PUSHBYTES72,
            PUSHBYTES73,
            PUSHBYTES74,
            PUSHBYTES75,
        ];
        TABLE[count - 1]
    }

    /// The opcode byte.
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// True for the opcodes permitted in push-only scripts: the push
    /// family and RET.
    pub fn is_push_allowed(byte: u8) -> bool {
        byte <= OpCode::PUSH16.as_byte() || byte == OpCode::RET.as_byte()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_bytes_discriminants_match_count() {
        for count in 1..=75u8 {
            let op = OpCode::from_byte(count).unwrap();
            assert_eq!(op.as_byte(), count);
        }
    }

    #[test]
    fn named_opcodes_round_trip() {
        for op in [
            OpCode::PUSH0,
            OpCode::PUSHDATA4,
            OpCode::PUSHM1,
            OpCode::PUSH16,
            OpCode::JMP,
            OpCode::APPCALL,
            OpCode::SYSCALL,
            OpCode::TAILCALL,
            OpCode::XDROP,
            OpCode::TUCK,
            OpCode::EQUAL,
            OpCode::NUMNOTEQUAL,
            OpCode::WITHIN,
            OpCode::CHECKMULTISIG,
            OpCode::NEWSTRUCT,
            OpCode::THROWIFNOT,
        ] {
            assert_eq!(OpCode::from_byte(op.as_byte()).unwrap(), op);
        }
    }

    #[test]
    fn unknown_bytes_are_rejected() {
        for byte in [0x50u8, 0x6E, 0x88, 0x8E, 0x9D, 0xA6, 0xAB, 0xAD, 0xC7, 0xFF] {
            assert!(matches!(
                OpCode::from_byte(byte),
                Err(VmError::UnknownOpCode { opcode }) if opcode == byte
            ));
        }
    }

    #[test]
    fn push_only_boundary() {
        assert!(OpCode::is_push_allowed(0x60));
        assert!(OpCode::is_push_allowed(0x66));
        assert!(!OpCode::is_push_allowed(0x61));
        assert!(!OpCode::is_push_allowed(0x67));
    }
}
