//! Error types for VM execution.
//!
//! Every variant is a fault: it terminates the current script and unwinds
//! the whole invocation tree. There is no opcode-level catch.

use thiserror::Error;

/// Faults raised while decoding or executing a script.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VmError {
    // Decode faults.
    /// The byte at the program counter is not a known opcode.
    #[error("unknown opcode {opcode:#04x}")]
    UnknownOpCode { opcode: u8 },

    /// An instruction or jump target ran past the end of the script.
    #[error("code overflow at position {position}")]
    CodeOverflow { position: usize },

    /// A non-push opcode appeared in a push-only context.
    #[error("opcode {opcode:#04x} not allowed in push-only script")]
    PushOnlyViolation { opcode: u8 },

    /// The SYSCALL name did not resolve through the alias or primary table.
    #[error("unknown syscall: {name}")]
    UnknownSyscall { name: String },

    // Type faults.
    /// A stack item could not be coerced to the required type.
    #[error("invalid type: cannot use {actual} as {expected}")]
    InvalidType {
        expected: &'static str,
        actual: &'static str,
    },

    /// An index was out of range for a collection.
    #[error("invalid index {index} for length {length}")]
    InvalidIndex { index: i64, length: usize },

    /// An opcode or syscall received arguments it cannot interpret.
    #[error("invalid arguments for {operation}: {reason}")]
    InvalidArguments {
        operation: &'static str,
        reason: String,
    },

    /// A count or offset argument was negative.
    #[error("negative argument for {operation}")]
    NegativeArgument { operation: &'static str },

    /// Division or modulo by zero.
    #[error("division by zero")]
    DivisionByZero,

    // Resource faults.
    /// The operand stacks would exceed the combined size limit.
    #[error("stack overflow: limit {max}")]
    StackOverflow { max: usize },

    /// Too few items on a stack for the opcode's inputs.
    #[error("stack underflow: needed {needed}, had {available}")]
    StackUnderflow { needed: usize, available: usize },

    /// Nested invocations exceeded the depth limit.
    #[error("invocation stack overflow: limit {max}")]
    InvocationStackOverflow { max: u32 },

    /// The gas budget cannot cover the next fee.
    #[error("out of gas")]
    OutOfGas,

    /// A byte string exceeded the per-item size limit.
    #[error("item of {size} bytes exceeds limit {max}")]
    ItemTooLarge { size: usize, max: usize },

    /// An array exceeded the length limit.
    #[error("array of {size} items exceeds limit {max}")]
    ArrayTooLarge { size: usize, max: usize },

    /// A script exceeded the length limit.
    #[error("script of {size} bytes exceeds limit {max}")]
    ScriptTooLarge { size: usize, max: usize },

    // Semantic faults.
    /// A required witness was not present on the script container.
    #[error("bad witness")]
    BadWitness,

    /// A referenced entity does not exist in the ledger view.
    #[error("{kind} not found: {key}")]
    ItemNotFound { kind: &'static str, key: String },

    /// The target contract was not declared with storage.
    #[error("contract has no storage: {hash}")]
    ContractNoStorage { hash: String },

    /// A storage context was used by a script that does not own it.
    #[error("invalid storage context")]
    InvalidStorageContext,

    /// The account is frozen and cannot vote.
    #[error("account is frozen: {hash}")]
    AccountFrozen { hash: String },

    /// The vote list exceeded the limit.
    #[error("{count} votes exceed limit {max}")]
    TooManyVotes { count: usize, max: usize },

    /// An account with no governing-token balance cannot vote.
    #[error("account not eligible to vote")]
    NotEligibleVote,

    /// The operation requires a script container this execution lacks.
    #[error("unexpected script container")]
    UnexpectedScriptContainer,

    /// The asset type is not permitted for the operation.
    #[error("invalid asset type")]
    InvalidAssetType,

    /// The operation requires the Application trigger.
    #[error("state mutation requires the Application trigger")]
    InvalidTrigger,

    // Explicit faults.
    /// THROW, or THROWIFNOT with a false condition.
    #[error("script threw")]
    Throw,
}

impl VmError {
    /// Convenience constructor for argument faults.
    pub fn invalid_arguments(operation: &'static str, reason: impl Into<String>) -> Self {
        VmError::InvalidArguments {
            operation,
            reason: reason.into(),
        }
    }
}

/// The result type for VM operations.
pub type VmResult<T> = std::result::Result<T, VmError>;
