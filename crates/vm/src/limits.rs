//! Resource limits and the fee schedule.
//!
//! Every limit here is consensus-critical: implementations must agree on
//! the exact step at which a script faults.

/// Combined size limit for the main and alt operand stacks.
pub const MAX_STACK_SIZE: usize = 2048;

/// Maximum depth of nested invocation frames.
pub const MAX_INVOCATION_STACK_SIZE: u32 = 1024;

/// Maximum number of elements in an Array or Struct.
pub const MAX_ARRAY_SIZE: usize = 1024;

/// Maximum byte length of a single stack item.
pub const MAX_ITEM_SIZE: usize = 1024 * 1024;

/// Maximum byte length of a script.
pub const MAX_SCRIPT_LENGTH: usize = 1024 * 1024;

/// Maximum number of votes an account may cast.
pub const MAX_VOTES: usize = 1024;

/// Approximate number of blocks produced per year; used for asset renewal.
pub const BLOCK_HEIGHT_YEAR: u32 = 2_000_000;

/// Maximum byte length of an asset name.
pub const MAX_ASSET_NAME_LENGTH: usize = 1024;

/// Maximum byte length of a SYSCALL name.
pub const MAX_SYSCALL_NAME_LENGTH: u64 = 252;

/// Maximum byte length of a contract storage key.
pub const MAX_STORAGE_KEY_SIZE: usize = 1024;

/// Largest magnitude accepted as a SHL/SHR shift count.
pub const MAX_SHIFT: i64 = 65535;

/// Gas fees in raw `Fixed8` units (10^-8 GAS).
pub mod fee {
    /// Charged for every opcode without a specific entry.
    pub const DEFAULT: i64 = 1;

    /// CHECKSIG, and CHECKMULTISIG per public key.
    pub const SIGNATURE_VERIFY: i64 = 100_000;

    /// Runtime, accessor and execution-engine syscalls.
    pub const RUNTIME: i64 = 1;

    /// Witness checks resolve scripts and search the witness set.
    pub const CHECK_WITNESS: i64 = 200;

    /// Blockchain readers hit the ledger facade.
    pub const BLOCKCHAIN_READ: i64 = 100;

    /// Storage reads.
    pub const STORAGE_GET: i64 = 100;

    /// Storage writes and deletes.
    pub const STORAGE_WRITE: i64 = 1_000;

    /// Asset, contract, validator and vote management.
    pub const MANAGEMENT: i64 = 1_000_000;
}
