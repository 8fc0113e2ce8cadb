//! Error types for the ledger crate.

use thiserror::Error;

/// Errors raised by ledger entities and the blockchain facade.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// An entity failed to decode from its binary or textual form.
    #[error("invalid encoding: {message}")]
    InvalidEncoding { message: String },

    /// A lookup referenced an entity that does not exist.
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    /// An enum discriminant byte was out of range.
    #[error("unknown {kind} value: {value:#04x}")]
    UnknownValue { kind: &'static str, value: u8 },
}
