//! Error types for the core crate.

use thiserror::Error;

/// Errors raised by the core value types and binary codecs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A value could not be parsed from its textual or binary form.
    #[error("invalid format: {message}")]
    InvalidFormat { message: String },

    /// A reader ran past the end of its input.
    #[error("unexpected end of input: needed {needed} bytes, {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    /// A length prefix exceeded the caller-supplied maximum.
    #[error("length {length} exceeds maximum {max}")]
    LengthTooLong { length: u64, max: u64 },

    /// An arithmetic operation overflowed.
    #[error("numeric overflow in {operation}")]
    Overflow { operation: String },
}

impl CoreError {
    /// Convenience constructor for format errors.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        CoreError::InvalidFormat {
            message: message.into(),
        }
    }
}
