//! Hashing and secp256r1 primitives for the legacy Neo implementation.

pub mod ecdsa;
pub mod ecpoint;
pub mod hash;

pub use ecdsa::{sign, verify_signature};
pub use ecpoint::ECPoint;

use thiserror::Error;

/// Errors raised by the cryptographic primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The bytes do not encode a point on the curve.
    #[error("invalid EC point: {message}")]
    InvalidPoint { message: String },

    /// The signature bytes are malformed.
    #[error("invalid signature: {message}")]
    InvalidSignature { message: String },

    /// The private key bytes are malformed.
    #[error("invalid key: {message}")]
    InvalidKey { message: String },
}

/// The result type for cryptographic operations.
pub type CryptoResult<T> = std::result::Result<T, CryptoError>;
