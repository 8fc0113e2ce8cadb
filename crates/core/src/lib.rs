//! Core value types for the legacy Neo implementation.
//!
//! This crate provides the fixed-width hash types, the `Fixed8` fixed-point
//! number used for gas and asset amounts, and the binary reader/writer used
//! by wire-level encodings.

pub mod error;
pub mod fixed8;
pub mod io;
pub mod uint160;
pub mod uint256;

pub use error::CoreError;
pub use fixed8::Fixed8;
pub use io::{BinaryReader, BinaryWriter};
pub use uint160::UInt160;
pub use uint256::UInt256;

/// The result type for core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;
