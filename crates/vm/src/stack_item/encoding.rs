//! Little-endian two's-complement encoding of arbitrary-precision
//! integers, the canonical byte form of the Integer stack item.
//!
//! Zero encodes as the empty byte string; the sign lives in the most
//! significant bit of the last byte.

use num_bigint::BigInt;
use num_traits::Zero;

/// Encodes an integer into its minimal little-endian two's-complement form.
pub fn bigint_to_bytes(value: &BigInt) -> Vec<u8> {
    if value.is_zero() {
        return Vec::new();
    }
    value.to_signed_bytes_le()
}

/// Decodes a little-endian two's-complement byte string; empty is zero.
pub fn bigint_from_bytes(data: &[u8]) -> BigInt {
    if data.is_empty() {
        return BigInt::zero();
    }
    BigInt::from_signed_bytes_le(data)
}
