//! Compressed secp256r1 points as used for validator and owner keys.

use crate::{CryptoError, CryptoResult};
use p256::elliptic_curve::sec1::EncodedPoint;
use p256::NistP256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A point on the secp256r1 curve in its wire form: either the 33-byte
/// compressed SEC1 encoding or the single byte `0x00` for the point at
/// infinity.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum ECPoint {
    /// The point at infinity, encoded as the single byte `0x00`.
    Infinity,
    /// A compressed point (prefix `0x02` or `0x03` followed by the X coordinate).
    Compressed([u8; 33]),
}

impl ECPoint {
    /// Decodes a point from its wire encoding, validating curve membership.
    pub fn decode(data: &[u8]) -> CryptoResult<Self> {
        match data {
            [0x00] => Ok(ECPoint::Infinity),
            bytes if bytes.len() == 33 && (bytes[0] == 0x02 || bytes[0] == 0x03) => {
                let point =
                    EncodedPoint::<NistP256>::from_bytes(bytes).map_err(|e| {
                        CryptoError::InvalidPoint {
                            message: format!("malformed encoding: {e}"),
                        }
                    })?;
                // Reject encodings that are well-formed but not on the curve.
                if p256::PublicKey::from_sec1_bytes(point.as_bytes()).is_err() {
                    return Err(CryptoError::InvalidPoint {
                        message: "not a point on secp256r1".into(),
                    });
                }
                let mut buf = [0u8; 33];
                buf.copy_from_slice(bytes);
                Ok(ECPoint::Compressed(buf))
            }
            bytes => Err(CryptoError::InvalidPoint {
                message: format!("unsupported encoding of {} bytes", bytes.len()),
            }),
        }
    }

    /// Returns the wire encoding.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            ECPoint::Infinity => vec![0x00],
            ECPoint::Compressed(bytes) => bytes.to_vec(),
        }
    }

    /// True for the point at infinity.
    pub fn is_infinity(&self) -> bool {
        matches!(self, ECPoint::Infinity)
    }
}

impl fmt::Display for ECPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.encode()))
    }
}

impl fmt::Debug for ECPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ECPoint({self})")
    }
}

impl Ord for ECPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.encode().cmp(&other.encode())
    }
}

impl PartialOrd for ECPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for ECPoint {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|e| CryptoError::InvalidPoint {
            message: format!("invalid hex: {e}"),
        })?;
        Self::decode(&bytes)
    }
}

impl Serialize for ECPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ECPoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Generator point of secp256r1, compressed.
    const GENERATOR: &str = "036b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296";

    #[test]
    fn decodes_generator() {
        let point: ECPoint = GENERATOR.parse().unwrap();
        assert!(!point.is_infinity());
        assert_eq!(point.to_string(), GENERATOR);
    }

    #[test]
    fn decodes_infinity() {
        let point = ECPoint::decode(&[0x00]).unwrap();
        assert!(point.is_infinity());
        assert_eq!(point.encode(), vec![0x00]);
    }

    #[test]
    fn rejects_bad_prefix_and_length() {
        assert!(ECPoint::decode(&[0x04; 33]).is_err());
        assert!(ECPoint::decode(&[0x02; 20]).is_err());
        assert!(ECPoint::decode(&[]).is_err());
    }

    #[test]
    fn rejects_x_not_on_curve() {
        let mut bytes = [0xffu8; 33];
        bytes[0] = 0x02;
        assert!(ECPoint::decode(&bytes).is_err());
    }

    #[test]
    fn orders_by_encoding() {
        let g: ECPoint = GENERATOR.parse().unwrap();
        assert!(ECPoint::Infinity < g);
    }
}
