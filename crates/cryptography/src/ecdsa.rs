//! ECDSA over secp256r1 with SHA-256 digests.
//!
//! Signatures travel as 64 raw bytes (`r || s`), the format emitted by
//! wallets for witness invocation scripts.

use crate::ecpoint::ECPoint;
use crate::{CryptoError, CryptoResult};
use p256::ecdsa::signature::{Signer, Verifier};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};

/// Verifies a 64-byte `r || s` signature over `message` for the given
/// public key. Returns `false` for a well-formed but incorrect signature;
/// errors are reserved for inputs that are not a key or signature at all.
pub fn verify_signature(message: &[u8], signature: &[u8], pubkey: &ECPoint) -> CryptoResult<bool> {
    let encoded = match pubkey {
        ECPoint::Infinity => {
            return Err(CryptoError::InvalidKey {
                message: "cannot verify against the point at infinity".into(),
            })
        }
        ECPoint::Compressed(bytes) => bytes,
    };
    let key = VerifyingKey::from_sec1_bytes(encoded).map_err(|e| CryptoError::InvalidKey {
        message: format!("invalid verifying key: {e}"),
    })?;
    let signature =
        Signature::from_slice(signature).map_err(|e| CryptoError::InvalidSignature {
            message: format!("invalid signature encoding: {e}"),
        })?;
    Ok(key.verify(message, &signature).is_ok())
}

/// Signs `message` with a 32-byte private key, returning the 64-byte
/// `r || s` signature.
pub fn sign(message: &[u8], private_key: &[u8]) -> CryptoResult<Vec<u8>> {
    let key = SigningKey::from_slice(private_key).map_err(|e| CryptoError::InvalidKey {
        message: format!("invalid signing key: {e}"),
    })?;
    let signature: Signature = key.sign(message);
    Ok(signature.to_vec())
}

/// Returns the compressed public key for a 32-byte private key.
pub fn public_key(private_key: &[u8]) -> CryptoResult<ECPoint> {
    let key = SigningKey::from_slice(private_key).map_err(|e| CryptoError::InvalidKey {
        message: format!("invalid signing key: {e}"),
    })?;
    let encoded = key.verifying_key().to_encoded_point(true);
    ECPoint::decode(encoded.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use p256::ecdsa::SigningKey;
    use rand_core::OsRng;

    fn random_key() -> (Vec<u8>, ECPoint) {
        let key = SigningKey::random(&mut OsRng);
        let private = key.to_bytes().to_vec();
        let public = ECPoint::decode(key.verifying_key().to_encoded_point(true).as_bytes())
            .expect("compressed encoding is always a valid point");
        (private, public)
    }

    #[test]
    fn sign_and_verify_round_trip() {
        let (private, public) = random_key();
        let message = b"deterministic message bytes";
        let signature = sign(message, &private).unwrap();
        assert_eq!(signature.len(), 64);
        assert!(verify_signature(message, &signature, &public).unwrap());
        assert!(!verify_signature(b"other message", &signature, &public).unwrap());
    }

    #[test]
    fn wrong_key_fails_verification() {
        let (private, _) = random_key();
        let (_, other_public) = random_key();
        let message = b"payload";
        let signature = sign(message, &private).unwrap();
        assert!(!verify_signature(message, &signature, &other_public).unwrap());
    }

    #[test]
    fn infinity_is_not_a_verifying_key() {
        assert!(verify_signature(b"m", &[0u8; 64], &ECPoint::Infinity).is_err());
    }

    #[test]
    fn public_key_matches_signing_key() {
        let (private, public) = random_key();
        assert_eq!(public_key(&private).unwrap(), public);
    }
}
