//! Witnesses: the signature/verification script pairs attached to
//! transactions and blocks.

use neo_core::UInt160;
use neo_cryptography::hash;
use serde::{Deserialize, Serialize};

/// A witness authenticating a script hash.
///
/// The invocation script pushes signatures; the verification script is the
/// program whose hash identifies the authenticated party.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Witness {
    /// Script that pushes the signature arguments.
    pub invocation_script: Vec<u8>,
    /// Script that consumes the arguments and performs the check.
    pub verification_script: Vec<u8>,
}

impl Witness {
    /// Creates a witness from its two scripts.
    pub fn new(invocation_script: Vec<u8>, verification_script: Vec<u8>) -> Self {
        Self {
            invocation_script,
            verification_script,
        }
    }

    /// The script hash this witness authenticates: hash160 of the
    /// verification script.
    pub fn script_hash(&self) -> UInt160 {
        UInt160::from(hash::hash160(&self.verification_script))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_hash_is_hash160_of_verification_script() {
        let witness = Witness::new(vec![0x01], vec![0x21, 0xAC]);
        assert_eq!(
            witness.script_hash(),
            UInt160::from(hash::hash160(&[0x21, 0xAC]))
        );
    }
}
