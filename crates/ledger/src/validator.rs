//! Consensus validators.

use neo_core::Fixed8;
use neo_cryptography::ECPoint;
use serde::{Deserialize, Serialize};

/// A registered consensus candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validator {
    pub public_key: ECPoint,
    pub registered: bool,
    pub votes: Fixed8,
}

impl Validator {
    /// Creates a freshly registered validator with no votes.
    pub fn new(public_key: ECPoint) -> Self {
        Self {
            public_key,
            registered: true,
            votes: Fixed8::ZERO,
        }
    }
}
