//! An executable script and its identifying hash.

use crate::limits::MAX_SCRIPT_LENGTH;
use crate::{VmError, VmResult};
use neo_core::UInt160;
use neo_cryptography::hash;
use std::sync::Arc;

/// Immutable script bytes plus the hash160 that identifies them.
#[derive(Debug, Clone)]
pub struct Script {
    bytes: Arc<Vec<u8>>,
    hash: UInt160,
}

impl Script {
    /// Wraps script bytes, enforcing the length limit.
    pub fn new(bytes: Vec<u8>) -> VmResult<Self> {
        if bytes.len() > MAX_SCRIPT_LENGTH {
            return Err(VmError::ScriptTooLarge {
                size: bytes.len(),
                max: MAX_SCRIPT_LENGTH,
            });
        }
        let hash = UInt160::from(hash::hash160(&bytes));
        Ok(Self {
            bytes: Arc::new(bytes),
            hash,
        })
    }

    /// The script hash.
    pub fn hash(&self) -> UInt160 {
        self.hash
    }

    /// Byte length of the script.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True for the empty script.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The byte at `position`, or a code-overflow fault.
    pub fn byte_at(&self, position: usize) -> VmResult<u8> {
        self.bytes
            .get(position)
            .copied()
            .ok_or(VmError::CodeOverflow { position })
    }

    /// A slice of `count` bytes starting at `position`.
    pub fn slice(&self, position: usize, count: usize) -> VmResult<&[u8]> {
        let end = position
            .checked_add(count)
            .ok_or(VmError::CodeOverflow { position })?;
        self.bytes
            .get(position..end)
            .ok_or(VmError::CodeOverflow { position })
    }
}
