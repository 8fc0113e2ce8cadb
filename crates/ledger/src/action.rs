//! Actions: the observable side effects a script emits.

use neo_core::{UInt160, UInt256};
use neo_cryptography::ECPoint;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

/// A serializable projection of a VM stack item, carried by notifications
/// and returned to RPC clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum ContractParameter {
    Signature(Vec<u8>),
    Boolean(bool),
    Integer(BigInt),
    Hash160(UInt160),
    Hash256(UInt256),
    ByteArray(Vec<u8>),
    PublicKey(ECPoint),
    String(String),
    Array(Vec<ContractParameter>),
    InteropInterface,
    Void,
}

/// The position of an action within the chain: which execution emitted it
/// and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionBase {
    pub block_index: u32,
    pub transaction_index: u32,
    pub transaction_hash: UInt256,
    /// Ordinal of the action within the invocation tree.
    pub index: u32,
    /// The script that emitted the action.
    pub script_hash: UInt160,
}

/// A log line emitted through `Neo.Runtime.Log`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogAction {
    #[serde(flatten)]
    pub base: ActionBase,
    pub message: String,
}

/// A notification emitted through `Neo.Runtime.Notify`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationAction {
    #[serde(flatten)]
    pub base: ActionBase,
    pub args: ContractParameter,
}

/// An observable side effect, ordered by `(block_index, transaction_index,
/// index)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Action {
    Log(LogAction),
    Notification(NotificationAction),
}

impl Action {
    /// The common positioning fields.
    pub fn base(&self) -> &ActionBase {
        match self {
            Action::Log(log) => &log.base,
            Action::Notification(notification) => &notification.base,
        }
    }
}
