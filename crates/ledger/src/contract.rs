//! Deployed contracts.

use crate::{LedgerError, LedgerResult};
use neo_core::UInt160;
use neo_cryptography::hash;
use serde::{Deserialize, Serialize};

/// The declared type of a contract parameter or return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ContractParameterType {
    Signature = 0x00,
    Boolean = 0x01,
    Integer = 0x02,
    Hash160 = 0x03,
    Hash256 = 0x04,
    ByteArray = 0x05,
    PublicKey = 0x06,
    String = 0x07,
    Array = 0x10,
    InteropInterface = 0xf0,
    Void = 0xff,
}

impl ContractParameterType {
    /// Decodes the wire byte.
    pub fn from_byte(value: u8) -> LedgerResult<Self> {
        match value {
            0x00 => Ok(ContractParameterType::Signature),
            0x01 => Ok(ContractParameterType::Boolean),
            0x02 => Ok(ContractParameterType::Integer),
            0x03 => Ok(ContractParameterType::Hash160),
            0x04 => Ok(ContractParameterType::Hash256),
            0x05 => Ok(ContractParameterType::ByteArray),
            0x06 => Ok(ContractParameterType::PublicKey),
            0x07 => Ok(ContractParameterType::String),
            0x10 => Ok(ContractParameterType::Array),
            0xf0 => Ok(ContractParameterType::InteropInterface),
            0xff => Ok(ContractParameterType::Void),
            other => Err(LedgerError::UnknownValue {
                kind: "contract parameter type",
                value: other,
            }),
        }
    }
}

/// Property flags of a deployed contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractPropertyState(pub u8);

impl ContractPropertyState {
    pub const NO_PROPERTY: ContractPropertyState = ContractPropertyState(0x00);
    pub const HAS_STORAGE: ContractPropertyState = ContractPropertyState(0x01);
    pub const HAS_DYNAMIC_INVOKE: ContractPropertyState = ContractPropertyState(0x02);
    pub const PAYABLE: ContractPropertyState = ContractPropertyState(0x04);

    /// True if the storage bit is set.
    pub fn has_storage(self) -> bool {
        self.0 & Self::HAS_STORAGE.0 != 0
    }

    /// True if the dynamic-invoke bit is set.
    pub fn has_dynamic_invoke(self) -> bool {
        self.0 & Self::HAS_DYNAMIC_INVOKE.0 != 0
    }
}

impl Default for ContractParameterType {
    fn default() -> Self {
        ContractParameterType::Void
    }
}

/// A deployed contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub script: Vec<u8>,
    pub parameter_list: Vec<ContractParameterType>,
    pub return_type: ContractParameterType,
    pub properties: ContractPropertyState,
    pub name: String,
    pub code_version: String,
    pub author: String,
    pub email: String,
    pub description: String,
}

impl Contract {
    /// The identifying hash: hash160 of the script.
    pub fn script_hash(&self) -> UInt160 {
        UInt160::from(hash::hash160(&self.script))
    }

    /// True if the contract may use persistent storage.
    pub fn has_storage(&self) -> bool {
        self.properties.has_storage()
    }
}
