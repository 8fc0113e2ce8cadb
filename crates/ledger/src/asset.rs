//! Registered assets.

use crate::{LedgerError, LedgerResult};
use neo_core::{Fixed8, UInt160, UInt256};
use neo_cryptography::ECPoint;
use serde::{Deserialize, Serialize};

/// The class of a registered asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AssetType {
    CreditFlag = 0x40,
    DutyFlag = 0x80,
    GoverningToken = 0x00,
    UtilityToken = 0x01,
    Currency = 0x08,
    Share = 0x90,
    Invoice = 0x98,
    Token = 0x60,
}

impl AssetType {
    /// Decodes the wire byte.
    pub fn from_byte(value: u8) -> LedgerResult<Self> {
        match value {
            0x40 => Ok(AssetType::CreditFlag),
            0x80 => Ok(AssetType::DutyFlag),
            0x00 => Ok(AssetType::GoverningToken),
            0x01 => Ok(AssetType::UtilityToken),
            0x08 => Ok(AssetType::Currency),
            0x90 => Ok(AssetType::Share),
            0x98 => Ok(AssetType::Invoice),
            0x60 => Ok(AssetType::Token),
            other => Err(LedgerError::UnknownValue {
                kind: "asset type",
                value: other,
            }),
        }
    }
}

/// A registered asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// The asset id: the hash of the registering transaction.
    pub id: UInt256,
    pub asset_type: AssetType,
    pub name: String,
    /// Total supply.
    pub amount: Fixed8,
    /// Amount already issued.
    pub available: Fixed8,
    pub precision: u8,
    pub owner: ECPoint,
    pub admin: UInt160,
    pub issuer: UInt160,
    /// Height at which the registration lapses.
    pub expiration: u32,
    pub is_frozen: bool,
}
