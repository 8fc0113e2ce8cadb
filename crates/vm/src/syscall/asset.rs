//! `Neo.Asset.*`: asset registration and renewal.

use super::signature_redeem_script;
use crate::execution_context::ExecutionContext;
use crate::execution_engine::ExecutionEngine;
use crate::limits::{BLOCK_HEIGHT_YEAR, MAX_ASSET_NAME_LENGTH};
use crate::stack_item::{InteropObject, StackItem};
use crate::{VmError, VmResult};
use neo_core::{Fixed8, UInt160};
use neo_cryptography::hash;
use neo_ledger::{Asset, AssetType, TransactionType};
use std::sync::Arc;

/// Arguments, top-first: issuer, admin, owner, precision, amount, name,
/// type. The asset id is the hash of the registering transaction.
pub(super) fn create(
    engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    let tx = engine
        .container()
        .and_then(|container| container.as_transaction().cloned())
        .ok_or(VmError::UnexpectedScriptContainer)?;
    if tx.tx_type != TransactionType::Invocation {
        return Err(VmError::UnexpectedScriptContainer);
    }

    let asset_type = AssetType::from_byte(args[6].as_i64()? as u8)
        .map_err(|_| VmError::InvalidAssetType)?;
    if matches!(
        asset_type,
        AssetType::GoverningToken | AssetType::UtilityToken
    ) {
        return Err(VmError::InvalidAssetType);
    }

    let name_bytes = args[5].as_bytes()?;
    if name_bytes.len() > MAX_ASSET_NAME_LENGTH {
        return Err(VmError::invalid_arguments(
            "Asset.Create",
            format!("name of {} bytes is too long", name_bytes.len()),
        ));
    }
    let name = String::from_utf8_lossy(&name_bytes).into_owned();

    let amount = Fixed8::from_raw(args[4].as_i64()?);
    let precision = args[3].as_i64()?;
    if !(0..=8).contains(&precision) {
        return Err(VmError::invalid_arguments(
            "Asset.Create",
            format!("precision {precision} out of range"),
        ));
    }

    let owner = args[2].as_ec_point()?;
    if owner.is_infinity() {
        return Err(VmError::invalid_arguments(
            "Asset.Create",
            "owner cannot be infinity",
        ));
    }
    let owner_hash = UInt160::from(hash::hash160(&signature_redeem_script(&owner)));
    if !engine.check_witness(&owner_hash)? {
        return Err(VmError::BadWitness);
    }
    engine.require_application_trigger()?;

    let admin = args[1].as_uint160()?;
    let issuer = args[0].as_uint160()?;

    let asset = Asset {
        id: tx.hash(),
        asset_type,
        name,
        amount,
        available: Fixed8::ZERO,
        precision: precision as u8,
        owner,
        admin,
        issuer,
        expiration: engine.blockchain().current_height() + 1 + BLOCK_HEIGHT_YEAR,
        is_frozen: false,
    };
    engine.blockchain().put_asset(asset.clone());
    Ok(vec![StackItem::Interop(InteropObject::Asset(Arc::new(
        asset,
    )))])
}

/// Extends an asset registration by whole years, from the later of its
/// current expiration and the next block.
pub(super) fn renew(
    engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    engine.require_application_trigger()?;
    let years = args[0].as_index("Asset.Renew")? as u64;
    let mut asset = (*args[1].as_asset()?).clone();

    let height = engine.blockchain().current_height();
    let base = (asset.expiration as u64).max(height as u64 + 1);
    let renewed = base.saturating_add(years.saturating_mul(BLOCK_HEIGHT_YEAR as u64));
    asset.expiration = renewed.min(u32::MAX as u64) as u32;

    engine.blockchain().put_asset(asset.clone());
    Ok(vec![StackItem::integer(asset.expiration)])
}
