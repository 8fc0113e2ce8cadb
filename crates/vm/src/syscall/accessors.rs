//! Field accessors over the ledger objects carried on the stack.

use crate::execution_context::ExecutionContext;
use crate::execution_engine::ExecutionEngine;
use crate::stack_item::{InteropObject, StackItem};
use crate::{VmError, VmResult};
use std::sync::Arc;

fn one(item: StackItem) -> VmResult<Vec<StackItem>> {
    Ok(vec![item])
}

// Header. These accept both Header and Block items.

pub(super) fn header_hash(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    one(StackItem::Interop(InteropObject::Hash256(
        args[0].as_header()?.hash(),
    )))
}

pub(super) fn header_version(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    one(StackItem::integer(args[0].as_header()?.version))
}

pub(super) fn header_prev_hash(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    one(StackItem::Interop(InteropObject::Hash256(
        args[0].as_header()?.prev_hash,
    )))
}

pub(super) fn header_merkle_root(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    one(StackItem::Interop(InteropObject::Hash256(
        args[0].as_header()?.merkle_root,
    )))
}

pub(super) fn header_timestamp(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    one(StackItem::integer(args[0].as_header()?.timestamp))
}

pub(super) fn header_consensus_data(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    one(StackItem::integer(args[0].as_header()?.consensus_data))
}

pub(super) fn header_next_consensus(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    one(StackItem::Interop(InteropObject::Hash160(
        args[0].as_header()?.next_consensus,
    )))
}

pub(super) fn header_index(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    one(StackItem::integer(args[0].as_header()?.index))
}

// Block.

pub(super) fn block_transaction_count(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    one(StackItem::integer(
        args[0].as_block()?.transactions.len() as i64
    ))
}

pub(super) fn block_transactions(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    let block = args[0].as_block()?;
    let items = block
        .transactions
        .iter()
        .map(|tx| StackItem::Interop(InteropObject::Transaction(Arc::new(tx.clone()))))
        .collect();
    one(StackItem::array(items))
}

pub(super) fn block_transaction(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    let index = args[0].as_index("Block.GetTransaction")?;
    let block = args[1].as_block()?;
    let tx = block.transactions.get(index).ok_or(VmError::InvalidIndex {
        index: index as i64,
        length: block.transactions.len(),
    })?;
    one(StackItem::Interop(InteropObject::Transaction(Arc::new(
        tx.clone(),
    ))))
}

// Transaction.

pub(super) fn transaction_hash(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    one(StackItem::Interop(InteropObject::Hash256(
        args[0].as_transaction()?.hash(),
    )))
}

pub(super) fn transaction_type(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    one(StackItem::integer(args[0].as_transaction()?.tx_type as u8))
}

pub(super) fn transaction_attributes(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    let tx = args[0].as_transaction()?;
    let items = tx
        .attributes
        .iter()
        .map(|attribute| StackItem::Interop(InteropObject::Attribute(Arc::new(attribute.clone()))))
        .collect();
    one(StackItem::array(items))
}

pub(super) fn transaction_inputs(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    let tx = args[0].as_transaction()?;
    let items = tx
        .inputs
        .iter()
        .map(|input| StackItem::Interop(InteropObject::Input(Arc::new(*input))))
        .collect();
    one(StackItem::array(items))
}

pub(super) fn transaction_outputs(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    let tx = args[0].as_transaction()?;
    let items = tx
        .outputs
        .iter()
        .map(|output| StackItem::Interop(InteropObject::Output(Arc::new(output.clone()))))
        .collect();
    one(StackItem::array(items))
}

/// The outputs this transaction's inputs spend.
pub(super) fn transaction_references(
    engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    let tx = args[0].as_transaction()?;
    let mut items = Vec::with_capacity(tx.inputs.len());
    for input in &tx.inputs {
        let referenced = engine
            .blockchain()
            .try_get_transaction(&input.prev_hash)
            .ok_or(VmError::ItemNotFound {
                kind: "transaction",
                key: input.prev_hash.to_string(),
            })?;
        let output = referenced
            .outputs
            .get(input.prev_index as usize)
            .ok_or(VmError::InvalidIndex {
                index: input.prev_index as i64,
                length: referenced.outputs.len(),
            })?;
        items.push(StackItem::Interop(InteropObject::Output(Arc::new(
            output.clone(),
        ))));
    }
    one(StackItem::array(items))
}

// Attribute, input, output.

pub(super) fn attribute_usage(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    one(StackItem::integer(args[0].as_attribute()?.usage as u8))
}

pub(super) fn attribute_data(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    one(StackItem::bytes(args[0].as_attribute()?.data.clone()))
}

pub(super) fn input_hash(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    one(StackItem::Interop(InteropObject::Hash256(
        args[0].as_input()?.prev_hash,
    )))
}

pub(super) fn input_index(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    one(StackItem::integer(args[0].as_input()?.prev_index))
}

pub(super) fn output_asset_id(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    one(StackItem::Interop(InteropObject::Hash256(
        args[0].as_output()?.asset_id,
    )))
}

pub(super) fn output_value(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    one(StackItem::integer(args[0].as_output()?.value.raw()))
}

pub(super) fn output_script_hash(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    one(StackItem::Interop(InteropObject::Hash160(
        args[0].as_output()?.script_hash,
    )))
}

// Account.

pub(super) fn account_script_hash(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    one(StackItem::Interop(InteropObject::Hash160(
        args[0].as_account()?.script_hash,
    )))
}

pub(super) fn account_votes(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    let account = args[0].as_account()?;
    let items = account
        .votes
        .iter()
        .map(|vote| StackItem::Interop(InteropObject::EcPoint(vote.clone())))
        .collect();
    one(StackItem::array(items))
}

pub(super) fn account_balance(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    let asset_id = args[0]
        .as_uint256()
        .map_err(|_| VmError::invalid_arguments("GetBalance", "expected a 32-byte asset id"))?;
    let account = args[1].as_account()?;
    one(StackItem::integer(account.balance_of(&asset_id).raw()))
}

// Asset.

pub(super) fn asset_id(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    one(StackItem::Interop(InteropObject::Hash256(
        args[0].as_asset()?.id,
    )))
}

pub(super) fn asset_type(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    one(StackItem::integer(args[0].as_asset()?.asset_type as u8))
}

pub(super) fn asset_amount(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    one(StackItem::integer(args[0].as_asset()?.amount.raw()))
}

pub(super) fn asset_available(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    one(StackItem::integer(args[0].as_asset()?.available.raw()))
}

pub(super) fn asset_precision(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    one(StackItem::integer(args[0].as_asset()?.precision))
}

pub(super) fn asset_owner(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    one(StackItem::Interop(InteropObject::EcPoint(
        args[0].as_asset()?.owner.clone(),
    )))
}

pub(super) fn asset_admin(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    one(StackItem::Interop(InteropObject::Hash160(
        args[0].as_asset()?.admin,
    )))
}

pub(super) fn asset_issuer(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    one(StackItem::Interop(InteropObject::Hash160(
        args[0].as_asset()?.issuer,
    )))
}

// Contract.

pub(super) fn contract_script(
    _engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    one(StackItem::bytes(args[0].as_contract()?.script.clone()))
}
