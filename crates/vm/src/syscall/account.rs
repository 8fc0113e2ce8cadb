//! `Neo.Account.SetVotes`: the vote-casting state transition.

use crate::execution_context::ExecutionContext;
use crate::execution_engine::ExecutionEngine;
use crate::limits::MAX_VOTES;
use crate::stack_item::StackItem;
use crate::{VmError, VmResult};
use neo_core::Fixed8;
use neo_cryptography::ECPoint;

pub(super) fn set_votes(
    engine: &mut ExecutionEngine,
    _ctx: &mut ExecutionContext,
    args: Vec<StackItem>,
) -> VmResult<Vec<StackItem>> {
    let vote_items = args[0].as_array()?.items();
    if vote_items.len() > MAX_VOTES {
        return Err(VmError::TooManyVotes {
            count: vote_items.len(),
            max: MAX_VOTES,
        });
    }
    let mut votes: Vec<ECPoint> = Vec::with_capacity(vote_items.len());
    for item in &vote_items {
        votes.push(item.as_ec_point()?);
    }

    let hash = args[1].as_account()?.script_hash;
    // Decide against the current ledger state, not the stack snapshot.
    let mut account = engine
        .blockchain()
        .try_get_account(&hash)
        .unwrap_or_else(|| neo_ledger::Account::new(hash));

    if account.is_frozen {
        return Err(VmError::AccountFrozen {
            hash: hash.to_string(),
        });
    }
    let governing = engine.blockchain().governing_token();
    if account.balance_of(&governing) <= Fixed8::ZERO && !votes.is_empty() {
        return Err(VmError::NotEligibleVote);
    }
    if !engine.check_witness(&hash)? {
        return Err(VmError::BadWitness);
    }
    engine.require_application_trigger()?;

    account.votes = votes;
    if account.is_deletable() {
        engine.blockchain().delete_account(&hash);
    } else {
        engine.blockchain().put_account(account);
    }
    Ok(Vec::new())
}
