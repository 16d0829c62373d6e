//! Attested payout handler.

use cosmwasm_std::{Binary, DepsMut, Response, Uint128};

use common::compute_swap_digest;
use common::hash::bytes32_to_hex;

use super::registry::load_pool;
use crate::attestation::verify_attestation;
use crate::error::ContractError;
use crate::fee::split_fee;
use crate::state::{SwapState, CONFIG, SWAPS};

/// Pay out a transfer the validator has attested.
///
/// Checks run in a fixed order: replay, signature, pool, balance. The digest
/// is marked `Redeemed` before the payout message is queued.
#[allow(clippy::too_many_arguments)]
pub fn execute_redeem(
    deps: DepsMut,
    recipient: String,
    sender: String,
    transaction_id: String,
    amount: Uint128,
    token_from: String,
    token_to: String,
    destination_chain_id: u64,
    signature: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let digest = compute_swap_digest(
        &transaction_id,
        amount.u128(),
        &token_from,
        &token_to,
        &recipient,
        destination_chain_id,
    );

    let state = SWAPS
        .may_load(deps.storage, digest.as_slice())?
        .unwrap_or(SwapState::Empty);
    if state != SwapState::Empty {
        return Err(ContractError::ReplayOrDuplicate);
    }

    verify_attestation(deps.api, &digest, signature.as_slice(), &config.validator)?;

    let pool = load_pool(deps.as_ref(), &token_to)?;
    let available = pool.underlying_balance(&deps.querier)?;
    if available < amount {
        return Err(ContractError::InsufficientPoolBalance {
            requested: amount,
            available,
        });
    }

    let recipient_addr = deps.api.addr_validate(&recipient)?;

    SWAPS.save(deps.storage, digest.as_slice(), &SwapState::Redeemed)?;

    let (payout, fee) = split_fee(amount, config.fee_permille);

    let mut res = Response::new()
        .add_attribute("method", "redeem")
        .add_attribute("digest", bytes32_to_hex(&digest))
        .add_attribute("sender", sender)
        .add_attribute("recipient", &recipient_addr)
        .add_attribute("transaction_id", transaction_id)
        .add_attribute("token_from", token_from)
        .add_attribute("token_to", token_to)
        .add_attribute("pool", pool.addr())
        .add_attribute("amount", amount)
        .add_attribute("payout", payout)
        .add_attribute("fee", fee);

    // Full-fee redemptions leave everything in the pool
    if !payout.is_zero() {
        res = res.add_message(pool.payout(&recipient_addr, payout)?);
    }

    Ok(res)
}
