//! Query handlers for the Liquidity Bridge contract.

use cosmwasm_std::{Binary, Deps, Order, StdError, StdResult, Uint128};
use cw_storage_plus::Bound;

use common::{compute_swap_digest, eth_signed_message_hash};

use crate::error::ContractError;
use crate::msg::{
    ComputeDigestResponse, ConfigResponse, PendingOwnerResponse, PoolEntry, PoolResponse,
    PoolsResponse, SwapResponse,
};
use crate::state::{SwapState, CONFIG, PENDING_OWNER, POOLS, SWAPS};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: config.owner,
        validator: config.validator,
        fee_permille: config.fee_permille,
        lock_period: config.lock_period,
        pool_code_id: config.pool_code_id,
    })
}

pub fn query_pending_owner(deps: Deps) -> StdResult<PendingOwnerResponse> {
    Ok(PendingOwnerResponse {
        pending_owner: PENDING_OWNER.may_load(deps.storage)?,
    })
}

// ============================================================================
// Registry Queries
// ============================================================================

/// Pool for a token. Tokens that are not valid addresses have no pool.
pub fn query_pool(deps: Deps, token: String) -> StdResult<PoolResponse> {
    let pool = match deps.api.addr_validate(&token) {
        Ok(token_addr) => POOLS.may_load(deps.storage, &token_addr)?,
        Err(_) => None,
    };
    Ok(PoolResponse { token, pool })
}

/// Query paginated list of registered pools.
pub fn query_pools(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<PoolsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start_after = start_after
        .map(|token| deps.api.addr_validate(&token))
        .transpose()?;
    let start = start_after.as_ref().map(Bound::exclusive);

    let pools = POOLS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (token, pool) = item?;
            Ok(PoolEntry { token, pool })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(PoolsResponse { pools })
}

// ============================================================================
// Swap Queries
// ============================================================================

/// Redemption state of a digest; unknown digests are `Empty`.
pub fn query_swap(deps: Deps, digest: Binary) -> StdResult<SwapResponse> {
    if digest.len() != 32 {
        let err = ContractError::InvalidDigestLength { got: digest.len() };
        return Err(StdError::generic_err(err.to_string()));
    }

    let state = SWAPS
        .may_load(deps.storage, digest.as_slice())?
        .unwrap_or(SwapState::Empty);
    Ok(SwapResponse { digest, state })
}

pub fn query_compute_digest(
    transaction_id: String,
    amount: Uint128,
    token_from: String,
    token_to: String,
    recipient: String,
    destination_chain_id: u64,
) -> StdResult<ComputeDigestResponse> {
    let digest = compute_swap_digest(
        &transaction_id,
        amount.u128(),
        &token_from,
        &token_to,
        &recipient,
        destination_chain_id,
    );
    Ok(ComputeDigestResponse {
        digest: Binary::from(digest.to_vec()),
        signed_hash: Binary::from(eth_signed_message_hash(&digest).to_vec()),
    })
}
