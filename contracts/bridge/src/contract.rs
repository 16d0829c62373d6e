//! Liquidity Bridge Contract - Entry Points
//!
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdError, StdResult,
};
use cw2::set_contract_version;

use common::hash::{evm_address_to_hex, parse_evm_address};

use crate::error::ContractError;
use crate::execute::{
    execute_accept_owner, execute_add_pool, execute_cancel_owner_proposal, execute_propose_owner,
    execute_redeem, execute_swap, handle_instantiate_pool_reply,
};
use crate::fee::PERMILLE;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_compute_digest, query_config, query_pending_owner, query_pool, query_pools, query_swap,
};
use crate::state::{Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, INSTANTIATE_POOL_REPLY_ID};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = match msg.owner {
        Some(owner) => deps.api.addr_validate(&owner)?,
        None => info.sender,
    };

    let validator =
        parse_evm_address(&msg.validator).ok_or_else(|| ContractError::InvalidValidator {
            reason: format!("expected 0x-prefixed 20-byte hex, got {}", msg.validator),
        })?;
    if validator == [0u8; 20] {
        return Err(ContractError::InvalidValidator {
            reason: "zero address".to_string(),
        });
    }

    if msg.fee_permille > PERMILLE {
        return Err(ContractError::InvalidFee {
            fee_permille: msg.fee_permille,
        });
    }

    let config = Config {
        owner,
        validator: evm_address_to_hex(&validator),
        fee_permille: msg.fee_permille,
        lock_period: msg.lock_period,
        pool_code_id: msg.pool_code_id,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", config.owner)
        .add_attribute("validator", config.validator)
        .add_attribute("fee_permille", config.fee_permille.to_string())
        .add_attribute("lock_period", config.lock_period.to_string())
        .add_attribute("pool_code_id", config.pool_code_id.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::AddPool { token } => execute_add_pool(deps, env, info, token),
        ExecuteMsg::Swap {
            recipient,
            transaction_id,
            amount,
            token_from,
            token_to,
            destination_chain_id,
        } => execute_swap(
            deps,
            info,
            recipient,
            transaction_id,
            amount,
            token_from,
            token_to,
            destination_chain_id,
        ),
        ExecuteMsg::Redeem {
            recipient,
            sender,
            transaction_id,
            amount,
            token_from,
            token_to,
            destination_chain_id,
            signature,
        } => execute_redeem(
            deps,
            recipient,
            sender,
            transaction_id,
            amount,
            token_from,
            token_to,
            destination_chain_id,
            signature,
        ),
        ExecuteMsg::ProposeOwner { new_owner } => execute_propose_owner(deps, info, new_owner),
        ExecuteMsg::AcceptOwner {} => execute_accept_owner(deps, info),
        ExecuteMsg::CancelOwnerProposal {} => execute_cancel_owner_proposal(deps, info),
    }
}

// ============================================================================
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        INSTANTIATE_POOL_REPLY_ID => handle_instantiate_pool_reply(deps, msg),
        id => Err(StdError::generic_err(format!("Unknown reply id: {}", id)).into()),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Pool { token } => to_json_binary(&query_pool(deps, token)?),
        QueryMsg::Pools { start_after, limit } => {
            to_json_binary(&query_pools(deps, start_after, limit)?)
        }
        QueryMsg::Swap { digest } => to_json_binary(&query_swap(deps, digest)?),
        QueryMsg::ComputeDigest {
            transaction_id,
            amount,
            token_from,
            token_to,
            recipient,
            destination_chain_id,
        } => to_json_binary(&query_compute_digest(
            transaction_id,
            amount,
            token_from,
            token_to,
            recipient,
            destination_chain_id,
        )?),
        QueryMsg::PendingOwner {} => to_json_binary(&query_pending_owner(deps)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
