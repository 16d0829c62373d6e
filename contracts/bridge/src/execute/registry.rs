//! Pool registry handlers.
//!
//! `AddPool` instantiates the pool contract as a submessage; the pool is only
//! written to the registry once its instantiation reply arrives. The token
//! being registered is parked in `PENDING_POOL` meanwhile.

use cosmwasm_std::{
    to_json_binary, Addr, Deps, DepsMut, Env, MessageInfo, Reply, Response, SubMsg, WasmMsg,
};
use cw20::{Cw20QueryMsg, TokenInfoResponse};

use common::pool::InstantiateMsg as PoolInstantiateMsg;
use common::PoolContract;

use crate::error::ContractError;
use crate::state::{CONFIG, INSTANTIATE_POOL_REPLY_ID, PENDING_POOL, POOLS};

/// Create a liquidity pool for `token`.
pub fn execute_add_pool(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    let invalid_token = || ContractError::InvalidToken {
        token: token.clone(),
    };
    if token.trim().is_empty() {
        return Err(invalid_token());
    }
    let token_addr = deps
        .api
        .addr_validate(&token)
        .map_err(|_| invalid_token())?;
    let token_info: TokenInfoResponse = deps
        .querier
        .query_wasm_smart(&token_addr, &Cw20QueryMsg::TokenInfo {})
        .map_err(|_| invalid_token())?;

    if POOLS.has(deps.storage, &token_addr) {
        return Err(ContractError::AlreadyRegistered { token });
    }

    PENDING_POOL.save(deps.storage, &token_addr)?;

    let pool_msg = PoolInstantiateMsg {
        token: token_addr.to_string(),
        lock_period: config.lock_period,
        name: format!("{} Bridge LP Token", token_info.name),
        symbol: format!("p{}", token_info.symbol),
    };
    let instantiate = WasmMsg::Instantiate {
        admin: Some(env.contract.address.to_string()),
        code_id: config.pool_code_id,
        msg: to_json_binary(&pool_msg)?,
        funds: vec![],
        label: format!("{} liquidity pool", token_info.symbol),
    };

    Ok(Response::new()
        .add_submessage(SubMsg::reply_on_success(
            instantiate,
            INSTANTIATE_POOL_REPLY_ID,
        ))
        .add_attribute("method", "add_pool")
        .add_attribute("token", token_addr)
        .add_attribute("lp_name", pool_msg.name)
        .add_attribute("lp_symbol", pool_msg.symbol))
}

/// Register the pool created by the preceding `AddPool`.
pub fn handle_instantiate_pool_reply(
    deps: DepsMut,
    msg: Reply,
) -> Result<Response, ContractError> {
    let token = PENDING_POOL
        .may_load(deps.storage)?
        .ok_or_else(|| ContractError::PoolInstantiationFailed {
            reason: "no pending pool registration".to_string(),
        })?;
    PENDING_POOL.remove(deps.storage);

    let res = msg
        .result
        .into_result()
        .map_err(|reason| ContractError::PoolInstantiationFailed { reason })?;

    let pool = res
        .events
        .iter()
        .filter(|event| event.ty == "instantiate")
        .flat_map(|event| event.attributes.iter())
        .find(|attr| attr.key == "_contract_address")
        .map(|attr| attr.value.clone())
        .ok_or_else(|| ContractError::PoolInstantiationFailed {
            reason: "missing contract address in instantiate event".to_string(),
        })?;
    let pool = deps.api.addr_validate(&pool)?;

    POOLS.save(deps.storage, &token, &pool)?;

    Ok(Response::new()
        .add_attribute("method", "register_pool")
        .add_attribute("token", token)
        .add_attribute("pool", pool))
}

/// Pool registered for `token`. Unparseable tokens have no pool.
pub(crate) fn load_pool(deps: Deps, token: &str) -> Result<PoolContract, ContractError> {
    let not_registered = || ContractError::PoolNotRegistered {
        token: token.to_string(),
    };
    let token_addr: Addr = deps
        .api
        .addr_validate(token)
        .map_err(|_| not_registered())?;
    POOLS
        .may_load(deps.storage, &token_addr)?
        .map(PoolContract)
        .ok_or_else(not_registered)
}
