use cosmwasm_std::{
    entry_point, from_json, to_json_binary, Addr, Binary, CosmosMsg, Deps, DepsMut, Env,
    MessageInfo, Response, StdResult, Uint128, WasmMsg,
};
use cw2::set_contract_version;
use cw20::{BalanceResponse, Cw20ExecuteMsg, Cw20QueryMsg, Cw20ReceiveMsg, TokenInfoResponse};

use common::{lp_scale, to_lp_units, LP_DECIMALS};

use crate::error::ContractError;
use crate::msg::{
    ExecuteMsg, InstantiateMsg, MigrateMsg, PoolInfoResponse, PositionResponse, QueryMsg,
    ReceiveMsg, UnderlyingBalanceResponse,
};
use crate::share;
use crate::state::{
    Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, LAST_DEPOSIT, UNDERLYING_BALANCE,
};

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

    let invalid_token = || ContractError::InvalidToken {
        token: msg.token.clone(),
    };
    let token = deps
        .api
        .addr_validate(&msg.token)
        .map_err(|_| invalid_token())?;
    let token_info: TokenInfoResponse = deps
        .querier
        .query_wasm_smart(&token, &Cw20QueryMsg::TokenInfo {})
        .map_err(|_| invalid_token())?;

    if token_info.decimals > LP_DECIMALS {
        return Err(ContractError::UnsupportedDecimals {
            decimals: token_info.decimals,
        });
    }
    let scale = lp_scale(token_info.decimals)?;

    let config = Config {
        token,
        bridge: info.sender,
        lock_period: msg.lock_period,
        decimals: token_info.decimals,
        scale,
        name: msg.name,
        symbol: msg.symbol,
    };
    CONFIG.save(deps.storage, &config)?;
    UNDERLYING_BALANCE.save(deps.storage, &Uint128::zero())?;
    share::init(deps.storage)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("token", config.token)
        .add_attribute("bridge", config.bridge)
        .add_attribute("lock_period", config.lock_period.to_string())
        .add_attribute("decimals", config.decimals.to_string())
        .add_attribute("symbol", config.symbol))
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
        ExecuteMsg::AddLiquidity { amount } => execute_add_liquidity(deps, env, info, amount),
        ExecuteMsg::RemoveLiquidity { amount } => {
            execute_remove_liquidity(deps, env, info, amount)
        }
        ExecuteMsg::Receive(cw20_msg) => execute_receive(deps, env, info, cw20_msg),
        ExecuteMsg::Payout { recipient, amount } => execute_payout(deps, info, recipient, amount),
    }
}

fn execute_add_liquidity(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    // Pull the tokens; needs an allowance from the provider to this pool
    let transfer_msg = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
            owner: info.sender.to_string(),
            recipient: env.contract.address.to_string(),
            amount,
        })?,
        funds: vec![],
    });

    let res = deposit(deps, &env, &config, &info.sender, amount)?;
    Ok(res.add_message(transfer_msg))
}

/// CW20 `Send` hook. Only this pool's token is accepted.
fn execute_receive(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    cw20_msg: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.token {
        return Err(ContractError::InvalidToken {
            token: info.sender.to_string(),
        });
    }

    let sender = deps.api.addr_validate(&cw20_msg.sender)?;
    let amount = cw20_msg.amount;

    let receive_msg: ReceiveMsg = from_json(&cw20_msg.msg)?;
    match receive_msg {
        ReceiveMsg::AddLiquidity {} => deposit(deps, &env, &config, &sender, amount),
        ReceiveMsg::BridgeInflow {} => {
            if sender != config.bridge {
                return Err(ContractError::Unauthorized);
            }

            let underlying = UNDERLYING_BALANCE.load(deps.storage)?.checked_add(amount)?;
            UNDERLYING_BALANCE.save(deps.storage, &underlying)?;

            Ok(Response::new()
                .add_attribute("method", "bridge_inflow")
                .add_attribute("amount", amount)
                .add_attribute("underlying_balance", underlying))
        }
    }
}

/// Mint LP units for `amount` native tokens that are (or are about to be)
/// held by the pool, and restart the provider's lock.
fn deposit(
    deps: DepsMut,
    env: &Env,
    config: &Config,
    provider: &Addr,
    amount: Uint128,
) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "deposit amount must be greater than zero".to_string(),
        });
    }

    let lp_amount = to_lp_units(amount, config.scale)?;
    share::mint(deps.storage, provider, lp_amount)?;

    let now = env.block.time.seconds();
    LAST_DEPOSIT.save(deps.storage, provider, &now)?;

    let underlying = UNDERLYING_BALANCE.load(deps.storage)?.checked_add(amount)?;
    UNDERLYING_BALANCE.save(deps.storage, &underlying)?;

    Ok(Response::new()
        .add_attribute("method", "add_liquidity")
        .add_attribute("provider", provider)
        .add_attribute("amount", amount)
        .add_attribute("lp_minted", lp_amount)
        .add_attribute("unlocks_at", config.unlocks_at(now).to_string()))
}

fn execute_remove_liquidity(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let lp_balance = share::balance(deps.storage, &info.sender)?;
    if lp_balance.is_zero() {
        return Err(ContractError::NotAProvider);
    }

    let now = env.block.time.seconds();
    let last = LAST_DEPOSIT
        .may_load(deps.storage, &info.sender)?
        .unwrap_or(0);
    let unlocks_at = config.unlocks_at(last);
    if now < unlocks_at {
        return Err(ContractError::LockActive {
            remaining_seconds: unlocks_at - now,
        });
    }

    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "withdrawal amount must be greater than zero".to_string(),
        });
    }

    let insufficient = || ContractError::InsufficientClaim {
        requested: amount,
        available: lp_balance / config.scale,
    };
    let lp_amount = to_lp_units(amount, config.scale).map_err(|_| insufficient())?;
    if lp_amount > lp_balance {
        return Err(insufficient());
    }

    let underlying = UNDERLYING_BALANCE.load(deps.storage)?;
    let remaining = underlying
        .checked_sub(amount)
        .map_err(|_| ContractError::InsufficientClaim {
            requested: amount,
            available: underlying,
        })?;

    share::burn(deps.storage, &info.sender, lp_amount)?;
    UNDERLYING_BALANCE.save(deps.storage, &remaining)?;

    let transfer_msg = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
            recipient: info.sender.to_string(),
            amount,
        })?,
        funds: vec![],
    });

    Ok(Response::new()
        .add_message(transfer_msg)
        .add_attribute("method", "remove_liquidity")
        .add_attribute("provider", info.sender)
        .add_attribute("amount", amount)
        .add_attribute("lp_burned", lp_amount))
}

/// Release tokens for a redemption. Bridge only; burns no LP units.
fn execute_payout(
    deps: DepsMut,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.bridge {
        return Err(ContractError::Unauthorized);
    }

    let recipient = deps.api.addr_validate(&recipient)?;

    let underlying = UNDERLYING_BALANCE.load(deps.storage)?;
    let remaining =
        underlying
            .checked_sub(amount)
            .map_err(|_| ContractError::InsufficientPoolBalance {
                requested: amount,
                available: underlying,
            })?;
    UNDERLYING_BALANCE.save(deps.storage, &remaining)?;

    let mut res = Response::new()
        .add_attribute("method", "payout")
        .add_attribute("recipient", &recipient)
        .add_attribute("amount", amount)
        .add_attribute("underlying_balance", remaining);

    // cw20 rejects zero transfers
    if !amount.is_zero() {
        res = res.add_message(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: config.token.to_string(),
            msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
                recipient: recipient.to_string(),
                amount,
            })?,
            funds: vec![],
        }));
    }

    Ok(res)
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::PoolInfo {} => to_json_binary(&query_pool_info(deps)?),
        QueryMsg::Balance { address } => to_json_binary(&query_balance(deps, address)?),
        QueryMsg::TokenInfo {} => to_json_binary(&query_token_info(deps)?),
        QueryMsg::Position { address } => to_json_binary(&query_position(deps, address)?),
        QueryMsg::UnderlyingBalance {} => to_json_binary(&UnderlyingBalanceResponse {
            amount: UNDERLYING_BALANCE.load(deps.storage)?,
        }),
    }
}

fn query_pool_info(deps: Deps) -> StdResult<PoolInfoResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(PoolInfoResponse {
        token: config.token,
        bridge: config.bridge,
        lock_period: config.lock_period,
        decimals: config.decimals,
        name: config.name,
        symbol: config.symbol,
        total_supply: share::total_supply(deps.storage)?,
        underlying_balance: UNDERLYING_BALANCE.load(deps.storage)?,
    })
}

fn query_balance(deps: Deps, address: String) -> StdResult<BalanceResponse> {
    let address = deps.api.addr_validate(&address)?;
    Ok(BalanceResponse {
        balance: share::balance(deps.storage, &address)?,
    })
}

fn query_token_info(deps: Deps) -> StdResult<TokenInfoResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(TokenInfoResponse {
        name: config.name,
        symbol: config.symbol,
        decimals: LP_DECIMALS,
        total_supply: share::total_supply(deps.storage)?,
    })
}

fn query_position(deps: Deps, address: String) -> StdResult<PositionResponse> {
    let config = CONFIG.load(deps.storage)?;
    let address = deps.api.addr_validate(&address)?;

    let lp_balance = share::balance(deps.storage, &address)?;
    let last_deposit_time = LAST_DEPOSIT.may_load(deps.storage, &address)?.unwrap_or(0);
    let unlocks_at = if last_deposit_time == 0 {
        0
    } else {
        config.unlocks_at(last_deposit_time)
    };

    let total_supply = share::total_supply(deps.storage)?;
    let share_value = if total_supply.is_zero() {
        Uint128::zero()
    } else {
        UNDERLYING_BALANCE
            .load(deps.storage)?
            .multiply_ratio(lp_balance, total_supply)
    };

    Ok(PositionResponse {
        lp_balance,
        last_deposit_time,
        unlocks_at,
        share_value,
    })
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
