//! Message types for the liquidity pool contract
//!
//! Kept here rather than in the pool crate so the bridge can instantiate,
//! fund and drain pools without linking the pool contract itself.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{
    to_json_binary, Addr, CosmosMsg, QuerierWrapper, StdResult, Uint128, WasmMsg,
};
use cw20::Cw20ReceiveMsg;

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Instantiate message. The instantiating account becomes the pool's bridge.
#[cw_serde]
pub struct InstantiateMsg {
    /// CW20 token held by the pool
    pub token: String,
    /// Seconds a provider must wait after a deposit before withdrawing
    pub lock_period: u64,
    /// LP unit name, e.g. "USDT token Bridge LP Token"
    pub name: String,
    /// LP unit symbol, e.g. "pUSDT"
    pub symbol: String,
}

#[cw_serde]
pub struct MigrateMsg {}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    /// Pull `amount` tokens from the caller (needs an allowance to the pool)
    /// and mint LP units for them.
    AddLiquidity { amount: Uint128 },

    /// Burn the LP units for `amount` native tokens and return the tokens.
    /// Only after the caller's lock period has elapsed.
    RemoveLiquidity { amount: Uint128 },

    /// CW20 `Send` hook, payload is a [`ReceiveMsg`]
    Receive(Cw20ReceiveMsg),

    /// Release tokens to a recipient without burning LP units.
    ///
    /// Authorization: bridge only
    Payout { recipient: String, amount: Uint128 },
}

/// Payloads accepted through the CW20 `Send` hook
#[cw_serde]
pub enum ReceiveMsg {
    /// Deposit the sent tokens as liquidity for the CW20 sender
    AddLiquidity {},
    /// Swap inflow forwarded by the bridge; mints nothing
    BridgeInflow {},
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(PoolInfoResponse)]
    PoolInfo {},

    /// LP balance of an address
    #[returns(cw20::BalanceResponse)]
    Balance { address: String },

    /// LP unit metadata and total supply
    #[returns(cw20::TokenInfoResponse)]
    TokenInfo {},

    #[returns(PositionResponse)]
    Position { address: String },

    #[returns(UnderlyingBalanceResponse)]
    UnderlyingBalance {},
}

#[cw_serde]
pub struct PoolInfoResponse {
    pub token: Addr,
    pub bridge: Addr,
    pub lock_period: u64,
    /// Native decimals of `token`
    pub decimals: u8,
    pub name: String,
    pub symbol: String,
    pub total_supply: Uint128,
    pub underlying_balance: Uint128,
}

#[cw_serde]
pub struct PositionResponse {
    pub lp_balance: Uint128,
    /// Block time (seconds) of the provider's last deposit, 0 if none
    pub last_deposit_time: u64,
    /// First block time (seconds) at which a withdrawal is allowed
    pub unlocks_at: u64,
    /// Proportional claim on the pool's underlying balance, in native units
    pub share_value: Uint128,
}

#[cw_serde]
pub struct UnderlyingBalanceResponse {
    pub amount: Uint128,
}

// ============================================================================
// Contract Helper
// ============================================================================

/// Typed handle on a deployed pool, used by the bridge.
#[cw_serde]
pub struct PoolContract(pub Addr);

impl PoolContract {
    pub fn addr(&self) -> Addr {
        self.0.clone()
    }

    pub fn call(&self, msg: ExecuteMsg) -> StdResult<CosmosMsg> {
        Ok(WasmMsg::Execute {
            contract_addr: self.0.to_string(),
            msg: to_json_binary(&msg)?,
            funds: vec![],
        }
        .into())
    }

    /// Message paying `amount` of the pool's token to `recipient`
    pub fn payout(&self, recipient: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
        self.call(ExecuteMsg::Payout {
            recipient: recipient.to_string(),
            amount,
        })
    }

    pub fn underlying_balance(&self, querier: &QuerierWrapper) -> StdResult<Uint128> {
        let res: UnderlyingBalanceResponse =
            querier.query_wasm_smart(&self.0, &QueryMsg::UnderlyingBalance {})?;
        Ok(res.amount)
    }
}
