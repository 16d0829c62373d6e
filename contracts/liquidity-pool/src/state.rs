use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONTRACT_NAME: &str = "crates.io:liquidity-pool";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Pool configuration, fixed at instantiation
#[cw_serde]
pub struct Config {
    /// CW20 token held by this pool
    pub token: Addr,
    /// Bridge that instantiated the pool; the only account allowed to pay out
    pub bridge: Addr,
    /// Seconds between a provider's last deposit and their first withdrawal
    pub lock_period: u64,
    /// Native decimals of `token`
    pub decimals: u8,
    /// 10^(18 - decimals)
    pub scale: Uint128,
    pub name: String,
    pub symbol: String,
}

impl Config {
    /// Block time at which a provider who last deposited at `last_deposit`
    /// may withdraw.
    pub fn unlocks_at(&self, last_deposit: u64) -> u64 {
        last_deposit.saturating_add(self.lock_period)
    }
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Native tokens accounted to the pool: deposits + bridge inflows - withdrawals - payouts
pub const UNDERLYING_BALANCE: Item<Uint128> = Item::new("underlying_balance");

/// provider => block time (seconds) of their last deposit
pub const LAST_DEPOSIT: Map<&Addr, u64> = Map::new("last_deposit");
