//! State definitions for the Liquidity Bridge contract

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Registry owner
    pub owner: Addr,
    /// Lowercase `0x` hex address of the attesting key
    pub validator: String,
    /// Fee retained by the destination pool on redemption (1/1000 units)
    pub fee_permille: u16,
    /// Withdrawal lock for pools created by this bridge (seconds)
    pub lock_period: u64,
    /// Code id used to instantiate liquidity pools
    pub pool_code_id: u64,
}

/// Redemption state of a digest. Only `Redeemed` is ever stored.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum SwapState {
    Empty,
    Redeemed,
}

// ============================================================================
// Storage Keys
// ============================================================================

pub const CONTRACT_NAME: &str = "crates.io:liquidity-bridge";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reply id for pool instantiation submessages
pub const INSTANTIATE_POOL_REPLY_ID: u64 = 1;

pub const CONFIG: Item<Config> = Item::new("config");

pub const PENDING_OWNER: Item<Addr> = Item::new("pending_owner");

/// Token whose pool instantiation is in flight; consumed by the reply
pub const PENDING_POOL: Item<Addr> = Item::new("pending_pool");

/// token => pool
pub const POOLS: Map<&Addr, Addr> = Map::new("pools");

/// digest => state
pub const SWAPS: Map<&[u8], SwapState> = Map::new("swaps");
