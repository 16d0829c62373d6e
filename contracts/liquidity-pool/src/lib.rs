//! Liquidity Pool Contract
//!
//! One pool custodies one CW20 token on behalf of the bridge that
//! instantiated it.
//!
//! # Liquidity Providers
//! 1. Provider deposits tokens (`AddLiquidity` or CW20 `Send`)
//! 2. Pool mints LP units, normalized to 18 decimals
//! 3. After the lock period, provider burns LP units to withdraw principal
//!
//! # Bridge Traffic
//! - Swaps arrive as `BridgeInflow` through the CW20 hook and mint nothing
//! - Redemptions leave through `Payout`, which burns nothing
//!
//! Fees retained on redemption stay in the pool and raise the value of every
//! outstanding LP unit.

pub mod contract;
pub mod error;
pub mod msg;
mod share;
pub mod state;

pub use crate::error::ContractError;
