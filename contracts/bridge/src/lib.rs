//! Liquidity Bridge Contract
//!
//! Moves value between independently operated chain instances. Each instance
//! keeps one liquidity pool per token; a swap deposits into the local pool and
//! a redemption on the destination instance pays out of its pool once the
//! validator has attested the transfer.
//!
//! # Flow
//! 1. User calls `Swap` on the source chain; tokens move into the pool of
//!    `token_from` and the transfer tuple plus its digest are emitted
//! 2. The validator signs the digest off-chain
//! 3. Anyone submits `Redeem` on the destination chain with the signature;
//!    the digest is marked redeemed and the pool of `token_to` pays the
//!    recipient net of the fee
//!
//! Each digest redeems at most once per bridge instance.

pub mod attestation;
pub mod contract;
pub mod error;
pub mod execute;
pub mod fee;
pub mod msg;
pub mod query;
pub mod state;

pub use crate::error::ContractError;
