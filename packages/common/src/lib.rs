//! Common - Shared Types and Utilities for the Liquidity Bridge Contracts
//!
//! This package provides the pieces both contracts must agree on bit-for-bit:
//! the swap digest and signed-message format the validator attests to, the
//! decimal normalization used for LP units, and the liquidity pool's message
//! types so the bridge can drive its pools.

pub mod decimals;
pub mod error;
pub mod hash;
pub mod pool;

pub use decimals::{lp_scale, to_lp_units, LP_DECIMALS};
pub use error::ErrorKind;
pub use hash::{compute_swap_digest, eth_signed_message_hash, keccak256};
pub use pool::PoolContract;
