//! Execute handlers for the Liquidity Bridge contract.
//!
//! - `registry` - AddPool and the pool instantiation reply
//! - `swap` - Outgoing transfers into a pool
//! - `redeem` - Attested payouts out of a pool
//! - `admin` - Ownership transfer (propose/accept/cancel)

mod admin;
mod redeem;
mod registry;
mod swap;

pub use admin::*;
pub use redeem::*;
pub use registry::*;
pub use swap::*;
