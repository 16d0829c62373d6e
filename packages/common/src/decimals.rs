//! Decimal normalization for LP units
//!
//! LP units always carry 18 decimals. A token with `d` native decimals maps to
//! LP units through `scale = 10^(18 - d)`: mint and burn quantities are
//! `raw * scale`, while token transfers always move `raw` unscaled.

use cosmwasm_std::{OverflowError, StdError, StdResult, Uint128};

/// Decimals of every LP unit, independent of the underlying token
pub const LP_DECIMALS: u8 = 18;

/// Scale factor from native token units to LP units.
///
/// Fails for tokens with more than [`LP_DECIMALS`] decimals.
pub fn lp_scale(decimals: u8) -> StdResult<Uint128> {
    if decimals > LP_DECIMALS {
        return Err(StdError::generic_err(format!(
            "Token decimals {} exceed LP decimals {}",
            decimals, LP_DECIMALS
        )));
    }
    Ok(Uint128::new(10u128.pow((LP_DECIMALS - decimals) as u32)))
}

/// Convert a native amount to LP units.
pub fn to_lp_units(amount: Uint128, scale: Uint128) -> Result<Uint128, OverflowError> {
    amount.checked_mul(scale)
}
