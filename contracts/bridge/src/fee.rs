//! Redemption fee math
//!
//! The fee is expressed in permille and is never transferred anywhere: the
//! destination pool simply pays out less than the attested amount and keeps
//! the difference in its underlying balance.

use cosmwasm_std::Uint128;

/// Denominator of `fee_permille`
pub const PERMILLE: u16 = 1000;

/// Split `amount` into `(payout, fee)`.
///
/// `payout = floor(amount × (1000 − fee_permille) / 1000)`, the fee absorbs the
/// rounding remainder. `fee_permille` must not exceed 1000.
pub fn split_fee(amount: Uint128, fee_permille: u16) -> (Uint128, Uint128) {
    let keep = PERMILLE.saturating_sub(fee_permille);
    let payout = amount.multiply_ratio(keep as u128, PERMILLE as u128);
    (payout, amount - payout)
}
