//! LP share ledger
//!
//! Balances and total supply of the pool's LP units. Minting and burning are
//! reachable only from the pool's own handlers; everything else gets the
//! read-only accessors.

use cosmwasm_std::{Addr, StdResult, Storage, Uint128};
use cw_storage_plus::{Item, Map};

use crate::error::ContractError;

const BALANCES: Map<&Addr, Uint128> = Map::new("lp_balances");
const TOTAL_SUPPLY: Item<Uint128> = Item::new("lp_total_supply");

pub(crate) fn init(storage: &mut dyn Storage) -> StdResult<()> {
    TOTAL_SUPPLY.save(storage, &Uint128::zero())
}

pub fn balance(storage: &dyn Storage, owner: &Addr) -> StdResult<Uint128> {
    Ok(BALANCES.may_load(storage, owner)?.unwrap_or_default())
}

pub fn total_supply(storage: &dyn Storage) -> StdResult<Uint128> {
    TOTAL_SUPPLY.load(storage)
}

pub(crate) fn mint(
    storage: &mut dyn Storage,
    to: &Addr,
    amount: Uint128,
) -> Result<(), ContractError> {
    let supply = TOTAL_SUPPLY.load(storage)?.checked_add(amount)?;
    let balance = balance(storage, to)?.checked_add(amount)?;
    TOTAL_SUPPLY.save(storage, &supply)?;
    BALANCES.save(storage, to, &balance)?;
    Ok(())
}

pub(crate) fn burn(
    storage: &mut dyn Storage,
    from: &Addr,
    amount: Uint128,
) -> Result<(), ContractError> {
    let balance = balance(storage, from)?;
    let remaining = balance
        .checked_sub(amount)
        .map_err(|_| ContractError::InsufficientClaim {
            requested: amount,
            available: balance,
        })?;
    let supply = TOTAL_SUPPLY.load(storage)?.checked_sub(amount)?;

    TOTAL_SUPPLY.save(storage, &supply)?;
    if remaining.is_zero() {
        BALANCES.remove(storage, from);
    } else {
        BALANCES.save(storage, from, &remaining)?;
    }
    Ok(())
}
