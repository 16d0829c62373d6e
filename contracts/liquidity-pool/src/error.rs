use common::ErrorKind;
use cosmwasm_std::{OverflowError, StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("Unauthorized: only the bridge can perform this action")]
    Unauthorized,

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Invalid token: {token}")]
    InvalidToken { token: String },

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("Unsupported token decimals: {decimals} (maximum is 18)")]
    UnsupportedDecimals { decimals: u8 },

    // ========================================================================
    // Provider Errors
    // ========================================================================

    #[error("Pool: sender is not a liquidity provider")]
    NotAProvider,

    #[error("Pool: tokens are not yet available for withdrawal, {remaining_seconds} seconds remaining")]
    LockActive { remaining_seconds: u64 },

    #[error("Pool: not enough tokens to remove: requested {requested}, available {available}")]
    InsufficientClaim {
        requested: Uint128,
        available: Uint128,
    },

    #[error("Pool: not enough balance for payout: requested {requested}, available {available}")]
    InsufficientPoolBalance {
        requested: Uint128,
        available: Uint128,
    },
}

impl ContractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContractError::Std(_) | ContractError::Overflow(_) => ErrorKind::Std,
            ContractError::Unauthorized => ErrorKind::Authorization,
            ContractError::InvalidToken { .. }
            | ContractError::InvalidAmount { .. }
            | ContractError::UnsupportedDecimals { .. } => ErrorKind::Validation,
            ContractError::NotAProvider
            | ContractError::InsufficientClaim { .. }
            | ContractError::InsufficientPoolBalance { .. } => ErrorKind::Balance,
            ContractError::LockActive { .. } => ErrorKind::Timing,
        }
    }
}
