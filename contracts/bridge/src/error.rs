//! Error types for the Liquidity Bridge contract

use common::ErrorKind;
use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only owner can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only pending owner can accept")]
    UnauthorizedPendingOwner,

    #[error("Bridge: validator address is invalid")]
    InvalidAttestation,

    // ========================================================================
    // Registry Errors
    // ========================================================================

    #[error("Bridge: Invalid token address: {token}")]
    InvalidToken { token: String },

    #[error("Bridge: The token is already registered: {token}")]
    AlreadyRegistered { token: String },

    #[error("Bridge: liquidity pool is not registered for {token}")]
    PoolNotRegistered { token: String },

    #[error("Pool instantiation failed: {reason}")]
    PoolInstantiationFailed { reason: String },

    // ========================================================================
    // Configuration Errors
    // ========================================================================

    #[error("Invalid validator address: {reason}")]
    InvalidValidator { reason: String },

    #[error("Invalid fee: {fee_permille} permille exceeds 1000")]
    InvalidFee { fee_permille: u16 },

    #[error("No pending owner change")]
    NoPendingOwner,

    // ========================================================================
    // Transfer Errors
    // ========================================================================

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("Invalid digest length: expected 32 bytes, got {got}")]
    InvalidDigestLength { got: usize },

    #[error("Bridge: swap is not empty state or duplicate secret")]
    ReplayOrDuplicate,

    #[error("Bridge: not enough balance in pool: requested {requested}, available {available}")]
    InsufficientPoolBalance {
        requested: Uint128,
        available: Uint128,
    },
}

impl ContractError {
    /// Category of the error, stable across message wording changes.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContractError::Std(_) => ErrorKind::Std,
            ContractError::Unauthorized
            | ContractError::UnauthorizedPendingOwner
            | ContractError::InvalidAttestation => ErrorKind::Authorization,
            ContractError::InvalidToken { .. }
            | ContractError::AlreadyRegistered { .. }
            | ContractError::PoolNotRegistered { .. }
            | ContractError::PoolInstantiationFailed { .. }
            | ContractError::InvalidValidator { .. }
            | ContractError::InvalidFee { .. }
            | ContractError::NoPendingOwner
            | ContractError::InvalidAmount { .. }
            | ContractError::InvalidDigestLength { .. } => ErrorKind::Validation,
            ContractError::ReplayOrDuplicate => ErrorKind::State,
            ContractError::InsufficientPoolBalance { .. } => ErrorKind::Balance,
        }
    }
}
