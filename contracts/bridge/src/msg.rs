//! Message types for the Liquidity Bridge contract

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

use crate::state::SwapState;

// ============================================================================
// Instantiate & Migrate
// ============================================================================

#[cw_serde]
pub struct InstantiateMsg {
    /// Registry owner; defaults to the instantiating account
    pub owner: Option<String>,
    /// EVM-style address (`0x` + 40 hex) of the attesting key
    pub validator: String,
    /// Share of each redemption retained by the destination pool, in 1/1000
    pub fee_permille: u16,
    /// Withdrawal lock handed to every pool this bridge creates, in seconds
    pub lock_period: u64,
    /// Code id of the liquidity pool contract
    pub pool_code_id: u64,
}

#[cw_serde]
pub struct MigrateMsg {}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    /// Create and register a liquidity pool for a CW20 token.
    ///
    /// Authorization: Owner only
    AddPool { token: String },

    /// Move `amount` of `token_from` into its pool and announce the transfer.
    ///
    /// The caller must have granted this contract an allowance of at least
    /// `amount` on `token_from`.
    Swap {
        /// Recipient on the destination chain
        recipient: String,
        /// Off-chain identifier, unique per transfer
        transaction_id: String,
        amount: Uint128,
        token_from: String,
        /// Token on the destination chain
        token_to: String,
        destination_chain_id: u64,
    },

    /// Pay out a validator-attested transfer from the pool of `token_to`.
    ///
    /// Permissionless; the signature is the authorization.
    Redeem {
        recipient: String,
        /// Originating account on the source chain, informational only
        sender: String,
        transaction_id: String,
        amount: Uint128,
        token_from: String,
        token_to: String,
        destination_chain_id: u64,
        /// 65-byte `r ‖ s ‖ v` signature over the Ethereum-prefixed digest
        signature: Binary,
    },

    /// Propose a new owner.
    ///
    /// Authorization: Owner only
    ProposeOwner { new_owner: String },

    /// Accept a pending ownership transfer.
    ///
    /// Authorization: Pending owner only
    AcceptOwner {},

    /// Cancel a pending ownership transfer.
    ///
    /// Authorization: Owner only
    CancelOwnerProposal {},
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    /// Pool registered for a token, if any
    #[returns(PoolResponse)]
    Pool { token: String },

    /// Registered pools ordered by token address
    #[returns(PoolsResponse)]
    Pools {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    /// Redemption state of a 32-byte digest
    #[returns(SwapResponse)]
    Swap { digest: Binary },

    /// Digest a validator signs for the given transfer
    #[returns(ComputeDigestResponse)]
    ComputeDigest {
        transaction_id: String,
        amount: Uint128,
        token_from: String,
        token_to: String,
        recipient: String,
        destination_chain_id: u64,
    },

    #[returns(PendingOwnerResponse)]
    PendingOwner {},
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub validator: String,
    pub fee_permille: u16,
    pub lock_period: u64,
    pub pool_code_id: u64,
}

#[cw_serde]
pub struct PoolResponse {
    pub token: String,
    pub pool: Option<Addr>,
}

#[cw_serde]
pub struct PoolEntry {
    pub token: Addr,
    pub pool: Addr,
}

#[cw_serde]
pub struct PoolsResponse {
    pub pools: Vec<PoolEntry>,
}

#[cw_serde]
pub struct SwapResponse {
    pub digest: Binary,
    pub state: SwapState,
}

#[cw_serde]
pub struct ComputeDigestResponse {
    pub digest: Binary,
    /// Ethereum-prefixed hash of `digest`, the exact bytes the validator signs
    pub signed_hash: Binary,
}

#[cw_serde]
pub struct PendingOwnerResponse {
    pub pending_owner: Option<Addr>,
}
