//! Failure categories shared by the bridge and pool contracts
//!
//! Each contract keeps its own `ContractError`; this is the coarse taxonomy
//! clients and relayers match on.

use cosmwasm_schema::cw_serde;

#[cw_serde]
#[derive(Copy, Eq)]
pub enum ErrorKind {
    /// Caller or attestation signer lacks the required identity
    Authorization,
    /// Malformed input or a reference to something that is not registered
    Validation,
    /// Operation not valid from the current record state (replays)
    State,
    /// Not enough funds or LP claim to cover the request
    Balance,
    /// Too early (lock period still running)
    Timing,
    /// Storage, serialization, querier or arithmetic failure
    Std,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Authorization => "authorization",
            ErrorKind::Validation => "validation",
            ErrorKind::State => "state",
            ErrorKind::Balance => "balance",
            ErrorKind::Timing => "timing",
            ErrorKind::Std => "std",
        }
    }
}
