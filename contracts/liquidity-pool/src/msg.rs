//! Message types for the liquidity pool contract.
//!
//! Defined in `common` so the bridge shares them.

pub use common::pool::{
    ExecuteMsg, InstantiateMsg, MigrateMsg, PoolInfoResponse, PositionResponse, QueryMsg,
    ReceiveMsg, UnderlyingBalanceResponse,
};
