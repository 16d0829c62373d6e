//! Outgoing transfer handler.

use cosmwasm_std::{to_json_binary, CosmosMsg, DepsMut, MessageInfo, Response, Uint128, WasmMsg};
use cw20::Cw20ExecuteMsg;

use common::hash::bytes32_to_hex;
use common::pool::ReceiveMsg as PoolReceiveMsg;
use common::compute_swap_digest;

use super::registry::load_pool;
use crate::error::ContractError;

/// Move `amount` of `token_from` from the caller into its pool.
///
/// Tokens go straight from the caller to the pool through `SendFrom`, so the
/// pool books the inflow in the same call that moves the funds. The emitted
/// tuple and digest are what the validator attests to; nothing is stored.
#[allow(clippy::too_many_arguments)]
pub fn execute_swap(
    deps: DepsMut,
    info: MessageInfo,
    recipient: String,
    transaction_id: String,
    amount: Uint128,
    token_from: String,
    token_to: String,
    destination_chain_id: u64,
) -> Result<Response, ContractError> {
    let pool = load_pool(deps.as_ref(), &token_from)?;

    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "swap amount must be greater than zero".to_string(),
        });
    }

    let digest = compute_swap_digest(
        &transaction_id,
        amount.u128(),
        &token_from,
        &token_to,
        &recipient,
        destination_chain_id,
    );

    let send_msg = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: token_from.clone(),
        msg: to_json_binary(&Cw20ExecuteMsg::SendFrom {
            owner: info.sender.to_string(),
            contract: pool.addr().to_string(),
            amount,
            msg: to_json_binary(&PoolReceiveMsg::BridgeInflow {})?,
        })?,
        funds: vec![],
    });

    Ok(Response::new()
        .add_message(send_msg)
        .add_attribute("method", "swap")
        .add_attribute("sender", info.sender)
        .add_attribute("recipient", recipient)
        .add_attribute("transaction_id", transaction_id)
        .add_attribute("amount", amount)
        .add_attribute("token_from", token_from)
        .add_attribute("token_to", token_to)
        .add_attribute("destination_chain_id", destination_chain_id.to_string())
        .add_attribute("pool", pool.addr())
        .add_attribute("digest", bytes32_to_hex(&digest)))
}
