//! Integration tests for the Liquidity Bridge contract using cw-multi-test.
//!
//! These tests cover the swap and redeem flows end to end: real CW20 tokens,
//! pools created through the bridge, and validator signatures produced with a
//! secp256k1 key.

use cosmwasm_std::{Addr, Binary, Empty, Uint128};
use cw20::{BalanceResponse, Cw20Coin, Cw20ExecuteMsg, Cw20QueryMsg};
use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};
use k256::ecdsa::SigningKey;

use bridge::msg::{
    ComputeDigestResponse, ConfigResponse, ExecuteMsg, InstantiateMsg, PendingOwnerResponse,
    PoolResponse, QueryMsg, SwapResponse,
};
use bridge::state::SwapState;
use common::hash::{bytes32_to_hex, evm_address_from_pubkey, evm_address_to_hex};
use common::pool::{PositionResponse, QueryMsg as PoolQueryMsg, UnderlyingBalanceResponse};
use common::{compute_swap_digest, eth_signed_message_hash};

const FEE_PERMILLE: u16 = 20;
const LOCK_PERIOD: u64 = 100;
const USDT: u128 = 1_000_000;

const TX_ID: &str = "27d19c94-553c-4986-a9d3-0250d398584e";
const SOURCE_TOKEN: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
const SOURCE_CHAIN: u64 = 1;
const DESTINATION_CHAIN: u64 = 2;

// ============================================================================
// Test Setup
// ============================================================================

fn contract_bridge() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        bridge::contract::execute,
        bridge::contract::instantiate,
        bridge::contract::query,
    )
    .with_reply(bridge::contract::reply);
    Box::new(contract)
}

fn contract_pool() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        liquidity_pool::contract::execute,
        liquidity_pool::contract::instantiate,
        liquidity_pool::contract::query,
    );
    Box::new(contract)
}

fn contract_cw20() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

fn validator_key() -> SigningKey {
    SigningKey::from_bytes(&[0x11; 32].into()).unwrap()
}

fn impostor_key() -> SigningKey {
    SigningKey::from_bytes(&[0x22; 32].into()).unwrap()
}

fn evm_address(key: &SigningKey) -> String {
    let point = key.verifying_key().to_encoded_point(false);
    evm_address_to_hex(&evm_address_from_pubkey(point.as_bytes()).unwrap())
}

/// Sign a digest the way an Ethereum wallet's `personal_sign` does.
fn sign(key: &SigningKey, digest: &[u8; 32]) -> Binary {
    let prehash = eth_signed_message_hash(digest);
    let (sig, recid) = key.sign_prehash_recoverable(&prehash).unwrap();
    let mut bytes = sig.to_bytes().to_vec();
    bytes.push(recid.to_byte() + 27);
    Binary::from(bytes)
}

struct TestEnv {
    app: App,
    owner: Addr,
    provider: Addr,
    user: Addr,
    relayer: Addr,
    recipient: Addr,
    bridge: Addr,
    usdt: Addr,
    pool: Addr,
}

fn setup() -> TestEnv {
    let mut app = App::default();

    let owner = Addr::unchecked("terra1owner");
    let provider = Addr::unchecked("terra1provider");
    let user = Addr::unchecked("terra1user");
    let relayer = Addr::unchecked("terra1relayer");
    let recipient = Addr::unchecked("terra1recipient");

    let cw20_code_id = app.store_code(contract_cw20());
    let pool_code_id = app.store_code(contract_pool());
    let bridge_code_id = app.store_code(contract_bridge());

    let usdt = app
        .instantiate_contract(
            cw20_code_id,
            owner.clone(),
            &cw20_base::msg::InstantiateMsg {
                name: "Tether USD".to_string(),
                symbol: "USDT".to_string(),
                decimals: 6,
                initial_balances: vec![
                    Cw20Coin {
                        address: provider.to_string(),
                        amount: Uint128::new(1_000 * USDT),
                    },
                    Cw20Coin {
                        address: user.to_string(),
                        amount: Uint128::new(1_000 * USDT),
                    },
                ],
                mint: None,
                marketing: None,
            },
            &[],
            "usdt",
            None,
        )
        .unwrap();

    let bridge = app
        .instantiate_contract(
            bridge_code_id,
            owner.clone(),
            &InstantiateMsg {
                owner: None,
                validator: evm_address(&validator_key()),
                fee_permille: FEE_PERMILLE,
                lock_period: LOCK_PERIOD,
                pool_code_id,
            },
            &[],
            "liquidity-bridge",
            Some(owner.to_string()),
        )
        .unwrap();

    app.execute_contract(
        owner.clone(),
        bridge.clone(),
        &ExecuteMsg::AddPool {
            token: usdt.to_string(),
        },
        &[],
    )
    .unwrap();

    let res: PoolResponse = app
        .wrap()
        .query_wasm_smart(
            &bridge,
            &QueryMsg::Pool {
                token: usdt.to_string(),
            },
        )
        .unwrap();
    let pool = res.pool.unwrap();

    // Seed the pool with 500 USDT of provider liquidity
    app.execute_contract(
        provider.clone(),
        usdt.clone(),
        &Cw20ExecuteMsg::IncreaseAllowance {
            spender: pool.to_string(),
            amount: Uint128::new(500 * USDT),
            expires: None,
        },
        &[],
    )
    .unwrap();
    app.execute_contract(
        provider.clone(),
        pool.clone(),
        &common::pool::ExecuteMsg::AddLiquidity {
            amount: Uint128::new(500 * USDT),
        },
        &[],
    )
    .unwrap();

    TestEnv {
        app,
        owner,
        provider,
        user,
        relayer,
        recipient,
        bridge,
        usdt,
        pool,
    }
}

/// Redeem message for `amount` of USDT to the test recipient.
fn redeem_msg(env: &TestEnv, amount: u128, signature: Binary) -> ExecuteMsg {
    ExecuteMsg::Redeem {
        recipient: env.recipient.to_string(),
        sender: "0x90F79bf6EB2c4f870365E785982E1f101E93b906".to_string(),
        transaction_id: TX_ID.to_string(),
        amount: Uint128::new(amount),
        token_from: SOURCE_TOKEN.to_string(),
        token_to: env.usdt.to_string(),
        destination_chain_id: DESTINATION_CHAIN,
        signature,
    }
}

fn redeem_digest(env: &TestEnv, amount: u128) -> [u8; 32] {
    compute_swap_digest(
        TX_ID,
        amount,
        SOURCE_TOKEN,
        env.usdt.as_str(),
        env.recipient.as_str(),
        DESTINATION_CHAIN,
    )
}

fn redeem(env: &mut TestEnv, amount: u128, signature: Binary) -> anyhow::Result<AppResponse> {
    let msg = redeem_msg(env, amount, signature);
    env.app
        .execute_contract(env.relayer.clone(), env.bridge.clone(), &msg, &[])
}

fn token_balance(env: &TestEnv, address: &Addr) -> u128 {
    let res: BalanceResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.usdt,
            &Cw20QueryMsg::Balance {
                address: address.to_string(),
            },
        )
        .unwrap();
    res.balance.u128()
}

fn pool_underlying(env: &TestEnv) -> u128 {
    let res: UnderlyingBalanceResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.pool, &PoolQueryMsg::UnderlyingBalance {})
        .unwrap();
    res.amount.u128()
}

fn swap_state(env: &TestEnv, digest: &[u8; 32]) -> SwapState {
    let res: SwapResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.bridge,
            &QueryMsg::Swap {
                digest: Binary::from(digest.to_vec()),
            },
        )
        .unwrap();
    res.state
}

fn attr(res: &AppResponse, key: &str) -> Option<String> {
    res.events
        .iter()
        .flat_map(|event| event.attributes.iter())
        .find(|attr| attr.key == key)
        .map(|attr| attr.value.clone())
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_instantiate_config() {
    let env = setup();

    let config: ConfigResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.bridge, &QueryMsg::Config {})
        .unwrap();
    assert_eq!(config.owner, env.owner);
    assert_eq!(config.validator, evm_address(&validator_key()));
    assert_eq!(config.fee_permille, FEE_PERMILLE);
    assert_eq!(config.lock_period, LOCK_PERIOD);
}

// ============================================================================
// Swap
// ============================================================================

#[test]
fn test_swap_moves_tokens_into_pool() {
    let mut env = setup();
    let user = env.user.clone();

    env.app
        .execute_contract(
            user.clone(),
            env.usdt.clone(),
            &Cw20ExecuteMsg::IncreaseAllowance {
                spender: env.bridge.to_string(),
                amount: Uint128::new(100 * USDT),
                expires: None,
            },
            &[],
        )
        .unwrap();

    let recipient = "0x90F79bf6EB2c4f870365E785982E1f101E93b906";
    let token_to = "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512";
    let res = env
        .app
        .execute_contract(
            user.clone(),
            env.bridge.clone(),
            &ExecuteMsg::Swap {
                recipient: recipient.to_string(),
                transaction_id: TX_ID.to_string(),
                amount: Uint128::new(100 * USDT),
                token_from: env.usdt.to_string(),
                token_to: token_to.to_string(),
                destination_chain_id: DESTINATION_CHAIN,
            },
            &[],
        )
        .unwrap();

    assert_eq!(token_balance(&env, &user), 900 * USDT);
    assert_eq!(token_balance(&env, &env.pool), 600 * USDT);
    assert_eq!(pool_underlying(&env), 600 * USDT);

    // The emitted digest is the one the validator would sign
    let expected: ComputeDigestResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.bridge,
            &QueryMsg::ComputeDigest {
                transaction_id: TX_ID.to_string(),
                amount: Uint128::new(100 * USDT),
                token_from: env.usdt.to_string(),
                token_to: token_to.to_string(),
                recipient: recipient.to_string(),
                destination_chain_id: DESTINATION_CHAIN,
            },
        )
        .unwrap();
    let mut digest = [0u8; 32];
    digest.copy_from_slice(expected.digest.as_slice());
    assert_eq!(attr(&res, "digest"), Some(bytes32_to_hex(&digest)));
    assert_eq!(attr(&res, "transaction_id"), Some(TX_ID.to_string()));
    assert_eq!(attr(&res, "recipient"), Some(recipient.to_string()));

    // Swaps leave no redemption record behind
    assert_eq!(swap_state(&env, &digest), SwapState::Empty);
}

#[test]
fn test_swap_requires_allowance() {
    let mut env = setup();
    let user = env.user.clone();

    let res = env.app.execute_contract(
        user.clone(),
        env.bridge.clone(),
        &ExecuteMsg::Swap {
            recipient: "0x90F79bf6EB2c4f870365E785982E1f101E93b906".to_string(),
            transaction_id: TX_ID.to_string(),
            amount: Uint128::new(100 * USDT),
            token_from: env.usdt.to_string(),
            token_to: SOURCE_TOKEN.to_string(),
            destination_chain_id: DESTINATION_CHAIN,
        },
        &[],
    );

    assert!(res.is_err());
    assert_eq!(token_balance(&env, &user), 1_000 * USDT);
    assert_eq!(pool_underlying(&env), 500 * USDT);
}

#[test]
fn test_swap_unregistered_token() {
    let mut env = setup();
    let user = env.user.clone();

    let res = env.app.execute_contract(
        user.clone(),
        env.bridge.clone(),
        &ExecuteMsg::Swap {
            recipient: "0x90F79bf6EB2c4f870365E785982E1f101E93b906".to_string(),
            transaction_id: TX_ID.to_string(),
            amount: Uint128::new(100 * USDT),
            token_from: user.to_string(),
            token_to: SOURCE_TOKEN.to_string(),
            destination_chain_id: DESTINATION_CHAIN,
        },
        &[],
    );

    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(
        err_str.contains("liquidity pool is not registered"),
        "got: {}",
        err_str
    );
}

#[test]
fn test_swap_zero_amount() {
    let mut env = setup();
    let user = env.user.clone();

    let res = env.app.execute_contract(
        user,
        env.bridge.clone(),
        &ExecuteMsg::Swap {
            recipient: "0x90F79bf6EB2c4f870365E785982E1f101E93b906".to_string(),
            transaction_id: TX_ID.to_string(),
            amount: Uint128::zero(),
            token_from: env.usdt.to_string(),
            token_to: SOURCE_TOKEN.to_string(),
            destination_chain_id: DESTINATION_CHAIN,
        },
        &[],
    );

    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Invalid amount"), "got: {}", err_str);
}

// ============================================================================
// Redeem
// ============================================================================

#[test]
fn test_redeem_pays_net_of_fee() {
    let mut env = setup();
    let recipient = env.recipient.clone();
    let amount = 100 * USDT;

    let digest = redeem_digest(&env, amount);
    let res = redeem(&mut env, amount, sign(&validator_key(), &digest)).unwrap();

    assert_eq!(token_balance(&env, &recipient), 98 * USDT);
    assert_eq!(pool_underlying(&env), 402 * USDT);
    assert_eq!(token_balance(&env, &env.pool), 402 * USDT);
    assert_eq!(swap_state(&env, &digest), SwapState::Redeemed);

    assert_eq!(attr(&res, "payout"), Some((98 * USDT).to_string()));
    assert_eq!(attr(&res, "fee"), Some((2 * USDT).to_string()));
}

#[test]
fn test_redeem_accepts_raw_recovery_id() {
    let mut env = setup();
    let recipient = env.recipient.clone();
    let amount = 10 * USDT;

    let digest = redeem_digest(&env, amount);
    let mut signature = sign(&validator_key(), &digest).to_vec();
    signature[64] -= 27;

    redeem(&mut env, amount, Binary::from(signature)).unwrap();
    assert_eq!(token_balance(&env, &recipient), 9_800_000);
}

#[test]
fn test_redeem_replay_rejected() {
    let mut env = setup();
    let recipient = env.recipient.clone();
    let amount = 100 * USDT;

    let digest = redeem_digest(&env, amount);
    let signature = sign(&validator_key(), &digest);
    redeem(&mut env, amount, signature.clone()).unwrap();

    let res = redeem(&mut env, amount, signature);
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(
        err_str.contains("swap is not empty state or duplicate secret"),
        "got: {}",
        err_str
    );

    assert_eq!(token_balance(&env, &recipient), 98 * USDT);
    assert_eq!(pool_underlying(&env), 402 * USDT);
}

#[test]
fn test_redeem_wrong_signer() {
    let mut env = setup();
    let recipient = env.recipient.clone();
    let amount = 100 * USDT;

    let digest = redeem_digest(&env, amount);
    let res = redeem(&mut env, amount, sign(&impostor_key(), &digest));
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(
        err_str.contains("validator address is invalid"),
        "got: {}",
        err_str
    );
    assert_eq!(token_balance(&env, &recipient), 0);

    // A failed attempt does not burn the digest
    assert_eq!(swap_state(&env, &digest), SwapState::Empty);
    redeem(&mut env, amount, sign(&validator_key(), &digest)).unwrap();
    assert_eq!(token_balance(&env, &recipient), 98 * USDT);
}

#[test]
fn test_redeem_signature_over_other_amount() {
    let mut env = setup();

    // Signed for 1 USDT, submitted for 100 USDT
    let digest = redeem_digest(&env, USDT);
    let res = redeem(&mut env, 100 * USDT, sign(&validator_key(), &digest));
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(
        err_str.contains("validator address is invalid"),
        "got: {}",
        err_str
    );
}

#[test]
fn test_redeem_malformed_signature() {
    let mut env = setup();

    let res = redeem(&mut env, 100 * USDT, Binary::from(vec![1u8; 64]));
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(
        err_str.contains("validator address is invalid"),
        "got: {}",
        err_str
    );
}

#[test]
fn test_redeem_unregistered_destination() {
    let mut env = setup();
    let amount = 100 * USDT;
    let token_to = "terra1unregistered";

    let digest = compute_swap_digest(
        TX_ID,
        amount,
        SOURCE_TOKEN,
        token_to,
        env.recipient.as_str(),
        DESTINATION_CHAIN,
    );
    let msg = ExecuteMsg::Redeem {
        recipient: env.recipient.to_string(),
        sender: "0x90F79bf6EB2c4f870365E785982E1f101E93b906".to_string(),
        transaction_id: TX_ID.to_string(),
        amount: Uint128::new(amount),
        token_from: SOURCE_TOKEN.to_string(),
        token_to: token_to.to_string(),
        destination_chain_id: DESTINATION_CHAIN,
        signature: sign(&validator_key(), &digest),
    };

    let res = env
        .app
        .execute_contract(env.relayer.clone(), env.bridge.clone(), &msg, &[]);
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(
        err_str.contains("liquidity pool is not registered"),
        "got: {}",
        err_str
    );
    assert_eq!(swap_state(&env, &digest), SwapState::Empty);
}

#[test]
fn test_redeem_insufficient_pool_balance() {
    let mut env = setup();
    let amount = 501 * USDT;

    let digest = redeem_digest(&env, amount);
    let res = redeem(&mut env, amount, sign(&validator_key(), &digest));
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(
        err_str.contains("not enough balance in pool"),
        "got: {}",
        err_str
    );
    assert_eq!(swap_state(&env, &digest), SwapState::Empty);
    assert_eq!(pool_underlying(&env), 500 * USDT);
}

#[test]
fn test_round_trip_fee_accrues_to_provider() {
    let mut env = setup();
    let user = env.user.clone();
    let provider = env.provider.clone();
    let amount = 100 * USDT;

    // Outgoing leg into the pool
    env.app
        .execute_contract(
            user.clone(),
            env.usdt.clone(),
            &Cw20ExecuteMsg::IncreaseAllowance {
                spender: env.bridge.to_string(),
                amount: Uint128::new(amount),
                expires: None,
            },
            &[],
        )
        .unwrap();
    env.app
        .execute_contract(
            user.clone(),
            env.bridge.clone(),
            &ExecuteMsg::Swap {
                recipient: "0x90F79bf6EB2c4f870365E785982E1f101E93b906".to_string(),
                transaction_id: "outgoing-1".to_string(),
                amount: Uint128::new(amount),
                token_from: env.usdt.to_string(),
                token_to: SOURCE_TOKEN.to_string(),
                destination_chain_id: SOURCE_CHAIN,
            },
            &[],
        )
        .unwrap();

    // Incoming leg out of the pool
    let digest = redeem_digest(&env, amount);
    redeem(&mut env, amount, sign(&validator_key(), &digest)).unwrap();

    assert_eq!(pool_underlying(&env), 502 * USDT);

    let position: PositionResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.pool,
            &PoolQueryMsg::Position {
                address: provider.to_string(),
            },
        )
        .unwrap();
    assert_eq!(position.share_value, Uint128::new(502 * USDT));
}

// ============================================================================
// Ownership
// ============================================================================

#[test]
fn test_ownership_transfer() {
    let mut env = setup();
    let owner = env.owner.clone();
    let new_owner = Addr::unchecked("terra1newowner");

    let res = env.app.execute_contract(
        env.user.clone(),
        env.bridge.clone(),
        &ExecuteMsg::ProposeOwner {
            new_owner: new_owner.to_string(),
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Unauthorized"), "got: {}", err_str);

    env.app
        .execute_contract(
            owner.clone(),
            env.bridge.clone(),
            &ExecuteMsg::ProposeOwner {
                new_owner: new_owner.to_string(),
            },
            &[],
        )
        .unwrap();

    let pending: PendingOwnerResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.bridge, &QueryMsg::PendingOwner {})
        .unwrap();
    assert_eq!(pending.pending_owner, Some(new_owner.clone()));

    let res = env.app.execute_contract(
        env.user.clone(),
        env.bridge.clone(),
        &ExecuteMsg::AcceptOwner {},
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("only pending owner"), "got: {}", err_str);

    env.app
        .execute_contract(
            new_owner.clone(),
            env.bridge.clone(),
            &ExecuteMsg::AcceptOwner {},
            &[],
        )
        .unwrap();

    let config: ConfigResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.bridge, &QueryMsg::Config {})
        .unwrap();
    assert_eq!(config.owner, new_owner);

    let pending: PendingOwnerResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.bridge, &QueryMsg::PendingOwner {})
        .unwrap();
    assert_eq!(pending.pending_owner, None);

    // The previous owner lost its rights
    let res = env.app.execute_contract(
        owner,
        env.bridge.clone(),
        &ExecuteMsg::ProposeOwner {
            new_owner: "terra1other".to_string(),
        },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Unauthorized"), "got: {}", err_str);
}

#[test]
fn test_cancel_owner_proposal() {
    let mut env = setup();
    let owner = env.owner.clone();
    let new_owner = Addr::unchecked("terra1newowner");

    let res = env.app.execute_contract(
        new_owner.clone(),
        env.bridge.clone(),
        &ExecuteMsg::AcceptOwner {},
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("No pending owner"), "got: {}", err_str);

    env.app
        .execute_contract(
            owner.clone(),
            env.bridge.clone(),
            &ExecuteMsg::ProposeOwner {
                new_owner: new_owner.to_string(),
            },
            &[],
        )
        .unwrap();
    env.app
        .execute_contract(
            owner.clone(),
            env.bridge.clone(),
            &ExecuteMsg::CancelOwnerProposal {},
            &[],
        )
        .unwrap();

    let res = env.app.execute_contract(
        new_owner,
        env.bridge.clone(),
        &ExecuteMsg::AcceptOwner {},
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("No pending owner"), "got: {}", err_str);
}
