//! Validator attestation check
//!
//! The validator signs `eth_signed_message_hash(digest)` with a secp256k1 key,
//! exactly as `personal_sign` would. The signer is identified by its EVM
//! address, so the same key attests swaps on every chain instance.

use cosmwasm_std::Api;

use common::hash::{evm_address_from_pubkey, evm_address_to_hex, ADDRESS_LEN};
use common::eth_signed_message_hash;

use crate::error::ContractError;

/// Length of an `r ‖ s ‖ v` signature
pub const SIGNATURE_LEN: usize = 65;

/// Recover the EVM address that signed `digest`.
///
/// `v` may be given raw (0/1) or Ethereum-style (27/28). Any malformed
/// signature is reported as [`ContractError::InvalidAttestation`].
pub fn recover_signer(
    api: &dyn Api,
    digest: &[u8; 32],
    signature: &[u8],
) -> Result<[u8; ADDRESS_LEN], ContractError> {
    if signature.len() != SIGNATURE_LEN {
        return Err(ContractError::InvalidAttestation);
    }

    let recovery_param = match signature[64] {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(ContractError::InvalidAttestation),
    };

    let message_hash = eth_signed_message_hash(digest);
    let pubkey = api
        .secp256k1_recover_pubkey(&message_hash, &signature[..64], recovery_param)
        .map_err(|_| ContractError::InvalidAttestation)?;

    evm_address_from_pubkey(&pubkey).ok_or(ContractError::InvalidAttestation)
}

/// Check that `signature` over `digest` was produced by `validator`.
pub fn verify_attestation(
    api: &dyn Api,
    digest: &[u8; 32],
    signature: &[u8],
    validator: &str,
) -> Result<(), ContractError> {
    let signer = recover_signer(api, digest, signature)?;
    if evm_address_to_hex(&signer) != validator {
        return Err(ContractError::InvalidAttestation);
    }
    Ok(())
}
