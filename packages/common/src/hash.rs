//! Swap digest and attestation hashing
//!
//! The digest is the value the off-chain validator signs and the key of the
//! bridge's replay guard, so every chain instance must produce it identically.
//!
//! # Solidity Reference
//! ```solidity
//! bytes32 digest = keccak256(abi.encodePacked(
//!     string  transactionId,
//!     uint256 amount,
//!     address tokenFrom,
//!     address tokenTo,
//!     address recipient,
//!     uint256 destinationChainId
//! ));
//! ```
//!
//! # Byte Layout (len(transactionId) + 124 bytes)
//! - transactionId: raw UTF-8 bytes, no length prefix
//! - amount: uint256, big-endian, left-padded (32 bytes)
//! - tokenFrom, tokenTo, recipient: 20 bytes each
//! - destinationChainId: uint256, big-endian, left-padded (32 bytes)
//!
//! Addresses in `0x` + 40 hex form are packed as their raw 20 bytes, which
//! keeps digests identical to an EVM deployment. Any other address string
//! (bech32 and friends) is packed as the low 20 bytes of its keccak256 hash.

use tiny_keccak::{Hasher, Keccak};

/// Prefix applied by `eth_sign` / `personal_sign` to a 32-byte message
pub const ETH_SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Width of a packed address
pub const ADDRESS_LEN: usize = 20;

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Compute the canonical swap digest for a transfer intent.
///
/// `amount` is a CW20 amount (u128) and is left-padded into a uint256 word,
/// as is `destination_chain_id`.
pub fn compute_swap_digest(
    transaction_id: &str,
    amount: u128,
    token_from: &str,
    token_to: &str,
    recipient: &str,
    destination_chain_id: u64,
) -> [u8; 32] {
    let id = transaction_id.as_bytes();
    let mut data = Vec::with_capacity(id.len() + 32 + 3 * ADDRESS_LEN + 32);

    data.extend_from_slice(id);
    data.extend_from_slice(&uint256_word(amount));
    data.extend_from_slice(&encode_address(token_from));
    data.extend_from_slice(&encode_address(token_to));
    data.extend_from_slice(&encode_address(recipient));
    data.extend_from_slice(&uint256_word(destination_chain_id as u128));

    keccak256(&data)
}

/// Hash a digest the way an Ethereum signer does before signing it.
///
/// Matches: `keccak256(abi.encodePacked("\x19Ethereum Signed Message:\n32", digest))`
pub fn eth_signed_message_hash(digest: &[u8; 32]) -> [u8; 32] {
    let mut data = [0u8; 28 + 32];
    data[..28].copy_from_slice(ETH_SIGNED_MESSAGE_PREFIX);
    data[28..].copy_from_slice(digest);
    keccak256(&data)
}

/// Pack an address string into the 20 bytes used by the digest.
pub fn encode_address(address: &str) -> [u8; ADDRESS_LEN] {
    if let Some(evm) = parse_evm_address(address) {
        return evm;
    }
    let hash = keccak256(address.as_bytes());
    let mut out = [0u8; ADDRESS_LEN];
    out.copy_from_slice(&hash[32 - ADDRESS_LEN..]);
    out
}

/// Parse a `0x`-prefixed, 40 hex character address (either case).
pub fn parse_evm_address(address: &str) -> Option<[u8; ADDRESS_LEN]> {
    let hex_part = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))?;
    if hex_part.len() != 2 * ADDRESS_LEN {
        return None;
    }
    let bytes = hex::decode(hex_part).ok()?;
    bytes.try_into().ok()
}

/// Derive the EVM address of an uncompressed secp256k1 public key.
///
/// `pubkey` must be the 65-byte SEC1 encoding (`0x04 ‖ x ‖ y`).
pub fn evm_address_from_pubkey(pubkey: &[u8]) -> Option<[u8; ADDRESS_LEN]> {
    if pubkey.len() != 65 || pubkey[0] != 0x04 {
        return None;
    }
    let hash = keccak256(&pubkey[1..]);
    let mut out = [0u8; ADDRESS_LEN];
    out.copy_from_slice(&hash[32 - ADDRESS_LEN..]);
    Some(out)
}

/// Lowercase `0x` hex form of a 20-byte address
pub fn evm_address_to_hex(address: &[u8; ADDRESS_LEN]) -> String {
    format!("0x{}", hex::encode(address))
}

/// Convert 32-byte hash to hex string (for attributes)
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse hex string (with or without 0x prefix) to 32-byte array
pub fn hex_to_bytes32(hex: &str) -> Result<[u8; 32], &'static str> {
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    if hex.len() != 64 {
        return Err("Invalid hex length: expected 64 characters");
    }
    let bytes = hex::decode(hex).map_err(|_| "Invalid hex character")?;
    bytes
        .try_into()
        .map_err(|_| "Invalid hex length: expected 64 characters")
}

fn uint256_word(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}
