// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! CREATE2 address derivation.

use alloy::primitives::{address, keccak256, Address, B256};

/// The widely deployed deterministic deployment proxy.
pub const DEFAULT_FACTORY: Address = address!("0x4e59b44847b379578588920ca78fbf26c0b4956c");

/// Length of the hashed preimage: `0xff ++ factory ++ salt ++ keccak256(init_code)`.
const PREIMAGE_LENGTH: usize = 1 + 20 + 32 + 32;

/// Computes the address `factory` deploys `init_code` to when called with `salt`.
pub fn create2_address(factory: Address, salt: B256, init_code: &[u8]) -> Address {
    create2_address_from_hash(factory, salt, keccak256(init_code))
}

/// Same as [`create2_address`] for an already hashed init code.
pub fn create2_address_from_hash(factory: Address, salt: B256, init_code_hash: B256) -> Address {
    let mut preimage = [0u8; PREIMAGE_LENGTH];
    preimage[0] = 0xff;
    preimage[1..21].copy_from_slice(factory.as_slice());
    preimage[21..53].copy_from_slice(salt.as_slice());
    preimage[53..].copy_from_slice(init_code_hash.as_slice());
    Address::from_slice(&keccak256(preimage)[12..])
}

#[derive(Debug, thiserror::Error)]
pub enum SaltError {
    #[error("invalid salt `{0}`: not hex")]
    NotHex(String),
    #[error("invalid salt `{0}`: longer than 32 bytes")]
    TooLong(String),
}

/// Parses a salt, left-padding it with zeros to 32 bytes.
///
/// Accepts `0x`-prefixed or bare hex, in any case, of at most 64 digits.
pub fn parse_salt(text: &str) -> Result<B256, SaltError> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(SaltError::NotHex(text.to_string()));
    }
    if digits.len() > 64 {
        return Err(SaltError::TooLong(text.to_string()));
    }
    let padded = format!("{digits:0>64}").to_ascii_lowercase();
    let bytes = hex::decode(padded).map_err(|_| SaltError::NotHex(text.to_string()))?;
    Ok(B256::from_slice(&bytes))
}
