// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Constructor argument encoding.
//!
//! Encoding happens in three steps:
//!
//! 1. [`AbiType::from_param`] turns each constructor input of the compiled artifact into a typed
//!    schema.
//! 2. [`tokenize`] splits the raw command line arguments into one token per parameter.
//! 3. [`encode_args`] lays the typed tokens out using the head/tail ABI encoding.
//!
//! Any failure aborts the whole encoding, no partial payload is ever produced.

use alloy::json_abi::Param;

pub use encoder::encode_args;
pub use tokenizer::tokenize;
pub use types::{AbiType, SchemaError, MAX_TYPE_DEPTH};

mod encoder;
mod tokenizer;
mod types;

/// Errors produced while turning constructor arguments into their encoding.
#[derive(Debug, thiserror::Error)]
pub enum AbiError {
    #[error("{0}")]
    Schema(#[from] SchemaError),
    #[error("constructor argument count mismatch: expected {expected}, got {actual}")]
    ArgumentCountMismatch { expected: usize, actual: usize },
    #[error("malformed constructor arguments: {0}")]
    MalformedArguments(String),
    #[error("could not encode argument {index} as {ty}: {reason}")]
    Encoding {
        index: usize,
        ty: String,
        reason: String,
    },
}

/// Parses the constructor inputs and encodes the raw arguments against them.
///
/// Returns the encoded arguments, empty when the constructor takes no parameters.
pub fn encode_constructor_args(inputs: &[Param], raw: &[String]) -> Result<Vec<u8>, AbiError> {
    let schema = inputs
        .iter()
        .map(AbiType::from_param)
        .collect::<Result<Vec<_>, _>>()?;
    let tokens = tokenize(raw, schema.len())?;
    encode_args(&schema, &tokens)
}

#[cfg(test)]
pub(crate) mod testing {
    use alloy::json_abi::Param;

    pub fn param(name: &str, ty: &str) -> Param {
        tuple_param(name, ty, Vec::new())
    }

    pub fn tuple_param(name: &str, ty: &str, components: Vec<Param>) -> Param {
        Param {
            ty: ty.to_owned(),
            name: name.to_owned(),
            components,
            internal_type: None,
        }
    }
}
