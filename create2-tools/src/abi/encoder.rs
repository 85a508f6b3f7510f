// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::primitives::U256;

use super::{tokenizer::split_literal, AbiError, AbiType};
use crate::utils::{decode0x, padded_len};

const WORD: usize = 32;

/// Elementary types the encoder knows how to lay out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Elementary {
    Uint(usize),
    Int(usize),
    Address,
    Bool,
    FixedBytes(usize),
    Bytes,
    String,
}

impl Elementary {
    fn from_name(name: &str) -> Option<Self> {
        let bits = |digits: &str| match digits {
            "" => Some(256),
            digits => digits
                .parse::<usize>()
                .ok()
                .filter(|bits| *bits > 0 && *bits <= 256 && bits % 8 == 0),
        };
        Some(match name {
            "address" => Self::Address,
            "bool" => Self::Bool,
            "bytes" => Self::Bytes,
            "string" => Self::String,
            _ => {
                if let Some(digits) = name.strip_prefix("uint") {
                    Self::Uint(bits(digits)?)
                } else if let Some(digits) = name.strip_prefix("int") {
                    Self::Int(bits(digits)?)
                } else if let Some(digits) = name.strip_prefix("bytes") {
                    match digits.parse::<usize>() {
                        Ok(len) if (1..=WORD).contains(&len) => Self::FixedBytes(len),
                        _ => return None,
                    }
                } else {
                    return None;
                }
            }
        })
    }
}

/// Encodes the top-level constructor arguments.
///
/// Each token is encoded against the type at the same position; the result is the head/tail
/// layout of the whole parameter list.
pub fn encode_args(schema: &[AbiType], tokens: &[String]) -> Result<Vec<u8>, AbiError> {
    if schema.len() != tokens.len() {
        return Err(AbiError::ArgumentCountMismatch {
            expected: schema.len(),
            actual: tokens.len(),
        });
    }
    let mut members = Vec::with_capacity(schema.len());
    for (index, (ty, token)) in schema.iter().zip(tokens).enumerate() {
        let data = encode_value(ty, token).map_err(|reason| AbiError::Encoding {
            index,
            ty: ty.to_string(),
            reason,
        })?;
        members.push((ty.is_dynamic(), data));
    }
    Ok(layout(members))
}

/// Encodes a single value. Static values yield their in-place words, dynamic values their tail.
fn encode_value(ty: &AbiType, token: &str) -> Result<Vec<u8>, String> {
    match ty {
        AbiType::Primitive(name) => {
            let elementary = Elementary::from_name(name)
                .ok_or_else(|| format!("unsupported type `{name}`"))?;
            encode_elementary(elementary, token)
        }
        AbiType::Array { element, len } => {
            let items = split_literal(token, '[', ']')?;
            if let Some(len) = len {
                if items.len() != *len {
                    return Err(format!("expected {len} elements, got {}", items.len()));
                }
            }
            let members = items
                .iter()
                .map(|item| Ok((element.is_dynamic(), encode_value(element, item)?)))
                .collect::<Result<Vec<_>, String>>()?;
            let mut data = Vec::new();
            if len.is_none() {
                data.extend(word(U256::from(items.len())));
            }
            data.extend(layout(members));
            Ok(data)
        }
        AbiType::Tuple(components) => {
            let items = split_literal(token, '(', ')')?;
            if items.len() != components.len() {
                return Err(format!(
                    "expected {} tuple members, got {}",
                    components.len(),
                    items.len()
                ));
            }
            let members = components
                .iter()
                .zip(&items)
                .map(|((name, ty), item)| {
                    let data = encode_value(ty, item).map_err(|reason| match name.as_str() {
                        "" => reason,
                        name => format!("{name}: {reason}"),
                    })?;
                    Ok((ty.is_dynamic(), data))
                })
                .collect::<Result<Vec<_>, String>>()?;
            Ok(layout(members))
        }
    }
}

/// Head/tail layout of a sequence of already encoded members.
///
/// Static members are placed in the head as is; dynamic members get a 32-byte offset in the head,
/// relative to the start of this sequence, and their data appended to the tail.
fn layout(members: Vec<(bool, Vec<u8>)>) -> Vec<u8> {
    let head_len: usize = members
        .iter()
        .map(|(dynamic, data)| if *dynamic { WORD } else { data.len() })
        .sum();
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();
    for (dynamic, data) in members {
        if dynamic {
            head.extend(word(U256::from(head_len + tail.len())));
            tail.extend(data);
        } else {
            head.extend(data);
        }
    }
    head.extend(tail);
    head
}

fn encode_elementary(ty: Elementary, raw: &str) -> Result<Vec<u8>, String> {
    let token = raw.trim();
    match ty {
        Elementary::Uint(bits) => {
            let value = parse_uint(token)?;
            if value.bit_len() > bits {
                return Err(format!("`{token}` does not fit in uint{bits}"));
            }
            Ok(word(value).to_vec())
        }
        Elementary::Int(bits) => {
            let (negative, digits) = match token.strip_prefix('-') {
                Some(digits) => (true, digits),
                None => (false, token),
            };
            let magnitude = parse_uint(digits)?;
            let limit = U256::from(1) << (bits - 1);
            let value = if negative {
                if magnitude > limit {
                    return Err(format!("`{token}` does not fit in int{bits}"));
                }
                // two's complement over the full word sign-extends
                U256::ZERO.wrapping_sub(magnitude)
            } else {
                if magnitude >= limit {
                    return Err(format!("`{token}` does not fit in int{bits}"));
                }
                magnitude
            };
            Ok(word(value).to_vec())
        }
        Elementary::Address => {
            let bytes = decode0x(token).map_err(|e| format!("invalid address `{token}`: {e}"))?;
            if bytes.len() != 20 {
                return Err(format!("invalid address `{token}`: expected 20 bytes"));
            }
            let mut data = vec![0; WORD];
            data[WORD - 20..].copy_from_slice(&bytes);
            Ok(data)
        }
        Elementary::Bool => match token.to_ascii_lowercase().as_str() {
            "true" => Ok(word(U256::from(1)).to_vec()),
            "false" => Ok(word(U256::ZERO).to_vec()),
            _ => Err(format!("invalid bool `{token}`: expected true or false")),
        },
        Elementary::FixedBytes(len) => {
            let bytes = decode0x(token).map_err(|e| format!("invalid hex `{token}`: {e}"))?;
            if bytes.len() > len {
                return Err(format!("`{token}` is longer than {len} bytes"));
            }
            let mut data = vec![0; WORD];
            data[..bytes.len()].copy_from_slice(&bytes);
            Ok(data)
        }
        Elementary::Bytes => {
            let bytes = decode0x(token).map_err(|e| format!("invalid hex `{token}`: {e}"))?;
            Ok(encode_packed_tail(&bytes))
        }
        // verbatim, surrounding whitespace included
        Elementary::String => Ok(encode_packed_tail(raw.as_bytes())),
    }
}

/// Length word followed by the data right-padded to a word boundary.
fn encode_packed_tail(bytes: &[u8]) -> Vec<u8> {
    let mut data = Vec::with_capacity(WORD + padded_len(bytes.len()));
    data.extend(word(U256::from(bytes.len())));
    data.extend(bytes);
    data.resize(WORD + padded_len(bytes.len()), 0);
    data
}

fn parse_uint(token: &str) -> Result<U256, String> {
    let parsed = match token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        Some(hex) => U256::from_str_radix(hex, 16),
        None => U256::from_str_radix(token, 10),
    };
    match parsed {
        Ok(value) if !token.is_empty() => Ok(value),
        _ => Err(format!("`{token}` is not a number")),
    }
}

fn word(value: U256) -> [u8; WORD] {
    value.to_be_bytes::<WORD>()
}
