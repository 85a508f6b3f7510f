// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::fmt;

use alloy::json_abi::Param;

/// Maximum nesting of arrays and tuples accepted in a single type.
pub const MAX_TYPE_DEPTH: usize = 32;

/// Typed schema of a single ABI value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AbiType {
    /// Elementary type, kept by name. Names the encoder does not know fail at encoding time.
    Primitive(String),
    /// `T[]` when `len` is `None`, `T[len]` otherwise.
    Array {
        element: Box<AbiType>,
        len: Option<usize>,
    },
    /// Components in declaration order.
    Tuple(Vec<(String, AbiType)>),
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("schema error: empty type name")]
    EmptyType,
    #[error("schema error: malformed array suffix in `{0}`")]
    MalformedArray(String),
    #[error("schema error: tuple type `{0}` has no components")]
    MissingComponents(String),
    #[error("schema error: `{0}` nests deeper than {MAX_TYPE_DEPTH} levels")]
    TooDeep(String),
}

impl AbiType {
    /// Parses a JSON ABI parameter, including nested tuple components.
    pub fn from_param(param: &Param) -> Result<Self, SchemaError> {
        Self::parse(&param.ty, &param.components, 0)
    }

    fn parse(ty: &str, components: &[Param], depth: usize) -> Result<Self, SchemaError> {
        if depth > MAX_TYPE_DEPTH {
            return Err(SchemaError::TooDeep(ty.to_string()));
        }
        let ty = ty.trim();
        if ty.is_empty() {
            return Err(SchemaError::EmptyType);
        }

        if let Some(rest) = ty.strip_suffix(']') {
            let open = rest
                .rfind('[')
                .ok_or_else(|| SchemaError::MalformedArray(ty.to_string()))?;
            let (base, size) = (&rest[..open], &rest[open + 1..]);
            if base.is_empty() {
                return Err(SchemaError::MalformedArray(ty.to_string()));
            }
            let len = match size {
                "" => None,
                size => match size.parse::<usize>() {
                    Ok(len) if len > 0 => Some(len),
                    _ => return Err(SchemaError::MalformedArray(ty.to_string())),
                },
            };
            // components describe the innermost tuple, so they travel down unchanged
            let element = Self::parse(base, components, depth + 1)?;
            return Ok(Self::Array {
                element: Box::new(element),
                len,
            });
        }

        if ty == "tuple" || ty.starts_with('(') {
            if components.is_empty() {
                return Err(SchemaError::MissingComponents(ty.to_string()));
            }
            let members = components
                .iter()
                .map(|c| Ok((c.name.clone(), Self::parse(&c.ty, &c.components, depth + 1)?)))
                .collect::<Result<Vec<_>, SchemaError>>()?;
            return Ok(Self::Tuple(members));
        }

        if ty.contains(['[', ']', '(', ')']) {
            return Err(SchemaError::MalformedArray(ty.to_string()));
        }
        Ok(Self::Primitive(ty.to_string()))
    }

    /// Whether the value is stored in the tail, with only an offset in the head.
    pub fn is_dynamic(&self) -> bool {
        match self {
            Self::Primitive(name) => matches!(name.as_str(), "bytes" | "string"),
            Self::Array { len: None, .. } => true,
            Self::Array {
                element,
                len: Some(_),
            } => element.is_dynamic(),
            Self::Tuple(members) => members.iter().any(|(_, ty)| ty.is_dynamic()),
        }
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Primitive(name) => f.write_str(name),
            Self::Array { element, len: None } => write!(f, "{element}[]"),
            Self::Array {
                element,
                len: Some(len),
            } => write!(f, "{element}[{len}]"),
            Self::Tuple(members) => {
                f.write_str("(")?;
                for (i, (_, ty)) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{ty}")?;
                }
                f.write_str(")")
            }
        }
    }
}
