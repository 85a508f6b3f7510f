// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! General purpose utilities.
//!
//! None of these have any functionality specific to CREATE2 deployments, they are used by
//! [`create2-tools`](crate) to talk to external processes and to print diagnostics.

pub mod color;
pub mod sys;

/// Decodes a hex string, with or without a `0x` prefix.
pub fn decode0x(text: impl AsRef<str>) -> Result<Vec<u8>, hex::FromHexError> {
    let text = text.as_ref().trim();
    let text = text.strip_prefix("0x").unwrap_or(text);
    hex::decode(text)
}

/// Rounds `len` up to the next multiple of 32.
pub(crate) fn padded_len(len: usize) -> usize {
    len.div_ceil(32) * 32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_with_and_without_prefix() {
        assert_eq!(decode0x("0x0a0b").unwrap(), vec![0x0a, 0x0b]);
        assert_eq!(decode0x(" 0a0b ").unwrap(), vec![0x0a, 0x0b]);
        assert_eq!(decode0x("0x").unwrap(), Vec::<u8>::new());
        assert!(decode0x("0xabc").is_err());
    }

    #[test]
    fn pads_to_words() {
        assert_eq!(padded_len(0), 0);
        assert_eq!(padded_len(1), 32);
        assert_eq!(padded_len(32), 32);
        assert_eq!(padded_len(33), 64);
    }
}
