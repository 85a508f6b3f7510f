// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::fmt::Display;

use eyre::bail;

use style::{BOLD, ERROR};

mod style;

/// Converts a gwei amount, possibly fractional, to wei.
pub fn convert_gwei_to_wei(fee_str: &str) -> eyre::Result<u128> {
    let gwei = match fee_str.trim().parse::<f64>() {
        Ok(fee) if fee.is_finite() && fee >= 0.0 => fee,
        Ok(_) => bail!("max fee per gas must be a finite, non-negative number"),
        Err(_) => bail!("invalid max fee per gas value: {fee_str}"),
    };
    let wei = (gwei * 1e9).round();
    if !wei.is_finite() || wei >= u128::MAX as f64 {
        bail!("max fee per gas out of range: {fee_str} gwei");
    }
    Ok(wei as u128)
}

pub fn print_error(err: impl Display) {
    eprintln!("{ERROR}error{ERROR:#}{BOLD}:{BOLD:#} {err}");
}
