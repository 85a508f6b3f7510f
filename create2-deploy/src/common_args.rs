// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Flags shared by the collaborators, each turned into its own configuration record.

use std::{fs, path::PathBuf, time::Duration};

use create2_tools::core::{
    build::BuildConfig,
    chain::{QueryConfig, SendConfig, DEFAULT_RPC_URL},
    verification::{VerifyConfig, DEFAULT_POLL_ATTEMPTS, DEFAULT_VERIFIER_URL},
};
use eyre::{eyre, Context};

use crate::{
    constants::{ENV_ETHERSCAN_API_KEY, ENV_PRIVATE_KEY, ENV_RPC_URL},
    utils::convert_gwei_to_wei,
};

#[derive(Debug, clap::Args)]
pub struct AuthArgs {
    /// Private key as a hex string. Warning: this exposes your key to shell history
    #[arg(long, env = ENV_PRIVATE_KEY, hide_env_values = true)]
    private_key: Option<String>,
    /// File path to a text file containing a hex-encoded private key
    #[arg(long, conflicts_with = "private_key")]
    private_key_path: Option<PathBuf>,
    /// Optional max fee per gas in gwei units.
    #[arg(long)]
    max_fee_per_gas_gwei: Option<String>,
}

impl AuthArgs {
    pub fn config(&self) -> eyre::Result<SendConfig> {
        let private_key = match (&self.private_key, &self.private_key_path) {
            (Some(key), _) if key.is_empty() => return Err(eyre!("empty private key")),
            (Some(key), _) => Some(key.clone()),
            (None, Some(file)) => Some(
                fs::read_to_string(file)
                    .wrap_err("could not open private key file")?
                    .trim()
                    .to_string(),
            ),
            (None, None) => None,
        };
        Ok(SendConfig {
            private_key,
            max_fee_per_gas_wei: self.get_max_fee_per_gas_wei()?,
        })
    }

    fn get_max_fee_per_gas_wei(&self) -> eyre::Result<Option<u128>> {
        self.max_fee_per_gas_gwei
            .as_deref()
            .map(convert_gwei_to_wei)
            .transpose()
    }
}

#[derive(Debug, clap::Args)]
pub struct BuildArgs {
    /// Root of the Solidity project.
    #[arg(long)]
    root: Option<PathBuf>,
    /// Flags passed to the compiler untouched, after `--`.
    #[arg(last = true, value_name = "BUILD_ARGS")]
    build_args: Vec<String>,
}

impl BuildArgs {
    pub fn config(&self, build_info: bool) -> BuildConfig {
        BuildConfig {
            root: self.root.clone(),
            build_info,
            extra_args: self.build_args.clone(),
        }
    }
}

#[derive(Debug, clap::Args)]
pub struct ProviderArgs {
    /// JSON-RPC endpoint of the target chain
    #[arg(long, env = ENV_RPC_URL, default_value = DEFAULT_RPC_URL)]
    rpc_url: String,
}

impl ProviderArgs {
    pub fn config(&self) -> QueryConfig {
        QueryConfig {
            rpc_url: self.rpc_url.clone(),
        }
    }
}

#[derive(Debug, clap::Args)]
pub struct VerificationArgs {
    /// Block explorer API key
    #[arg(long, env = ENV_ETHERSCAN_API_KEY, hide_env_values = true)]
    etherscan_api_key: Option<String>,
    /// Verification endpoint of an Etherscan-compatible explorer
    #[arg(long, default_value = DEFAULT_VERIFIER_URL)]
    verifier_url: String,
    /// Seconds to wait after deploying before submitting for verification
    #[arg(long, default_value = "15")]
    verify_delay: u64,
    /// Number of times to check the verification status before giving up
    #[arg(long, default_value_t = DEFAULT_POLL_ATTEMPTS)]
    verify_poll_attempts: u32,
}

impl VerificationArgs {
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.verify_delay)
    }

    pub fn config(&self) -> VerifyConfig {
        VerifyConfig {
            api_key: self.etherscan_api_key.clone(),
            verifier_url: self.verifier_url.clone(),
            poll_attempts: self.verify_poll_attempts,
            ..Default::default()
        }
    }
}
