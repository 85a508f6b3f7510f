// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::primitives::{Address, B256};
use create2_tools::core::{
    artifact::ContractRef,
    build::Forge,
    chain::{RpcChain, SendConfig},
    create2::{parse_salt, DEFAULT_FACTORY},
    deployment::{self, DeploymentConfig},
    verification::Etherscan,
};

use crate::{
    common_args::{AuthArgs, BuildArgs, ProviderArgs, VerificationArgs},
    constants::ENV_FACTORY,
    error::DeployCliResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Contract to deploy, as `path:Name` or a bare `Name`.
    contract: ContractRef,
    /// The constructor arguments, one per parameter or a single quoted string.
    #[arg(
        long,
        num_args(0..),
        value_name = "ARGS",
        allow_negative_numbers = true,
    )]
    constructor_args: Vec<String>,
    /// The CREATE2 salt, left-padded with zeros to 32 bytes.
    #[arg(long, value_parser = parse_salt, default_value = "0x0")]
    salt: B256,
    /// Verify the contract on the block explorer after deploying.
    #[arg(long)]
    verify: bool,
    /// Only compute the address, never send a transaction.
    #[arg(long)]
    dry_run: bool,
    /// The CREATE2 factory deploying the contract.
    #[arg(long, env = ENV_FACTORY, default_value_t = DEFAULT_FACTORY)]
    factory: Address,

    #[command(flatten)]
    auth: AuthArgs,
    #[command(flatten)]
    build: BuildArgs,
    #[command(flatten)]
    provider: ProviderArgs,
    #[command(flatten)]
    verification: VerificationArgs,
}

impl Args {
    fn config(&self) -> DeploymentConfig {
        DeploymentConfig {
            contract: self.contract.clone(),
            constructor_args: self.constructor_args.clone(),
            salt: self.salt,
            factory: self.factory,
            build: self.build.config(self.verify),
            verify: self.verify,
            verify_delay: self.verification.delay(),
            dry_run: self.dry_run,
        }
    }
}

pub async fn exec(args: Args) -> DeployCliResult {
    let config = args.config();
    let send = if args.dry_run {
        SendConfig::default()
    } else {
        args.auth.config()?
    };
    let chain = RpcChain::connect(&args.provider.config(), &send).await?;
    // a missing api key shows up as a verification failure, not a fatal error
    let explorer = args
        .verify
        .then(|| Etherscan::new(args.verification.config()).ok())
        .flatten();

    let outcome = deployment::deploy(&config, &Forge::default(), &chain, explorer.as_ref()).await?;
    outcome.print();
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use std::path::PathBuf;

    use super::*;

    #[derive(Debug, Parser)]
    struct Cli {
        #[command(flatten)]
        args: Args,
    }

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        Cli::try_parse_from(std::iter::once("create2-deploy").chain(argv.iter().copied()))
            .map(|cli| cli.args)
    }

    #[test]
    fn defaults() {
        let args = parse(&["src/Counter.sol:Counter", "--factory", &DEFAULT_FACTORY.to_string()])
            .unwrap();
        let config = args.config();
        assert_eq!(config.contract.name, "Counter");
        assert_eq!(config.contract.path, Some(PathBuf::from("src/Counter.sol")));
        assert_eq!(config.salt, B256::ZERO);
        assert_eq!(config.factory, DEFAULT_FACTORY);
        assert!(config.constructor_args.is_empty());
        assert!(!config.verify && !config.dry_run);
        assert!(!config.build.build_info);
    }

    #[test]
    fn classifies_flags() {
        let args = parse(&[
            "Person",
            "--salt",
            "0xabc",
            "--constructor-args",
            "(Alice,25,0x7633000000000000000000000000000000000001,true)",
            "-5",
            "--verify",
            "--verify-delay",
            "0",
            "--dry-run",
            "--root",
            "contracts",
            "--",
            "--optimize",
            "--via-ir",
        ])
        .unwrap();
        let config = args.config();
        assert_eq!(config.salt, B256::left_padding_from(&[0x0a, 0xbc]));
        assert_eq!(config.constructor_args.len(), 2);
        assert_eq!(config.constructor_args[1], "-5");
        assert!(config.verify && config.dry_run);
        assert!(config.verify_delay.is_zero());
        assert!(config.build.build_info);
        assert_eq!(config.build.root, Some(PathBuf::from("contracts")));
        assert_eq!(config.build.extra_args, ["--optimize", "--via-ir"]);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["Counter", "--salt", "0xnothex"]).is_err());
        assert!(parse(&["Counter", "--salt", &format!("0x{}", "f".repeat(65))]).is_err());
        assert!(parse(&["src/Counter.sol:"]).is_err());
        assert!(parse(&["Counter", "--factory", "0x1234"]).is_err());
    }
}
