// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Idempotent deployment through a CREATE2 factory.
//!
//! A run goes build, resolve artifact, encode constructor arguments, compute the address, then
//! checks the chain. Code already at the computed address means nothing is sent; otherwise the
//! factory is called once with `salt ++ init_code`, unless this is a dry run. Verification comes
//! last and never fails the run.

use std::{path::Path, time::Duration};

use alloy::primitives::{Address, TxHash, B256};

use crate::{
    abi::{encode_constructor_args, AbiError},
    core::{
        artifact::{self, ArtifactError, CompiledArtifact, ContractRef},
        build::{BuildConfig, BuildError, Compiler},
        chain::{Chain, ChainError},
        create2::DEFAULT_FACTORY,
        verification::{Explorer, VerificationError, VerificationRequest, DEFAULT_VERIFY_DELAY},
    },
    utils::color::DebugColor,
};
pub use request::{DeploymentRequest, InitCode};

mod request;

#[derive(Clone, Debug)]
pub struct DeploymentConfig {
    pub contract: ContractRef,
    /// Raw constructor arguments, split into one token per parameter before encoding.
    pub constructor_args: Vec<String>,
    pub salt: B256,
    pub factory: Address,
    pub build: BuildConfig,
    pub verify: bool,
    /// Settling delay before verifying a contract deployed by this run.
    pub verify_delay: Duration,
    pub dry_run: bool,
}

impl DeploymentConfig {
    pub fn new(contract: ContractRef) -> Self {
        Self {
            contract,
            constructor_args: Vec::new(),
            salt: B256::ZERO,
            factory: DEFAULT_FACTORY,
            build: BuildConfig::default(),
            verify: false,
            verify_delay: DEFAULT_VERIFY_DELAY,
            dry_run: false,
        }
    }
}

/// Where the contract stands on chain at the end of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeploymentState {
    /// Nothing deployed yet; dry runs stop here.
    Predicted,
    /// Code was already at the address, no transaction was sent.
    AlreadyDeployed,
    Deployed { tx_hash: TxHash },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerificationState {
    Unverified,
    Verified,
    Failed(String),
}

/// Report of one deployment run.
#[derive(Clone, Debug)]
pub struct DeploymentOutcome {
    pub contract: String,
    pub address: Address,
    pub factory: Address,
    pub salt: B256,
    pub init_code_hash: B256,
    /// Encoded constructor arguments, hex without prefix, the same for deployment and
    /// verification.
    pub constructor_args: String,
    pub state: DeploymentState,
    pub verification: VerificationState,
}

impl DeploymentOutcome {
    /// Prints the final summary to stdout.
    pub fn print(&self) {
        match &self.state {
            DeploymentState::Predicted => {
                mintln!("predicted address: {} (not deployed)", self.address)
            }
            DeploymentState::AlreadyDeployed => {
                mintln!("already deployed at: {}", self.address)
            }
            DeploymentState::Deployed { tx_hash } => {
                mintln!("deployed code at address: {}", self.address);
                greyln!("deployment tx hash: {tx_hash}");
            }
        }
        greyln!("factory: {}", self.factory);
        greyln!("salt: {}", self.salt);
        greyln!("init code hash: {}", self.init_code_hash);
        if !self.constructor_args.is_empty() {
            greyln!("constructor args: 0x{}", self.constructor_args);
        }
        match &self.verification {
            VerificationState::Unverified => {}
            VerificationState::Verified => mintln!("verified"),
            VerificationState::Failed(reason) => greyln!("not verified: {reason}"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error("build failed: {0}")]
    BuildFailed(#[from] BuildError),
    #[error("{0}")]
    ArtifactNotFound(ArtifactError),
    #[error("{0}")]
    NoBytecode(ArtifactError),
    #[error(transparent)]
    Abi(#[from] AbiError),
    #[error("constructor argument mismatch: {0}")]
    ConstructorArgMismatch(String),
    #[error("CREATE2 factory not found: no code at {}", .0.debug_red())]
    FactoryNotFound(Address),
    #[error("{0}")]
    Chain(#[from] ChainError),

    #[error("deploy tx failed: {0}")]
    TransactionFailed(ChainError),
    #[error(
        "deploy tx reverted{}: {reason}",
        .tx_hash.map(|tx_hash| format!(" {}", tx_hash.debug_red())).unwrap_or_default(),
    )]
    TransactionReverted {
        tx_hash: Option<TxHash>,
        reason: String,
    },
}

/// Deploys the configured contract through the CREATE2 factory, unless it is already there.
pub async fn deploy<E: Explorer>(
    config: &DeploymentConfig,
    compiler: &impl Compiler,
    chain: &impl Chain,
    explorer: Option<&E>,
) -> Result<DeploymentOutcome, DeploymentError> {
    compiler.build(&config.build)?;
    let out_dir = compiler.output_dir(&config.build)?;
    let artifact =
        artifact::resolve(&config.contract, &out_dir).map_err(DeploymentError::ArtifactNotFound)?;
    debug!(@grey, "using artifact {}", artifact.file().display());
    let bytecode = artifact
        .creation_code()
        .map_err(DeploymentError::NoBytecode)?;

    let encoded_args = encode_args(&artifact, &config.constructor_args)?;
    let request = DeploymentRequest::new(
        config.factory,
        config.salt,
        InitCode::new(&bytecode, &encoded_args),
    );

    if chain.code_at(config.factory).await?.is_empty() {
        return Err(DeploymentError::FactoryNotFound(config.factory));
    }
    let address = request.address();
    let mut outcome = DeploymentOutcome {
        contract: artifact.qualified_name(),
        address,
        factory: config.factory,
        salt: config.salt,
        init_code_hash: request.init_code().hash(),
        constructor_args: hex::encode(&encoded_args),
        state: DeploymentState::Predicted,
        verification: VerificationState::Unverified,
    };

    if !chain.code_at(address).await?.is_empty() {
        info!(@grey, "already deployed at: {}", address.debug_lavender());
        outcome.state = DeploymentState::AlreadyDeployed;
    } else if config.dry_run {
        info!(@grey, "predicted address: {} (dry run, no transaction sent)", address.debug_lavender());
        return Ok(outcome);
    } else {
        info!(@grey, "predicted address: {}, deploying", address.debug_lavender());
        let tx_hash = send(chain, &request).await?;
        info!(@grey, "deployed code at address: {}", address.debug_lavender());
        info!(@grey, "deployment tx hash: {}", tx_hash.debug_lavender());
        outcome.state = DeploymentState::Deployed { tx_hash };
    }

    if config.verify {
        if matches!(outcome.state, DeploymentState::Deployed { .. }) {
            debug!(@grey, "waiting {:?} for the explorer to index the contract", config.verify_delay);
            tokio::time::sleep(config.verify_delay).await;
        }
        outcome.verification = match verify(&artifact, &out_dir, &outcome, chain, explorer).await {
            Ok(()) => VerificationState::Verified,
            Err(err) => {
                warn!(@yellow, "verification failed: {err}");
                VerificationState::Failed(err.to_string())
            }
        };
    }

    Ok(outcome)
}

/// Checks the arguments against the constructor and encodes them.
fn encode_args(artifact: &CompiledArtifact, raw: &[String]) -> Result<Vec<u8>, DeploymentError> {
    let inputs = artifact.constructor_inputs();
    let has_args = raw.iter().any(|arg| !arg.trim().is_empty());
    if inputs.is_empty() && has_args {
        let reason = match artifact.constructor() {
            Some(_) => "constructor takes no arguments",
            None => "contract declares no constructor",
        };
        return Err(DeploymentError::ConstructorArgMismatch(format!(
            "{reason}, but arguments were given"
        )));
    }
    let encoded = encode_constructor_args(inputs, raw)?;
    if !encoded.is_empty() {
        debug!(@grey, "encoded constructor args: 0x{}", hex::encode(&encoded));
    }
    Ok(encoded)
}

/// Calls the factory; the only chain-mutating step.
async fn send(chain: &impl Chain, request: &DeploymentRequest) -> Result<TxHash, DeploymentError> {
    let sent = match chain.send(request.factory(), request.calldata()).await {
        Ok(sent) => sent,
        Err(ChainError::EstimationReverted(reason)) => {
            return Err(DeploymentError::TransactionReverted {
                tx_hash: None,
                reason,
            })
        }
        Err(err) => return Err(DeploymentError::TransactionFailed(err)),
    };
    debug!(@grey, "gas used: {}", sent.gas_used);
    if !sent.success {
        return Err(DeploymentError::TransactionReverted {
            tx_hash: Some(sent.tx_hash),
            reason: "receipt status is failure".to_string(),
        });
    }
    // a factory may swallow a failed creation instead of reverting
    if chain.code_at(request.address()).await?.is_empty() {
        return Err(DeploymentError::TransactionReverted {
            tx_hash: Some(sent.tx_hash),
            reason: "no code at the predicted address".to_string(),
        });
    }
    Ok(sent.tx_hash)
}

async fn verify<E: Explorer>(
    artifact: &CompiledArtifact,
    out_dir: &Path,
    outcome: &DeploymentOutcome,
    chain: &impl Chain,
    explorer: Option<&E>,
) -> Result<(), VerificationError> {
    let explorer = explorer.ok_or(VerificationError::MissingApiKey)?;
    let compiler_version = artifact
        .compiler_version()
        .ok_or(VerificationError::MissingMetadata("compiler version"))?;
    let source_path = artifact
        .source_path()
        .ok_or(VerificationError::MissingMetadata("compilation target"))?;
    let standard_json = artifact::standard_json_input(out_dir, source_path)
        .map_err(|err| VerificationError::Failed(err.to_string()))?
        .ok_or(VerificationError::MissingMetadata(
            "build-info, rebuild with --build-info",
        ))?;
    let chain_id = chain
        .chain_id()
        .await
        .map_err(|err| VerificationError::Failed(err.to_string()))?;

    info!(@grey, "verifying {}", outcome.contract.lavender());
    let request = VerificationRequest {
        address: outcome.address,
        chain_id,
        contract_name: outcome.contract.clone(),
        compiler_version: compiler_version.to_string(),
        constructor_args: outcome.constructor_args.clone(),
        standard_json,
    };
    explorer.submit_verification(&request).await
}
