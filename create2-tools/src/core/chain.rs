// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Chain access: code queries and the factory transaction.

use alloy::{
    network::{EthereumWallet, TransactionBuilder},
    primitives::{Address, Bytes, TxHash},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::{local::PrivateKeySigner, Signer},
    transports::{RpcError, TransportErrorKind},
};

use crate::utils::color::DebugColor;

pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// Options for read-only chain access.
#[derive(Clone, Debug)]
pub struct QueryConfig {
    pub rpc_url: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
        }
    }
}

/// Options for signing and broadcasting transactions.
#[derive(Clone, Debug, Default)]
pub struct SendConfig {
    /// Hex-encoded private key; without it nothing can be sent.
    pub private_key: Option<String>,
    pub max_fee_per_gas_wei: Option<u128>,
}

#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("rpc error: {0}")]
    Rpc(#[from] RpcError<TransportErrorKind>),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
    #[error("no signer configured, pass --private-key or set PRIVATE_KEY")]
    NoSigner,
    #[error("execution reverted: {0}")]
    EstimationReverted(String),
    #[error("tx {} failed to complete", .tx_hash.debug_red())]
    FailedToComplete { tx_hash: TxHash },
}

/// A mined transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentTransaction {
    pub tx_hash: TxHash,
    /// Receipt status.
    pub success: bool,
    pub gas_used: u64,
}

/// Chain collaborator.
#[allow(async_fn_in_trait)]
pub trait Chain {
    async fn chain_id(&self) -> Result<u64, ChainError>;

    /// Deployed code at `address`, empty when nothing is deployed there.
    async fn code_at(&self, address: Address) -> Result<Bytes, ChainError>;

    /// Sends `input` to `to` and waits for the receipt.
    async fn send(&self, to: Address, input: Vec<u8>) -> Result<SentTransaction, ChainError>;
}

/// [`Chain`] over JSON-RPC, signing locally with an optional private key.
#[derive(Clone)]
pub struct RpcChain {
    provider: DynProvider,
    sender: Option<Address>,
    max_fee_per_gas_wei: Option<u128>,
}

impl RpcChain {
    pub async fn connect(query: &QueryConfig, send: &SendConfig) -> Result<Self, ChainError> {
        let provider = ProviderBuilder::new().connect(&query.rpc_url).await?;
        let Some(key) = &send.private_key else {
            return Ok(Self {
                provider: provider.erased(),
                sender: None,
                max_fee_per_gas_wei: send.max_fee_per_gas_wei,
            });
        };

        let chain_id = provider.get_chain_id().await?;
        let signer = parse_private_key(key)?.with_chain_id(Some(chain_id));
        let sender = signer.address();
        debug!(@grey, "sender address: {}", sender.debug_lavender());
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::new(signer))
            .connect(&query.rpc_url)
            .await?;
        Ok(Self {
            provider: provider.erased(),
            sender: Some(sender),
            max_fee_per_gas_wei: send.max_fee_per_gas_wei,
        })
    }

    pub fn sender(&self) -> Option<Address> {
        self.sender
    }

    async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64, ChainError> {
        match self.provider.estimate_gas(tx.clone()).await {
            Ok(gas) => Ok(gas),
            Err(err) => match err.as_error_resp() {
                Some(payload) if payload.message.contains("revert") => {
                    Err(ChainError::EstimationReverted(payload.message.to_string()))
                }
                _ => Err(err.into()),
            },
        }
    }
}

impl Chain for RpcChain {
    async fn chain_id(&self) -> Result<u64, ChainError> {
        Ok(self.provider.get_chain_id().await?)
    }

    async fn code_at(&self, address: Address) -> Result<Bytes, ChainError> {
        Ok(self.provider.get_code_at(address).await?)
    }

    async fn send(&self, to: Address, input: Vec<u8>) -> Result<SentTransaction, ChainError> {
        let sender = self.sender.ok_or(ChainError::NoSigner)?;
        let mut tx = TransactionRequest::default()
            .with_from(sender)
            .with_to(to)
            .with_input(input);
        tx.gas = Some(self.estimate_gas(&tx).await?);
        if let Some(max_fee_per_gas) = self.max_fee_per_gas_wei {
            let priority_fee = self.provider.get_max_priority_fee_per_gas().await?;
            tx.max_fee_per_gas = Some(max_fee_per_gas);
            tx.max_priority_fee_per_gas = Some(priority_fee.min(max_fee_per_gas));
        }

        let pending = self.provider.send_transaction(tx).await?;
        let tx_hash = *pending.tx_hash();
        debug!(@grey, "sent deploy tx: {}", tx_hash.debug_lavender());

        let receipt = pending
            .get_receipt()
            .await
            .or(Err(ChainError::FailedToComplete { tx_hash }))?;
        Ok(SentTransaction {
            tx_hash,
            success: receipt.status(),
            gas_used: receipt.gas_used,
        })
    }
}

fn parse_private_key(key: &str) -> Result<PrivateKeySigner, ChainError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(ChainError::InvalidPrivateKey("empty private key".to_string()));
    }
    key.parse()
        .map_err(|err: alloy::signers::local::LocalSignerError| {
            ChainError::InvalidPrivateKey(err.to_string())
        })
}
