// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Source verification on an Etherscan-compatible block explorer.

use std::{borrow::Cow, time::Duration};

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::utils::color::DebugColor;

pub const DEFAULT_VERIFIER_URL: &str = "https://api.etherscan.io/v2/api";
pub const DEFAULT_VERIFY_DELAY: Duration = Duration::from_secs(15);
pub const DEFAULT_POLL_ATTEMPTS: u32 = 10;
const POLL_INTERVAL: Duration = Duration::from_secs(5);

const CODE_FORMAT: &str = "solidity-standard-json-input";

#[derive(Clone, Debug)]
pub struct VerifyConfig {
    pub api_key: Option<String>,
    pub verifier_url: String,
    pub poll_attempts: u32,
    pub poll_interval: Duration,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            verifier_url: DEFAULT_VERIFIER_URL.to_string(),
            poll_attempts: DEFAULT_POLL_ATTEMPTS,
            poll_interval: POLL_INTERVAL,
        }
    }
}

/// Everything an explorer needs to match a deployed contract with its source.
#[derive(Clone, Debug)]
pub struct VerificationRequest {
    pub address: Address,
    pub chain_id: u64,
    /// `path:Name` of the contract.
    pub contract_name: String,
    /// Full compiler version, e.g. `0.8.24+commit.e11b9ed9`.
    pub compiler_version: String,
    /// ABI-encoded constructor arguments, hex without prefix.
    pub constructor_args: String,
    /// Standard JSON compiler input.
    pub standard_json: serde_json::Value,
}

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no explorer api key, pass --etherscan-api-key or set ETHERSCAN_API_KEY")]
    MissingApiKey,
    #[error("missing compiler metadata: {0}")]
    MissingMetadata(&'static str),
    #[error("submission rejected: {0}")]
    Rejected(String),
    #[error("verification failed: {0}")]
    Failed(String),
    #[error("verification still pending after {0} checks")]
    Timeout(u32),
}

/// Block explorer collaborator.
#[allow(async_fn_in_trait)]
pub trait Explorer {
    async fn submit_verification(
        &self,
        request: &VerificationRequest,
    ) -> Result<(), VerificationError>;
}

#[derive(Debug, Deserialize)]
struct Response {
    status: String,
    #[serde(default)]
    message: String,
    result: String,
}

#[derive(Debug, Serialize)]
struct PostBody<'a, T: Serialize> {
    apikey: Cow<'a, str>,
    module: &'static str,
    action: &'static str,
    #[serde(flatten)]
    other: T,
}

#[derive(Debug, Serialize)]
struct VerifySourceCode<'a> {
    #[serde(rename = "contractaddress")]
    address: String,
    #[serde(rename = "sourceCode")]
    source_code: String,
    #[serde(rename = "codeformat")]
    code_format: &'static str,
    #[serde(rename = "contractname")]
    contract_name: &'a str,
    #[serde(rename = "compilerversion")]
    compiler_version: String,
    // sic, the explorer api spells it this way
    #[serde(rename = "constructorArguements")]
    constructor_arguments: &'a str,
}

#[derive(Debug, Serialize)]
struct CheckStatus<'a> {
    guid: &'a str,
}

#[derive(Debug, PartialEq, Eq)]
enum Status {
    Pending,
    Verified,
    Failed(String),
}

impl Response {
    fn submission(self) -> Result<Option<String>, VerificationError> {
        if self.status == "1" {
            return Ok(Some(self.result));
        }
        if self.result.to_lowercase().contains("already verified") {
            return Ok(None);
        }
        Err(VerificationError::Rejected(format!(
            "{} ({})",
            self.result, self.message
        )))
    }

    fn status(self) -> Status {
        let result = self.result.to_lowercase();
        if result.contains("pending") {
            Status::Pending
        } else if self.status == "1" || result.contains("already verified") {
            Status::Verified
        } else {
            Status::Failed(self.result)
        }
    }
}

/// Etherscan API v2 client; one endpoint for every chain, selected by `chainid`.
#[derive(Clone, Debug)]
pub struct Etherscan {
    client: reqwest::Client,
    api_key: String,
    config: VerifyConfig,
}

impl Etherscan {
    pub fn new(config: VerifyConfig) -> Result<Self, VerificationError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or(VerificationError::MissingApiKey)?;
        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            config,
        })
    }

    fn body<T: Serialize>(&self, action: &'static str, other: T) -> PostBody<'_, T> {
        PostBody {
            apikey: Cow::Borrowed(&self.api_key),
            module: "contract",
            action,
            other,
        }
    }

    async fn post_form<T: Serialize>(
        &self,
        chain_id: u64,
        form: &T,
    ) -> Result<Response, VerificationError> {
        Ok(self
            .client
            .post(&self.config.verifier_url)
            .query(&[("chainid", chain_id)])
            .form(form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
}

impl Explorer for Etherscan {
    async fn submit_verification(
        &self,
        request: &VerificationRequest,
    ) -> Result<(), VerificationError> {
        let form = self.body(
            "verifysourcecode",
            VerifySourceCode {
                address: request.address.to_string(),
                source_code: serde_json::to_string(&request.standard_json)?,
                code_format: CODE_FORMAT,
                contract_name: &request.contract_name,
                compiler_version: compiler_version_tag(&request.compiler_version),
                constructor_arguments: &request.constructor_args,
            },
        );
        let Some(guid) = self.post_form(request.chain_id, &form).await?.submission()? else {
            info!(@grey, "contract already verified");
            return Ok(());
        };
        debug!(@grey, "verification submitted, guid: {}", guid.debug_lavender());

        for _ in 0..self.config.poll_attempts {
            tokio::time::sleep(self.config.poll_interval).await;
            let form = self.body("checkverifystatus", CheckStatus { guid: &guid });
            match self.post_form(request.chain_id, &form).await?.status() {
                Status::Pending => debug!(@grey, "verification pending"),
                Status::Verified => {
                    info!(@grey, "verified {} on the explorer", request.contract_name.mint());
                    return Ok(());
                }
                Status::Failed(reason) => return Err(VerificationError::Failed(reason)),
            }
        }
        Err(VerificationError::Timeout(self.config.poll_attempts))
    }
}

/// Explorers expect the long version with a `v` prefix.
fn compiler_version_tag(version: &str) -> String {
    if version.starts_with('v') {
        version.to_string()
    } else {
        format!("v{version}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: &str, result: &str) -> Response {
        Response {
            status: status.to_string(),
            message: "OK".to_string(),
            result: result.to_string(),
        }
    }

    #[test]
    fn requires_api_key() {
        assert!(matches!(
            Etherscan::new(VerifyConfig::default()),
            Err(VerificationError::MissingApiKey)
        ));
        let config = VerifyConfig {
            api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(Etherscan::new(config).is_err());
        let config = VerifyConfig {
            api_key: Some("KEY".to_string()),
            ..Default::default()
        };
        assert!(Etherscan::new(config).is_ok());
    }

    #[test]
    fn classifies_submission() {
        assert_eq!(
            response("1", "guid123").submission().unwrap(),
            Some("guid123".to_string())
        );
        assert_eq!(
            response("0", "Contract source code already verified")
                .submission()
                .unwrap(),
            None
        );
        assert!(matches!(
            response("0", "Invalid API Key").submission(),
            Err(VerificationError::Rejected(_))
        ));
    }

    #[test]
    fn classifies_status() {
        assert_eq!(response("0", "Pending in queue").status(), Status::Pending);
        assert_eq!(response("1", "Pass - Verified").status(), Status::Verified);
        assert_eq!(response("0", "Already Verified").status(), Status::Verified);
        assert_eq!(
            response("0", "Fail - Unable to verify").status(),
            Status::Failed("Fail - Unable to verify".to_string())
        );
    }

    #[test]
    fn serializes_form_fields() {
        let etherscan = Etherscan::new(VerifyConfig {
            api_key: Some("KEY".to_string()),
            ..Default::default()
        })
        .unwrap();
        let body = etherscan.body(
            "verifysourcecode",
            VerifySourceCode {
                address: Address::ZERO.to_string(),
                source_code: "{}".to_string(),
                code_format: CODE_FORMAT,
                contract_name: "src/Counter.sol:Counter",
                compiler_version: compiler_version_tag("0.8.24+commit.e11b9ed9"),
                constructor_arguments: "",
            },
        );
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["apikey"], "KEY");
        assert_eq!(json["module"], "contract");
        assert_eq!(json["action"], "verifysourcecode");
        assert_eq!(json["codeformat"], CODE_FORMAT);
        assert_eq!(json["contractname"], "src/Counter.sol:Counter");
        assert_eq!(json["compilerversion"], "v0.8.24+commit.e11b9ed9");
        assert_eq!(json["constructorArguements"], "");
    }
}
