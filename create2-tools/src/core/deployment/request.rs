// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Deployment transaction request through a CREATE2 factory

use alloy::primitives::{keccak256, Address, B256};

use crate::core::create2::create2_address_from_hash;

/// Creation bytecode followed by the encoded constructor arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitCode(Vec<u8>);

impl InitCode {
    pub fn new(bytecode: &[u8], encoded_args: &[u8]) -> Self {
        let mut code = Vec::with_capacity(bytecode.len() + encoded_args.len());
        code.extend_from_slice(bytecode);
        code.extend_from_slice(encoded_args);
        Self(code)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn hash(&self) -> B256 {
        keccak256(&self.0)
    }
}

/// A deployment of `init_code` by `factory` under `salt`.
#[derive(Clone, Debug)]
pub struct DeploymentRequest {
    factory: Address,
    salt: B256,
    init_code: InitCode,
}

impl DeploymentRequest {
    pub fn new(factory: Address, salt: B256, init_code: InitCode) -> Self {
        Self {
            factory,
            salt,
            init_code,
        }
    }

    pub fn factory(&self) -> Address {
        self.factory
    }

    pub fn init_code(&self) -> &InitCode {
        &self.init_code
    }

    /// Address the contract lands at.
    pub fn address(&self) -> Address {
        create2_address_from_hash(self.factory, self.salt, self.init_code.hash())
    }

    /// Factory calldata: `salt ++ init_code`.
    pub fn calldata(&self) -> Vec<u8> {
        let mut calldata = Vec::with_capacity(32 + self.init_code.0.len());
        calldata.extend_from_slice(self.salt.as_slice());
        calldata.extend_from_slice(self.init_code.bytes());
        calldata
    }
}
