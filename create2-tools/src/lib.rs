// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Tools for deterministic contract deployment through a CREATE2 factory.
//!
//! The crate is split the same way a deployment run is: [`abi`] turns constructor arguments into
//! their ABI encoding, [`core::create2`] predicts the deployment address, and
//! [`core::deployment`] drives the idempotent deploy-or-skip state machine on top of the
//! compiler, chain and explorer collaborators.

#[macro_use]
mod macros;

pub mod abi;
pub mod core;
pub(crate) mod error;
pub mod utils;

pub use error::{CommandFailure, ProcessOutput};
