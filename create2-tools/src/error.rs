// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::process::Output;

use serde::{Deserialize, Serialize};

/// Captured output of an external process.
#[derive(Debug, Deserialize, Serialize)]
pub struct ProcessOutput {
    pub process_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stdout: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stderr: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
}

#[derive(Debug, thiserror::Error)]
#[error(
    "{name} failed (exit code: {code:?}): {stderr}",
    name = .0.process_name,
    code = .0.exit_code,
    stderr = .0.stderr.trim(),
)]
pub struct CommandFailure(pub ProcessOutput);

impl CommandFailure {
    /// Returns the captured stdout if the process succeeded.
    pub fn check(
        process_name: impl Into<String>,
        output: Output,
    ) -> Result<String, Self> {
        let process_output = ProcessOutput {
            process_name: process_name.into(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code(),
        };
        if output.status.success() {
            Ok(process_output.stdout)
        } else {
            Err(CommandFailure(process_output))
        }
    }
}
