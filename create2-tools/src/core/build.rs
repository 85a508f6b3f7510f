// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Compilation of the Solidity project through an external compiler.

use std::{
    path::{Path, PathBuf},
    process::Command,
};

use crate::{error::CommandFailure, utils::sys};

const FORGE: &str = "forge";
const DEFAULT_OUT_DIR: &str = "out";

#[derive(Clone, Debug, Default)]
pub struct BuildConfig {
    /// Project root, the current directory when unset.
    pub root: Option<PathBuf>,
    /// Emit build-info files holding the standard JSON input, needed for verification.
    pub build_info: bool,
    /// Flags handed to the compiler untouched.
    pub extra_args: Vec<String>,
}

impl BuildConfig {
    pub fn root(&self) -> &Path {
        self.root.as_deref().unwrap_or(Path::new("."))
    }
}

/// Errors which can occur while compiling the project.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Command(#[from] CommandFailure),
    #[error("invalid compiler config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} not found, install it or add it to PATH")]
    NotInstalled(String),
    #[error("compiler exited with code {code:?}")]
    Failed { code: Option<i32> },
}

/// Compiler collaborator: builds the project and tells where artifacts land.
pub trait Compiler {
    fn build(&self, config: &BuildConfig) -> Result<(), BuildError>;

    fn output_dir(&self, config: &BuildConfig) -> Result<PathBuf, BuildError>;
}

/// Foundry's `forge`.
#[derive(Clone, Debug)]
pub struct Forge {
    program: PathBuf,
}

impl Default for Forge {
    fn default() -> Self {
        Self::new(FORGE)
    }
}

impl Forge {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn build_command(&self, config: &BuildConfig) -> Command {
        let mut cmd = sys::new_command(&self.program);
        cmd.arg("build").arg("--root").arg(config.root());
        if config.build_info {
            cmd.arg("--build-info");
        }
        cmd.args(&config.extra_args);
        cmd
    }

    /// Takes the same passthrough flags as the build, any of which may move `out`.
    fn config_command(&self, config: &BuildConfig) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(["config", "--json", "--root"])
            .arg(config.root())
            .args(&config.extra_args);
        cmd
    }

    fn ensure_installed(&self) -> Result<(), BuildError> {
        if sys::command_exists(&self.program) {
            Ok(())
        } else {
            Err(BuildError::NotInstalled(self.program.display().to_string()))
        }
    }
}

impl Compiler for Forge {
    fn build(&self, config: &BuildConfig) -> Result<(), BuildError> {
        self.ensure_installed()?;
        info!(@grey, "building project in {}", config.root().display());

        let mut cmd = self.build_command(config);
        debug!(@grey, "running {cmd:?}");

        let status = cmd.status()?;
        if !status.success() {
            return Err(BuildError::Failed {
                code: status.code(),
            });
        }
        Ok(())
    }

    fn output_dir(&self, config: &BuildConfig) -> Result<PathBuf, BuildError> {
        self.ensure_installed()?;
        let output = self.config_command(config).output()?;
        let stdout = CommandFailure::check("forge config", output)?;
        Ok(out_dir_from_config(config.root(), &stdout)?)
    }
}

fn out_dir_from_config(root: &Path, json: &str) -> Result<PathBuf, serde_json::Error> {
    let config: serde_json::Value = serde_json::from_str(json)?;
    let out = config
        .get("out")
        .and_then(serde_json::Value::as_str)
        .unwrap_or(DEFAULT_OUT_DIR);
    Ok(root.join(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_out_dir_from_config() {
        let root = Path::new("/project");
        let out = out_dir_from_config(root, r#"{"src":"src","out":"artifacts","libs":["lib"]}"#)
            .unwrap();
        assert_eq!(out, PathBuf::from("/project/artifacts"));
        let out = out_dir_from_config(root, r#"{"src":"src"}"#).unwrap();
        assert_eq!(out, PathBuf::from("/project/out"));
        let out = out_dir_from_config(root, r#"{"out":"/abs/out"}"#).unwrap();
        assert_eq!(out, PathBuf::from("/abs/out"));
        assert!(out_dir_from_config(root, "not json").is_err());
    }

    fn args(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn passthrough_flags_reach_build_and_config() {
        let forge = Forge::default();
        let config = BuildConfig {
            root: Some(PathBuf::from("/project")),
            build_info: true,
            extra_args: vec!["--out".to_string(), "build".to_string()],
        };
        assert_eq!(
            args(&forge.build_command(&config)),
            ["build", "--root", "/project", "--build-info", "--out", "build"]
        );
        assert_eq!(
            args(&forge.config_command(&config)),
            ["config", "--json", "--root", "/project", "--out", "build"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn output_dir_follows_out_override() {
        use std::{fs, os::unix::fs::PermissionsExt};

        let dir = tempfile::TempDir::new().unwrap();
        let program = dir.path().join("forge");
        fs::write(
            &program,
            "#!/bin/sh\n\
             case \"$*\" in\n\
               *\"--out build\"*) echo '{\"out\":\"build\"}' ;;\n\
               *) echo '{\"out\":\"out\"}' ;;\n\
             esac\n",
        )
        .unwrap();
        fs::set_permissions(&program, fs::Permissions::from_mode(0o755)).unwrap();

        let forge = Forge::new(&program);
        let mut config = BuildConfig {
            root: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        assert_eq!(forge.output_dir(&config).unwrap(), dir.path().join("out"));
        config.extra_args = vec!["--out".to_string(), "build".to_string()];
        assert_eq!(forge.output_dir(&config).unwrap(), dir.path().join("build"));
    }

    #[test]
    fn missing_compiler_is_reported() {
        let forge = Forge::new("definitely-not-a-compiler-binary");
        let err = forge.build(&BuildConfig::default()).unwrap_err();
        assert!(matches!(err, BuildError::NotInstalled(_)));
    }
}
