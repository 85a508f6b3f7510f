// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Compiled artifacts, as written by the compiler to its output directory.

use std::{
    collections::BTreeMap,
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use alloy::json_abi::{Constructor, JsonAbi, Param};
use serde::Deserialize;

use crate::utils::decode0x;

/// Directory the compiler writes build-info files to, inside its output directory.
const BUILD_INFO_DIR: &str = "build-info";

/// A contract given as `path:Name` or as a bare `Name`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractRef {
    pub path: Option<PathBuf>,
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
#[error("invalid contract `{0}`: expected `path:Name` or `Name`")]
pub struct ContractRefError(String);

impl FromStr for ContractRef {
    type Err = ContractRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (path, name) = match s.rsplit_once(':') {
            Some((path, name)) => (Some(path), name),
            None => (None, s),
        };
        let valid_name = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
        if !valid_name || path.is_some_and(str::is_empty) {
            return Err(ContractRefError(s.to_string()));
        }
        Ok(Self {
            path: path.map(PathBuf::from),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for ContractRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}:{}", path.display(), self.name),
            None => f.write_str(&self.name),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed artifact {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("artifact not found for `{contract}` in {out_dir}")]
    NotFound { contract: String, out_dir: PathBuf },
    #[error("artifact not found: `{contract}` is ambiguous, candidates:\n{}", .candidates.join("\n"))]
    Ambiguous {
        contract: String,
        candidates: Vec<String>,
    },
    #[error("no bytecode for `{0}`: abstract contract or interface")]
    NoBytecode(String),
    #[error("no bytecode for `{0}`: unlinked library references")]
    UnlinkedBytecode(String),
    #[error("invalid bytecode for `{contract}`: {source}")]
    InvalidBytecode {
        contract: String,
        source: hex::FromHexError,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BytecodeField {
    Object { object: Option<String> },
    Hex(String),
}

#[derive(Debug, Default, Deserialize)]
struct Metadata {
    #[serde(default)]
    compiler: Option<CompilerMetadata>,
    #[serde(default)]
    settings: Option<SettingsMetadata>,
}

#[derive(Debug, Deserialize)]
struct CompilerMetadata {
    version: String,
}

#[derive(Debug, Deserialize)]
struct SettingsMetadata {
    #[serde(default, rename = "compilationTarget")]
    compilation_target: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct ArtifactFile {
    #[serde(default)]
    abi: JsonAbi,
    #[serde(default)]
    bytecode: Option<BytecodeField>,
    #[serde(default)]
    metadata: Option<Metadata>,
}

/// Bytecode, ABI and compiler metadata of one compiled contract.
#[derive(Debug)]
pub struct CompiledArtifact {
    name: String,
    file: PathBuf,
    bytecode: Option<String>,
    abi: JsonAbi,
    compiler_version: Option<String>,
    source_path: Option<String>,
}

impl CompiledArtifact {
    /// Reads the artifact for contract `name` from `file`.
    pub fn load(name: impl Into<String>, file: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let file = file.as_ref();
        let json = fs::read_to_string(file).map_err(|source| ArtifactError::Io {
            path: file.to_path_buf(),
            source,
        })?;
        let parsed: ArtifactFile =
            serde_json::from_str(&json).map_err(|source| ArtifactError::Json {
                path: file.to_path_buf(),
                source,
            })?;
        let name = name.into();

        let bytecode = match parsed.bytecode {
            Some(BytecodeField::Object { object }) => object,
            Some(BytecodeField::Hex(hex)) => Some(hex),
            None => None,
        };
        let metadata = parsed.metadata.unwrap_or_default();
        let source_path = metadata.settings.and_then(|settings| {
            settings
                .compilation_target
                .into_iter()
                .find(|(_, contract)| *contract == name)
                .map(|(path, _)| path)
        });

        Ok(Self {
            name,
            file: file.to_path_buf(),
            bytecode,
            abi: parsed.abi,
            compiler_version: metadata.compiler.map(|compiler| compiler.version),
            source_path,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Creation bytecode; fails for abstract contracts, interfaces and unlinked libraries.
    pub fn creation_code(&self) -> Result<Vec<u8>, ArtifactError> {
        let hex = self.bytecode.as_deref().unwrap_or_default().trim();
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        if hex.is_empty() {
            return Err(ArtifactError::NoBytecode(self.name.clone()));
        }
        if hex.contains("__") {
            return Err(ArtifactError::UnlinkedBytecode(self.name.clone()));
        }
        decode0x(hex).map_err(|source| ArtifactError::InvalidBytecode {
            contract: self.name.clone(),
            source,
        })
    }

    pub fn constructor(&self) -> Option<&Constructor> {
        self.abi.constructor()
    }

    /// Constructor inputs, empty when no constructor is declared.
    pub fn constructor_inputs(&self) -> &[Param] {
        self.constructor()
            .map(|constructor| constructor.inputs.as_slice())
            .unwrap_or_default()
    }

    /// Full compiler version, e.g. `0.8.24+commit.e11b9ed9`.
    pub fn compiler_version(&self) -> Option<&str> {
        self.compiler_version.as_deref()
    }

    /// Source file the contract was compiled from, relative to the project root.
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    /// `path:Name` as expected by block explorers.
    pub fn qualified_name(&self) -> String {
        match &self.source_path {
            Some(path) => format!("{path}:{}", self.name),
            None => self.name.clone(),
        }
    }
}

/// Finds the artifact of `contract` in the compiler output directory.
///
/// With a path, the artifact's compilation target must match it; a bare name must match exactly
/// one artifact in the whole output tree.
pub fn resolve(contract: &ContractRef, out_dir: &Path) -> Result<CompiledArtifact, ArtifactError> {
    let pattern = format!(
        "{}/**/{}.json",
        glob::Pattern::escape(&out_dir.to_string_lossy()),
        glob::Pattern::escape(&contract.name),
    );
    let mut candidates = Vec::new();
    for file in glob_files(&pattern)? {
        let in_build_info = file
            .strip_prefix(out_dir)
            .map(|rel| rel.starts_with(BUILD_INFO_DIR))
            .unwrap_or_default();
        if in_build_info {
            continue;
        }
        let artifact = CompiledArtifact::load(&contract.name, &file)?;
        if let Some(path) = &contract.path {
            if !matches_source(&artifact, &file, path) {
                continue;
            }
        }
        candidates.push(artifact);
    }

    match candidates.len() {
        0 => Err(ArtifactError::NotFound {
            contract: contract.to_string(),
            out_dir: out_dir.to_path_buf(),
        }),
        1 => Ok(candidates.remove(0)),
        _ => Err(ArtifactError::Ambiguous {
            contract: contract.to_string(),
            candidates: candidates
                .iter()
                .map(|artifact| artifact.file().display().to_string())
                .collect(),
        }),
    }
}

/// Paths matching `pattern`; a directory that cannot be read fails the whole search.
fn glob_files(pattern: &str) -> Result<Vec<PathBuf>, ArtifactError> {
    glob::glob(pattern)?
        .map(|entry| {
            entry.map_err(|err| ArtifactError::Io {
                path: err.path().to_path_buf(),
                source: err.into_error(),
            })
        })
        .collect()
}

fn matches_source(artifact: &CompiledArtifact, file: &Path, wanted: &Path) -> bool {
    let wanted = wanted.strip_prefix("./").unwrap_or(wanted);
    match artifact.source_path() {
        Some(source) => Path::new(source) == wanted || Path::new(source).ends_with(wanted),
        // without metadata, artifacts live in a directory named after their source file
        None => file.parent().and_then(Path::file_name) == wanted.file_name(),
    }
}

/// Standard JSON compiler input that produced `source_path`, read from the build-info files.
pub fn standard_json_input(
    out_dir: &Path,
    source_path: &str,
) -> Result<Option<serde_json::Value>, ArtifactError> {
    let pattern = format!(
        "{}/{BUILD_INFO_DIR}/*.json",
        glob::Pattern::escape(&out_dir.to_string_lossy())
    );
    for file in glob_files(&pattern)? {
        let json = fs::read_to_string(&file).map_err(|source| ArtifactError::Io {
            path: file.clone(),
            source,
        })?;
        let mut build_info: serde_json::Value =
            serde_json::from_str(&json).map_err(|source| ArtifactError::Json {
                path: file.clone(),
                source,
            })?;
        let has_source = build_info
            .pointer("/input/sources")
            .and_then(|sources| sources.get(source_path))
            .is_some();
        if has_source {
            return Ok(build_info.get_mut("input").map(serde_json::Value::take));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    fn write(dir: &Path, rel: &str, value: serde_json::Value) {
        let file = dir.join(rel);
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(file, value.to_string()).unwrap();
    }

    fn artifact(source: &str, name: &str, bytecode: &str) -> serde_json::Value {
        json!({
            "abi": [
                {
                    "type": "constructor",
                    "inputs": [{ "name": "owner", "type": "address", "internalType": "address" }],
                    "stateMutability": "nonpayable"
                },
                {
                    "type": "function",
                    "name": "owner",
                    "inputs": [],
                    "outputs": [{ "name": "", "type": "address" }],
                    "stateMutability": "view"
                }
            ],
            "bytecode": { "object": bytecode, "linkReferences": {} },
            "metadata": {
                "compiler": { "version": "0.8.24+commit.e11b9ed9" },
                "settings": { "compilationTarget": { source: name } }
            }
        })
    }

    #[test]
    fn parses_contract_refs() {
        let contract: ContractRef = "src/Token.sol:Token".parse().unwrap();
        assert_eq!(contract.path, Some(PathBuf::from("src/Token.sol")));
        assert_eq!(contract.name, "Token");
        assert_eq!(contract.to_string(), "src/Token.sol:Token");

        let contract: ContractRef = "Token".parse().unwrap();
        assert_eq!(contract.path, None);

        for bad in ["", "src/Token.sol:", ":Token", "Bad Name"] {
            assert!(bad.parse::<ContractRef>().is_err(), "{bad}");
        }
    }

    #[test]
    fn loads_forge_artifact() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "Token.sol/Token.json",
            artifact("src/Token.sol", "Token", "0x6001600155"),
        );
        let artifact =
            CompiledArtifact::load("Token", dir.path().join("Token.sol/Token.json")).unwrap();
        assert_eq!(artifact.creation_code().unwrap(), vec![0x60, 0x01, 0x60, 0x01, 0x55]);
        assert_eq!(artifact.constructor_inputs().len(), 1);
        assert_eq!(artifact.constructor_inputs()[0].ty, "address");
        assert_eq!(artifact.constructor_inputs()[0].name, "owner");
        assert_eq!(artifact.compiler_version(), Some("0.8.24+commit.e11b9ed9"));
        assert_eq!(artifact.qualified_name(), "src/Token.sol:Token");
    }

    #[test]
    fn rejects_missing_and_unlinked_bytecode() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "A.sol/A.json", artifact("src/A.sol", "A", "0x"));
        write(
            dir.path(),
            "B.sol/B.json",
            artifact("src/B.sol", "B", "0x73__$b1a7f1a2c3$__6001"),
        );
        write(dir.path(), "C.sol/C.json", json!({ "abi": [], "bytecode": "" }));

        let a = CompiledArtifact::load("A", dir.path().join("A.sol/A.json")).unwrap();
        assert!(matches!(a.creation_code(), Err(ArtifactError::NoBytecode(_))));
        let b = CompiledArtifact::load("B", dir.path().join("B.sol/B.json")).unwrap();
        assert!(matches!(
            b.creation_code(),
            Err(ArtifactError::UnlinkedBytecode(_))
        ));
        let c = CompiledArtifact::load("C", dir.path().join("C.sol/C.json")).unwrap();
        assert!(matches!(c.creation_code(), Err(ArtifactError::NoBytecode(_))));
        assert!(c.constructor().is_none());
        assert!(c.constructor_inputs().is_empty());
    }

    #[test]
    fn resolves_by_name_and_path() {
        let dir = TempDir::new().unwrap();
        let out = dir.path();
        write(out, "Token.sol/Token.json", artifact("src/Token.sol", "Token", "0x01"));
        write(out, "Vault.sol/Vault.json", artifact("src/Vault.sol", "Vault", "0x02"));
        write(
            out,
            "legacy/Vault.sol/Vault.json",
            artifact("src/legacy/Vault.sol", "Vault", "0x03"),
        );
        write(out, "build-info/Token.json", json!({ "input": {} }));

        let token = resolve(&"Token".parse().unwrap(), out).unwrap();
        assert_eq!(token.creation_code().unwrap(), vec![0x01]);

        let err = resolve(&"Vault".parse().unwrap(), out).unwrap_err();
        assert!(matches!(err, ArtifactError::Ambiguous { ref candidates, .. } if candidates.len() == 2));

        let vault = resolve(&"src/legacy/Vault.sol:Vault".parse().unwrap(), out).unwrap();
        assert_eq!(vault.creation_code().unwrap(), vec![0x03]);
        let vault = resolve(&"./src/Vault.sol:Vault".parse().unwrap(), out).unwrap();
        assert_eq!(vault.creation_code().unwrap(), vec![0x02]);

        assert!(matches!(
            resolve(&"Missing".parse().unwrap(), out),
            Err(ArtifactError::NotFound { .. })
        ));
        assert!(matches!(
            resolve(&"src/Other.sol:Token".parse().unwrap(), out),
            Err(ArtifactError::NotFound { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_directory_is_an_io_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let out = dir.path();
        write(out, "Token.sol/Token.json", artifact("src/Token.sol", "Token", "0x01"));
        let locked = out.join("Locked.sol");
        fs::create_dir_all(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        // permissions do not apply to a privileged user
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let err = resolve(&"Token".parse().unwrap(), out).unwrap_err();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        assert!(matches!(err, ArtifactError::Io { ref path, .. } if path == &locked), "{err}");
    }

    #[test]
    fn rejects_malformed_abi() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "Bad.sol/Bad.json",
            json!({
                "abi": [{ "type": "constructor", "inputs": [{ "name": "x", "type": "uint256[" }] }],
                "bytecode": { "object": "0x01" }
            }),
        );
        assert!(matches!(
            CompiledArtifact::load("Bad", dir.path().join("Bad.sol/Bad.json")),
            Err(ArtifactError::Json { .. })
        ));
    }

    #[test]
    fn finds_standard_json_input() {
        let dir = TempDir::new().unwrap();
        let input = json!({
            "language": "Solidity",
            "sources": { "src/Token.sol": { "content": "contract Token {}" } },
            "settings": {}
        });
        write(dir.path(), "build-info/1.json", json!({ "input": { "sources": {} } }));
        write(dir.path(), "build-info/2.json", json!({ "id": "2", "input": input.clone() }));

        let found = standard_json_input(dir.path(), "src/Token.sol").unwrap();
        assert_eq!(found, Some(input));
        assert_eq!(standard_json_input(dir.path(), "src/Other.sol").unwrap(), None);
    }
}
