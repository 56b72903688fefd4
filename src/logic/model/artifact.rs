//! Model Artifact - Serialized pipeline on disk
//!
//! The artifact is a JSON document describing the fitted preprocessing and
//! linear stages. An optional `<artifact>.sha256` sidecar holds the hex digest
//! of the artifact bytes.

use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::logic::error::ModelError;

/// Artifact format this build understands
pub const SUPPORTED_FORMAT_VERSION: u32 = 1;

/// Extension appended to the artifact path for the checksum sidecar
pub const CHECKSUM_EXTENSION: &str = "sha256";

// ============================================================================
// ARTIFACT SCHEMA
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineArtifact {
    pub format_version: u32,
    pub model_type: String,
    pub preprocessor: PreprocessorSpec,
    pub model: LinearSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessorSpec {
    pub numeric: NumericSpec,
    pub categorical: CategoricalSpec,
}

/// Numeric transformer: passthrough unless a scaler is present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSpec {
    pub features: Vec<String>,
    #[serde(default)]
    pub scaler: Option<ScalerSpec>,
}

/// Standard scaler parameters, `(x - mean) / scale`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerSpec {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// One-hot encoder fitted vocabularies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalSpec {
    pub features: Vec<CategoricalColumnSpec>,
    #[serde(default)]
    pub handle_unknown: UnknownPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalColumnSpec {
    pub name: String,
    pub categories: Vec<String>,
    /// Category removed by the encoder's `drop` option (`first`, `if_binary`
    /// or explicit). It stays in the vocabulary but gets no output column.
    #[serde(default)]
    pub drop: Option<String>,
}

/// What the encoder does with a value it never saw during fitting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownPolicy {
    /// Reject the record
    #[default]
    Error,
    /// Encode as an all-zero block
    Ignore,
}

/// Linear stage: one coefficient per expanded feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearSpec {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub alpha: Option<f64>,
}

impl PipelineArtifact {
    pub fn from_json(content: &str) -> Result<Self, ModelError> {
        serde_json::from_str(content)
            .map_err(|e| ModelError::ArtifactLoad(format!("Failed to parse artifact: {}", e)))
    }

    pub fn to_json_pretty(&self) -> Result<String, ModelError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ModelError::ArtifactLoad(format!("Failed to serialize artifact: {}", e)))
    }
}

// ============================================================================
// ARTIFACT SOURCES
// ============================================================================

/// Decoded artifact plus where it came from
#[derive(Debug, Clone)]
pub struct LoadedArtifact {
    pub artifact: PipelineArtifact,
    pub origin: String,
    pub sha256: Option<String>,
}

/// Anything that can produce a pipeline artifact.
///
/// `ModelService` calls `read` at most once per successful load.
pub trait ArtifactSource: Send + Sync {
    fn read(&self) -> Result<LoadedArtifact, ModelError>;
}

/// Reads a JSON artifact from disk
#[derive(Debug, Clone)]
pub struct FileArtifactSource {
    path: PathBuf,
    verify_checksum: bool,
}

impl FileArtifactSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            verify_checksum: true,
        }
    }

    pub fn with_checksum_verification(mut self, verify: bool) -> Self {
        self.verify_checksum = verify;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<artifact>.sha256`
    pub fn checksum_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".");
        name.push(CHECKSUM_EXTENSION);
        PathBuf::from(name)
    }

    fn verify(&self, digest: &str) -> Result<(), ModelError> {
        let sidecar = self.checksum_path();
        let expected = match fs::read_to_string(&sidecar) {
            Ok(content) => content,
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                log::debug!("No checksum sidecar at {}, skipping verification", sidecar.display());
                return Ok(());
            }
            Err(e) => {
                return Err(ModelError::ArtifactLoad(format!(
                    "Failed to read checksum {}: {}",
                    sidecar.display(),
                    e
                )))
            }
        };

        // sha256sum format is "<digest>  <file name>"
        let expected = expected.split_whitespace().next().unwrap_or("").to_lowercase();
        if expected != digest {
            return Err(ModelError::ArtifactLoad(format!(
                "Checksum mismatch for {}: expected {}, got {}",
                self.path.display(),
                expected,
                digest
            )));
        }

        log::info!("Model checksum verified ({}...)", &digest[..12]);
        Ok(())
    }
}

impl ArtifactSource for FileArtifactSource {
    fn read(&self) -> Result<LoadedArtifact, ModelError> {
        log::info!("Loading model artifact from: {}", self.path.display());

        let bytes = fs::read(&self.path).map_err(|e| match e.kind() {
            IoErrorKind::NotFound => {
                ModelError::ArtifactLoad(format!("Model not found: {}", self.path.display()))
            }
            _ => ModelError::ArtifactLoad(format!("Failed to read {}: {}", self.path.display(), e)),
        })?;

        let digest = sha256_hex(&bytes);
        if self.verify_checksum {
            self.verify(&digest)?;
        }

        let content = std::str::from_utf8(&bytes)
            .map_err(|e| ModelError::ArtifactLoad(format!("Artifact is not UTF-8: {}", e)))?;
        let artifact = PipelineArtifact::from_json(content)?;

        Ok(LoadedArtifact {
            artifact,
            origin: self.path.display().to_string(),
            sha256: Some(digest),
        })
    }
}

/// Hex SHA-256 of a byte slice
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

// ============================================================================
// TESTS
// ============================================================================
