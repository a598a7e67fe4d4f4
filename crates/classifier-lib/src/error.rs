//! Error types for artifact loading and inference

use std::path::PathBuf;
use thiserror::Error;

/// Failure to load one of the pre-trained artifacts
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("{artifact} artifact not found at {path:?}")]
    Missing { artifact: &'static str, path: PathBuf },

    #[error("failed to read {artifact} artifact at {path:?}: {source}")]
    Io {
        artifact: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {artifact} artifact at {path:?}: {source}")]
    Parse {
        artifact: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("checksum mismatch for {artifact} artifact: expected {expected}, got {actual}")]
    ChecksumMismatch {
        artifact: &'static str,
        expected: String,
        actual: String,
    },

    #[error("{artifact} artifact has an invalid shape: {reason}")]
    Shape {
        artifact: &'static str,
        reason: String,
    },
}

impl ArtifactError {
    /// Name of the artifact this error refers to
    pub fn artifact(&self) -> &'static str {
        match self {
            ArtifactError::Missing { artifact, .. }
            | ArtifactError::Io { artifact, .. }
            | ArtifactError::Parse { artifact, .. }
            | ArtifactError::ChecksumMismatch { artifact, .. }
            | ArtifactError::Shape { artifact, .. } => artifact,
        }
    }
}

/// Failure while running the classifier on a feature row
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("feature row does not match the model schema: {0}")]
    SchemaMismatch(String),

    #[error("model has no classes")]
    EmptyModel,

    #[error("model produced a non-finite score for class {0}")]
    NonFinite(String),
}
