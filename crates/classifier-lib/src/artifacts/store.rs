//! Loading of the pre-trained artifacts from disk
//!
//! Each artifact loads independently. A missing or corrupt file leaves that
//! slot empty and records the error; the resulting [`Artifacts`] handle is
//! read-only for the rest of the process.

use super::{LinearClassifier, MultiLabelEncoder, StandardScaler};
use crate::error::ArtifactError;
use crate::predictor::TypeClassifier;
use crate::vocab::{display_ability, NO_ABILITIES};
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info};

pub const CLASSIFIER_FILE: &str = "classifier.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const ENCODER_FILE: &str = "abilities_encoder.json";

/// Extension of the optional checksum sidecar next to each artifact
pub const CHECKSUM_EXTENSION: &str = "sha256";

/// Loads artifacts from a fixed directory
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load all three artifacts
    pub fn load(&self) -> Artifacts {
        let mut errors = Vec::new();

        let classifier = self
            .load_artifact::<LinearClassifier>(CLASSIFIER_FILE, "classifier", |m| m.validate())
            .map_err(|e| errors.push(e))
            .ok()
            .map(|m| Arc::new(m) as Arc<dyn TypeClassifier>);

        let scaler = self
            .load_artifact::<StandardScaler>(SCALER_FILE, "scaler", |s| s.validate())
            .map_err(|e| errors.push(e))
            .ok();

        let encoder = self
            .load_artifact::<MultiLabelEncoder>(ENCODER_FILE, "ability encoder", |e| e.validate())
            .map_err(|e| errors.push(e))
            .ok();

        for err in &errors {
            error!(artifact = err.artifact(), error = %err, "Failed to load artifact");
        }
        info!(
            dir = %self.dir.display(),
            classifier = classifier.is_some(),
            scaler = scaler.is_some(),
            encoder = encoder.is_some(),
            "Artifacts loaded"
        );

        Artifacts {
            classifier,
            scaler,
            encoder,
            errors: errors.into_iter().map(Arc::new).collect(),
        }
    }

    fn load_artifact<T: DeserializeOwned>(
        &self,
        file: &str,
        artifact: &'static str,
        validate: impl FnOnce(&T) -> Result<(), ArtifactError>,
    ) -> Result<T, ArtifactError> {
        let path = self.dir.join(file);
        if !path.exists() {
            return Err(ArtifactError::Missing { artifact, path });
        }

        let bytes = fs::read(&path).map_err(|source| ArtifactError::Io {
            artifact,
            path: path.clone(),
            source,
        })?;

        verify_checksum(&path, &bytes, artifact)?;

        let value: T = serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
            artifact,
            path: path.clone(),
            source,
        })?;
        validate(&value)?;

        debug!(artifact, path = %path.display(), size_bytes = bytes.len(), "Loaded artifact");
        Ok(value)
    }
}

/// Hex SHA-256 of `bytes`
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

fn verify_checksum(path: &Path, bytes: &[u8], artifact: &'static str) -> Result<(), ArtifactError> {
    let mut sidecar = path.as_os_str().to_owned();
    sidecar.push(".");
    sidecar.push(CHECKSUM_EXTENSION);
    let sidecar = PathBuf::from(sidecar);
    if !sidecar.exists() {
        return Ok(());
    }

    let contents = fs::read_to_string(&sidecar).map_err(|source| ArtifactError::Io {
        artifact,
        path: sidecar.clone(),
        source,
    })?;
    let expected = contents
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase();
    let actual = sha256_hex(bytes);

    if expected != actual {
        return Err(ArtifactError::ChecksumMismatch {
            artifact,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Read-only handle to whatever artifacts could be loaded
#[derive(Clone, Default)]
pub struct Artifacts {
    classifier: Option<Arc<dyn TypeClassifier>>,
    scaler: Option<StandardScaler>,
    encoder: Option<MultiLabelEncoder>,
    errors: Vec<Arc<ArtifactError>>,
}

impl Artifacts {
    /// Assemble a handle from already-built parts
    pub fn from_parts(
        classifier: Option<Arc<dyn TypeClassifier>>,
        scaler: Option<StandardScaler>,
        encoder: Option<MultiLabelEncoder>,
    ) -> Self {
        Self {
            classifier,
            scaler,
            encoder,
            errors: Vec::new(),
        }
    }

    /// A handle with nothing loaded
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn classifier(&self) -> Option<&dyn TypeClassifier> {
        self.classifier.as_deref()
    }

    pub fn scaler(&self) -> Option<&StandardScaler> {
        self.scaler.as_ref()
    }

    pub fn encoder(&self) -> Option<&MultiLabelEncoder> {
        self.encoder.as_ref()
    }

    pub fn errors(&self) -> &[Arc<ArtifactError>] {
        &self.errors
    }

    /// All three artifacts loaded
    pub fn is_complete(&self) -> bool {
        self.classifier.is_some() && self.scaler.is_some() && self.encoder.is_some()
    }

    pub fn loaded_count(&self) -> usize {
        [
            self.classifier.is_some(),
            self.scaler.is_some(),
            self.encoder.is_some(),
        ]
        .iter()
        .filter(|loaded| **loaded)
        .count()
    }

    /// Feature schema of the classifier, empty when it is not loaded
    pub fn expected_columns(&self) -> &[String] {
        self.classifier
            .as_deref()
            .map(|c| c.feature_names())
            .unwrap_or(&[])
    }

    /// Abilities offered by the form, capitalized for display
    pub fn ability_options(&self) -> Vec<String> {
        match &self.encoder {
            Some(encoder) => encoder.classes().iter().map(|a| display_ability(a)).collect(),
            None => vec![NO_ABILITIES.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CLASSIFIER_JSON: &str = r#"{
        "classes": ["Electric", "Fire"],
        "feature_names_in": ["sc_hp"],
        "coef": [[1.0]],
        "intercept": [0.0]
    }"#;
    const SCALER_JSON: &str = r#"{
        "mean": [50, 50, 50, 50, 50, 50, 1, 50],
        "scale": [10, 10, 10, 10, 10, 10, 1, 20]
    }"#;
    const ENCODER_JSON: &str = r#"{"classes": ["blaze", "static"]}"#;

    fn write_all(dir: &Path) {
        fs::write(dir.join(CLASSIFIER_FILE), CLASSIFIER_JSON).unwrap();
        fs::write(dir.join(SCALER_FILE), SCALER_JSON).unwrap();
        fs::write(dir.join(ENCODER_FILE), ENCODER_JSON).unwrap();
    }

    #[test]
    fn test_load_complete() {
        let dir = TempDir::new().unwrap();
        write_all(dir.path());

        let artifacts = ArtifactStore::new(dir.path()).load();
        assert!(artifacts.is_complete());
        assert!(artifacts.errors().is_empty());
        assert_eq!(artifacts.loaded_count(), 3);
        assert_eq!(artifacts.expected_columns(), &["sc_hp".to_string()]);
        assert_eq!(artifacts.ability_options(), vec!["Blaze", "Static"]);
    }

    #[test]
    fn test_missing_directory_degrades() {
        let dir = TempDir::new().unwrap();
        let artifacts = ArtifactStore::new(dir.path().join("nope")).load();

        assert!(!artifacts.is_complete());
        assert_eq!(artifacts.loaded_count(), 0);
        assert_eq!(artifacts.errors().len(), 3);
        assert!(artifacts
            .errors()
            .iter()
            .all(|e| matches!(**e, ArtifactError::Missing { .. })));
        assert_eq!(artifacts.ability_options(), vec![NO_ABILITIES]);
        assert!(artifacts.expected_columns().is_empty());
    }

    #[test]
    fn test_corrupt_file_only_affects_that_artifact() {
        let dir = TempDir::new().unwrap();
        write_all(dir.path());
        fs::write(dir.path().join(SCALER_FILE), "not json").unwrap();

        let artifacts = ArtifactStore::new(dir.path()).load();
        assert!(artifacts.classifier().is_some());
        assert!(artifacts.scaler().is_none());
        assert!(artifacts.encoder().is_some());
        assert_eq!(artifacts.errors().len(), 1);
        assert!(matches!(*artifacts.errors()[0], ArtifactError::Parse { .. }));
    }

    #[test]
    fn test_invalid_shape_rejected() {
        let dir = TempDir::new().unwrap();
        write_all(dir.path());
        fs::write(dir.path().join(SCALER_FILE), r#"{"mean": [1, 2]}"#).unwrap();

        let artifacts = ArtifactStore::new(dir.path()).load();
        assert!(artifacts.scaler().is_none());
        assert!(matches!(*artifacts.errors()[0], ArtifactError::Shape { .. }));
    }

    #[test]
    fn test_single_class_classifier_rejected() {
        let dir = TempDir::new().unwrap();
        write_all(dir.path());
        fs::write(
            dir.path().join(CLASSIFIER_FILE),
            r#"{
                "classes": ["Electric"],
                "feature_names_in": ["gen_1"],
                "coef": [[1.0]],
                "intercept": [0.5]
            }"#,
        )
        .unwrap();

        let artifacts = ArtifactStore::new(dir.path()).load();
        assert!(artifacts.classifier().is_none());
        assert!(!artifacts.is_complete());
        assert!(matches!(*artifacts.errors()[0], ArtifactError::Shape { .. }));
    }

    #[test]
    fn test_checksum_sidecar() {
        let dir = TempDir::new().unwrap();
        write_all(dir.path());
        let good = sha256_hex(ENCODER_JSON.as_bytes());
        fs::write(
            dir.path().join(format!("{}.{}", ENCODER_FILE, CHECKSUM_EXTENSION)),
            format!("{}  {}\n", good, ENCODER_FILE),
        )
        .unwrap();
        fs::write(
            dir.path().join(format!("{}.{}", SCALER_FILE, CHECKSUM_EXTENSION)),
            "0000",
        )
        .unwrap();

        let artifacts = ArtifactStore::new(dir.path()).load();
        assert!(artifacts.encoder().is_some());
        assert!(artifacts.scaler().is_none());
        assert!(matches!(
            *artifacts.errors()[0],
            ArtifactError::ChecksumMismatch { .. }
        ));
    }
}
