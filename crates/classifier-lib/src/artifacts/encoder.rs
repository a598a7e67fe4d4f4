//! Multi-label binarizer for abilities

use crate::error::ArtifactError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const ARTIFACT: &str = "ability encoder";

/// Maps a collection of ability labels to one indicator per known class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiLabelEncoder {
    classes: Vec<String>,
}

impl MultiLabelEncoder {
    pub fn new(classes: Vec<String>) -> Result<Self, ArtifactError> {
        let encoder = Self { classes };
        encoder.validate()?;
        Ok(encoder)
    }

    pub(crate) fn validate(&self) -> Result<(), ArtifactError> {
        if self.classes.is_empty() {
            return Err(ArtifactError::Shape {
                artifact: ARTIFACT,
                reason: "no classes".to_string(),
            });
        }
        let mut seen = HashSet::with_capacity(self.classes.len());
        for class in &self.classes {
            if !seen.insert(class.as_str()) {
                return Err(ArtifactError::Shape {
                    artifact: ARTIFACT,
                    reason: format!("duplicate class {:?}", class),
                });
            }
        }
        Ok(())
    }

    /// Known classes, in column order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn knows(&self, label: &str) -> bool {
        self.classes.iter().any(|c| c == label)
    }

    /// Indicator row for `labels`. Labels outside the known classes are ignored.
    pub fn transform<S: AsRef<str>>(&self, labels: &[S]) -> Vec<f64> {
        self.classes
            .iter()
            .map(|class| {
                if labels.iter().any(|l| l.as_ref() == class) {
                    1.0
                } else {
                    0.0
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> MultiLabelEncoder {
        MultiLabelEncoder::new(vec![
            "blaze".to_string(),
            "overgrow".to_string(),
            "static".to_string(),
        ])
        .unwrap()
    }

    #[test]
    fn test_single_label() {
        assert_eq!(encoder().transform(&["static"]), vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_unknown_label_is_all_zero() {
        let enc = encoder();
        assert_eq!(enc.transform(&["levitate"]), vec![0.0, 0.0, 0.0]);
        assert!(!enc.knows("levitate"));
    }

    #[test]
    fn test_multiple_labels() {
        assert_eq!(encoder().transform(&["blaze", "static"]), vec![1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_rejects_duplicates_and_empty() {
        assert!(MultiLabelEncoder::new(vec![]).is_err());
        assert!(MultiLabelEncoder::new(vec!["a".to_string(), "a".to_string()]).is_err());
    }
}
