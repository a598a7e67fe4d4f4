//! Fitted standard scaler for the eight numeric attributes

use crate::error::ArtifactError;
use crate::models::NUMERIC_COLUMNS;
use serde::{Deserialize, Serialize};

const ARTIFACT: &str = "scaler";

/// Standardizes features as `(x - mean) / scale`
///
/// A missing `mean` disables centering and a missing `scale` disables
/// scaling, mirroring a scaler fitted with `with_mean`/`with_std` off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    #[serde(default)]
    mean: Option<Vec<f64>>,
    #[serde(default)]
    scale: Option<Vec<f64>>,
}

impl StandardScaler {
    pub fn new(mean: Option<Vec<f64>>, scale: Option<Vec<f64>>) -> Result<Self, ArtifactError> {
        let scaler = Self { mean, scale };
        scaler.validate()?;
        Ok(scaler)
    }

    /// A scaler that leaves values untouched
    pub fn identity() -> Self {
        Self {
            mean: None,
            scale: None,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ArtifactError> {
        let width = NUMERIC_COLUMNS.len();
        for (field, values) in [("mean", &self.mean), ("scale", &self.scale)] {
            let Some(values) = values else { continue };
            if values.len() != width {
                return Err(ArtifactError::Shape {
                    artifact: ARTIFACT,
                    reason: format!("{} has {} entries, expected {}", field, values.len(), width),
                });
            }
            if values.iter().any(|v| !v.is_finite()) {
                return Err(ArtifactError::Shape {
                    artifact: ARTIFACT,
                    reason: format!("{} contains non-finite values", field),
                });
            }
        }
        Ok(())
    }

    pub fn transform(&self, values: &[f64; 8]) -> [f64; 8] {
        let mut out = *values;
        for (i, value) in out.iter_mut().enumerate() {
            if let Some(mean) = &self.mean {
                *value -= mean[i];
            }
            if let Some(scale) = &self.scale {
                let s = scale[i];
                // zero variance columns were left unscaled at fit time
                if s != 0.0 {
                    *value /= s;
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_centers_and_scales() {
        let scaler = StandardScaler::new(
            Some(vec![50.0, 50.0, 50.0, 50.0, 50.0, 50.0, 1.0, 50.0]),
            Some(vec![10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 0.5, 25.0]),
        )
        .unwrap();
        let out = scaler.transform(&[60.0, 40.0, 50.0, 50.0, 50.0, 50.0, 2.0, 100.0]);
        assert!((out[0] - 1.0).abs() < 1e-12);
        assert!((out[1] + 1.0).abs() < 1e-12);
        assert_eq!(out[2], 0.0);
        assert!((out[6] - 2.0).abs() < 1e-12);
        assert!((out[7] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_scale_is_ignored() {
        let scaler = StandardScaler::new(None, Some(vec![0.0; 8])).unwrap();
        let values = [3.0; 8];
        assert_eq!(scaler.transform(&values), values);
    }

    #[test]
    fn test_identity() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        assert_eq!(StandardScaler::identity().transform(&values), values);
    }

    #[test]
    fn test_wrong_width_rejected() {
        let err = StandardScaler::new(Some(vec![1.0; 7]), None).unwrap_err();
        assert!(matches!(err, ArtifactError::Shape { .. }));
    }

    #[test]
    fn test_deserialize_with_null_mean() {
        let scaler: StandardScaler =
            serde_json::from_str(r#"{"mean": null, "scale": [1,1,1,1,1,1,1,2]}"#).unwrap();
        assert!(scaler.validate().is_ok());
        assert_eq!(scaler.transform(&[2.0; 8])[7], 1.0);
    }
}
