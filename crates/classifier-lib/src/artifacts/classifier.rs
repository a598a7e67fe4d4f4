//! Linear (logistic regression) type classifier
//!
//! Scores each class as `coef_k · x + intercept_k` and predicts the class
//! with the highest score. A two-class model stored with a single
//! coefficient row predicts the second class when the score is positive.

use crate::error::{ArtifactError, InferenceError};
use crate::models::FeatureRow;
use crate::predictor::{Prediction, TypeClassifier};
use serde::{Deserialize, Serialize};
use tracing::debug;

const ARTIFACT: &str = "classifier";

fn default_version() -> String {
    "v1".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearClassifier {
    classes: Vec<String>,
    feature_names_in: Vec<String>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    #[serde(default = "default_version")]
    version: String,
}

impl LinearClassifier {
    pub fn new(
        classes: Vec<String>,
        feature_names_in: Vec<String>,
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
    ) -> Result<Self, ArtifactError> {
        let model = Self {
            classes,
            feature_names_in,
            coef,
            intercept,
            version: default_version(),
        };
        model.validate()?;
        Ok(model)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub(crate) fn validate(&self) -> Result<(), ArtifactError> {
        let shape_err = |reason: String| ArtifactError::Shape {
            artifact: ARTIFACT,
            reason,
        };

        if self.classes.len() < 2 {
            return Err(shape_err(format!(
                "{} classes, at least 2 are required",
                self.classes.len()
            )));
        }
        let binary = self.is_binary();
        if !binary && self.coef.len() != self.classes.len() {
            return Err(shape_err(format!(
                "coef has {} rows for {} classes",
                self.coef.len(),
                self.classes.len()
            )));
        }
        if self.intercept.len() != self.coef.len() {
            return Err(shape_err(format!(
                "intercept has {} entries for {} coef rows",
                self.intercept.len(),
                self.coef.len()
            )));
        }
        let width = self.feature_names_in.len();
        if let Some(row) = self.coef.iter().position(|r| r.len() != width) {
            return Err(shape_err(format!(
                "coef row {} has {} entries, expected {}",
                row,
                self.coef[row].len(),
                width
            )));
        }
        Ok(())
    }

    fn is_binary(&self) -> bool {
        self.classes.len() == 2 && self.coef.len() == 1
    }

    fn check_schema(&self, row: &FeatureRow) -> Result<(), InferenceError> {
        if row.len() != self.feature_names_in.len() {
            return Err(InferenceError::SchemaMismatch(format!(
                "row has {} columns, model expects {}",
                row.len(),
                self.feature_names_in.len()
            )));
        }
        for (i, (got, expected)) in row.names().zip(&self.feature_names_in).enumerate() {
            if got != expected {
                return Err(InferenceError::SchemaMismatch(format!(
                    "column {} is {:?}, model expects {:?}",
                    i, got, expected
                )));
            }
        }
        Ok(())
    }

    /// Raw per-row scores
    pub fn decision_function(&self, row: &FeatureRow) -> Result<Vec<f64>, InferenceError> {
        self.check_schema(row)?;
        let x: Vec<f64> = row.values().collect();
        let scores = self
            .coef
            .iter()
            .zip(&self.intercept)
            .map(|(weights, b)| weights.iter().zip(&x).map(|(w, v)| w * v).sum::<f64>() + b)
            .collect();
        Ok(scores)
    }

    /// Class probabilities, aligned with `classes()`
    pub fn predict_proba(&self, row: &FeatureRow) -> Result<Vec<f64>, InferenceError> {
        let scores = self.decision_function(row)?;
        if let (true, [score]) = (self.is_binary(), scores.as_slice()) {
            let p = sigmoid(*score);
            return Ok(vec![1.0 - p, p]);
        }
        Ok(softmax(&scores))
    }
}

impl TypeClassifier for LinearClassifier {
    fn feature_names(&self) -> &[String] {
        &self.feature_names_in
    }

    fn predict(&self, row: &FeatureRow) -> Result<Prediction, InferenceError> {
        let proba = self.predict_proba(row)?;
        let (best, p) = proba
            .iter()
            .copied()
            .enumerate()
            .fold(None, |acc: Option<(usize, f64)>, (i, p)| match acc {
                Some((_, best)) if best >= p => acc,
                _ => Some((i, p)),
            })
            .ok_or(InferenceError::EmptyModel)?;

        let label = self.classes.get(best).ok_or(InferenceError::EmptyModel)?;
        if !p.is_finite() {
            return Err(InferenceError::NonFinite(label.clone()));
        }
        debug!(label = %label, probability = p, "Classified feature row");
        Ok(Prediction {
            label: label.clone(),
            confidence: Some(p),
        })
    }

    fn model_version(&self) -> &str {
        &self.version
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.iter().map(|e| e / sum).collect()
}
