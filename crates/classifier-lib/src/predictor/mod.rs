//! Feature preparation and type prediction

mod features;
mod inference;

pub use features::{BuiltFeatures, FeatureBuilder};
pub use inference::{predict, TypePredictor};

use crate::error::InferenceError;
use crate::models::FeatureRow;

/// Output of a classifier for a single row
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub confidence: Option<f64>,
}

/// Trait for classifier implementations
pub trait TypeClassifier: Send + Sync {
    /// Ordered column names the classifier was trained on
    fn feature_names(&self) -> &[String];

    /// Predict the primary type for one aligned feature row
    fn predict(&self, row: &FeatureRow) -> Result<Prediction, InferenceError>;

    /// Get current model version
    fn model_version(&self) -> &str;
}
