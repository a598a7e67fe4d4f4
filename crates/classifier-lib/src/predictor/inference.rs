//! Type prediction over the loaded artifacts
//!
//! Inference never fails outward: an absent artifact or a classifier error
//! becomes the "Unknown" label (or an "Error" result when the pipeline is
//! unusable) and is logged and counted.

use super::{FeatureBuilder, Prediction, TypeClassifier};
use crate::artifacts::Artifacts;
use crate::models::{FeatureRow, FormInput, PredictionResult, UNKNOWN_LABEL};
use crate::observability::ClassifierMetrics;
use crate::vocab::is_known_type;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Shown when the classifier artifact is absent
pub const MODEL_UNAVAILABLE_MESSAGE: &str =
    "The model could not be loaded; check the artifact files.";
/// Shown when the feature row could not be built
pub const FEATURES_UNAVAILABLE_MESSAGE: &str = "Error processing the input data.";

/// Predict the label for a prepared row.
///
/// Returns "Unknown" when either the row or the classifier is absent, or when
/// inference fails.
pub fn predict(row: Option<&FeatureRow>, classifier: Option<&dyn TypeClassifier>) -> String {
    run_classifier(row, classifier)
        .map(|p| p.label)
        .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
}

fn run_classifier(
    row: Option<&FeatureRow>,
    classifier: Option<&dyn TypeClassifier>,
) -> Option<Prediction> {
    let (row, classifier) = match (row, classifier) {
        (Some(row), Some(classifier)) => (row, classifier),
        _ => {
            debug!("No feature row or classifier, prediction is unknown");
            return None;
        }
    };

    match classifier.predict(row) {
        Ok(prediction) => Some(prediction),
        Err(e) => {
            warn!(
                error = %e,
                model_version = classifier.model_version(),
                "Prediction failed"
            );
            ClassifierMetrics::new().inc_prediction_errors();
            None
        }
    }
}

/// Runs the full pipeline (features then classifier) for form input
#[derive(Clone)]
pub struct TypePredictor {
    artifacts: Arc<Artifacts>,
    metrics: ClassifierMetrics,
}

impl TypePredictor {
    pub fn new(artifacts: Arc<Artifacts>) -> Self {
        Self {
            artifacts,
            metrics: ClassifierMetrics::new(),
        }
    }

    pub fn artifacts(&self) -> &Artifacts {
        &self.artifacts
    }

    /// Aligned feature row for `input`, if the transformers are loaded
    pub fn features(&self, input: &FormInput) -> Option<FeatureRow> {
        FeatureBuilder::build(
            input,
            self.artifacts.scaler(),
            self.artifacts.encoder(),
            self.artifacts.expected_columns(),
        )
    }

    /// Classify `input` into a result suitable for display
    pub fn classify(&self, input: &FormInput) -> PredictionResult {
        let Some(classifier) = self.artifacts.classifier() else {
            return PredictionResult::error(MODEL_UNAVAILABLE_MESSAGE);
        };
        let Some(row) = self.features(input) else {
            return PredictionResult::error(FEATURES_UNAVAILABLE_MESSAGE);
        };

        let start = Instant::now();
        let prediction = run_classifier(Some(&row), Some(classifier));
        self.metrics
            .observe_prediction_latency(start.elapsed().as_secs_f64());

        match prediction {
            Some(p) => {
                if !is_known_type(&p.label) {
                    warn!(label = %p.label, "Predicted label has no palette color");
                }
                self.metrics.inc_predictions(&p.label);
                PredictionResult::success(p.label, p.confidence)
            }
            None => {
                self.metrics.inc_predictions(UNKNOWN_LABEL);
                PredictionResult::success(UNKNOWN_LABEL, None)
            }
        }
    }
}
