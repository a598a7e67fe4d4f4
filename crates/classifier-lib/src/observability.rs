//! Observability infrastructure for the classifier
//!
//! Provides:
//! - Prometheus metrics (prediction latency, predictions by label, session actions)
//! - Structured JSON logging with tracing

use crate::artifacts::Artifacts;
use prometheus::{
    register_gauge_vec, register_histogram, register_int_counter, register_int_counter_vec,
    register_int_gauge, GaugeVec, Histogram, IntCounter, IntCounterVec, IntGauge,
};
use std::sync::OnceLock;
use tracing::{error, info, warn};

/// Default histogram buckets for latency measurements (in seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<ClassifierMetricsInner> = OnceLock::new();

/// Inner metrics structure that holds the actual Prometheus metrics
struct ClassifierMetricsInner {
    prediction_latency_seconds: Histogram,
    predictions_total: IntCounterVec,
    prediction_errors_total: IntCounter,
    session_actions_total: IntCounterVec,
    artifacts_loaded: IntGauge,
    model_version_info: GaugeVec,
}

impl ClassifierMetricsInner {
    fn new() -> Self {
        Self {
            prediction_latency_seconds: register_histogram!(
                "pokedex_prediction_latency_seconds",
                "Time spent building features and running the classifier",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register prediction_latency_seconds"),

            predictions_total: register_int_counter_vec!(
                "pokedex_predictions_total",
                "Predictions produced, by predicted label",
                &["label"]
            )
            .expect("Failed to register predictions_total"),

            prediction_errors_total: register_int_counter!(
                "pokedex_prediction_errors_total",
                "Classifier failures converted to the Unknown label"
            )
            .expect("Failed to register prediction_errors_total"),

            session_actions_total: register_int_counter_vec!(
                "pokedex_session_actions_total",
                "Session actions applied, by action",
                &["action"]
            )
            .expect("Failed to register session_actions_total"),

            artifacts_loaded: register_int_gauge!(
                "pokedex_artifacts_loaded",
                "Number of artifacts (of 3) that loaded successfully"
            )
            .expect("Failed to register artifacts_loaded"),

            model_version_info: register_gauge_vec!(
                "pokedex_model_version_info",
                "Information about the loaded classifier",
                &["version"]
            )
            .expect("Failed to register model_version_info"),
        }
    }
}

/// Classifier metrics for Prometheus exposition
///
/// This is a lightweight handle to the global metrics instance.
/// Multiple clones share the same underlying metrics.
#[derive(Clone)]
pub struct ClassifierMetrics {
    _private: (),
}

impl Default for ClassifierMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassifierMetrics {
    /// Create a new metrics handle (initializes global metrics if needed)
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(ClassifierMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &ClassifierMetricsInner {
        GLOBAL_METRICS.get().expect("Metrics not initialized")
    }

    pub fn observe_prediction_latency(&self, duration_secs: f64) {
        self.inner().prediction_latency_seconds.observe(duration_secs);
    }

    pub fn inc_predictions(&self, label: &str) {
        self.inner().predictions_total.with_label_values(&[label]).inc();
    }

    pub fn inc_prediction_errors(&self) {
        self.inner().prediction_errors_total.inc();
    }

    pub fn inc_session_action(&self, action: &str) {
        self.inner()
            .session_actions_total
            .with_label_values(&[action])
            .inc();
    }

    pub fn set_artifacts(&self, artifacts: &Artifacts) {
        self.inner().artifacts_loaded.set(artifacts.loaded_count() as i64);
        self.inner().model_version_info.reset();
        if let Some(classifier) = artifacts.classifier() {
            self.inner()
                .model_version_info
                .with_label_values(&[classifier.model_version()])
                .set(1.0);
        }
    }
}

/// Structured logger for classifier events
///
/// Provides consistent JSON-formatted logging for startup, artifact
/// loading, predictions and session events.
#[derive(Clone)]
pub struct StructuredLogger {
    instance: String,
}

impl StructuredLogger {
    pub fn new(instance: impl Into<String>) -> Self {
        Self {
            instance: instance.into(),
        }
    }

    /// Log service startup
    pub fn log_startup(&self, version: &str, artifact_dir: &str) {
        info!(
            event = "startup",
            instance = %self.instance,
            version = %version,
            artifact_dir = %artifact_dir,
            "Pokedex classifier started"
        );
    }

    /// Log service shutdown
    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "shutdown",
            instance = %self.instance,
            reason = %reason,
            "Pokedex classifier shutting down"
        );
    }

    /// Log the outcome of artifact loading
    pub fn log_artifacts(&self, artifacts: &Artifacts) {
        if artifacts.is_complete() {
            info!(
                event = "artifacts_loaded",
                instance = %self.instance,
                model_version = artifacts.classifier().map(|c| c.model_version()).unwrap_or(""),
                feature_count = artifacts.expected_columns().len(),
                "All artifacts loaded"
            );
            return;
        }

        for err in artifacts.errors() {
            error!(
                event = "artifact_load_failed",
                instance = %self.instance,
                artifact = err.artifact(),
                error = %err,
                "Artifact unavailable, predictions are disabled"
            );
        }
    }

    /// Log a completed prediction
    pub fn log_prediction(&self, name: &str, label: &str, confidence: Option<f64>) {
        info!(
            event = "prediction_completed",
            instance = %self.instance,
            pokemon = %name,
            label = %label,
            confidence = ?confidence,
            "Predicted primary type"
        );
    }

    /// Log a prediction that could not run
    pub fn log_prediction_failed(&self, name: &str, message: &str) {
        warn!(
            event = "prediction_failed",
            instance = %self.instance,
            pokemon = %name,
            message = %message,
            "Prediction unavailable"
        );
    }

    /// Log a session reset
    pub fn log_session_reset(&self) {
        info!(
            event = "session_reset",
            instance = %self.instance,
            "Session restored to defaults"
        );
    }
}
