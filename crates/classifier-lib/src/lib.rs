//! Core library for the Pokémon primary-type classifier
//!
//! This crate provides:
//! - Loading of the pre-trained classifier, scaler and ability encoder
//! - Feature row assembly aligned with the classifier's schema
//! - Type prediction that degrades to "Unknown" instead of failing
//! - The form session state and its reducer
//! - Health checks and observability

pub mod artifacts;
pub mod error;
pub mod health;
pub mod models;
pub mod observability;
pub mod predictor;
pub mod session;
pub mod vocab;

pub use artifacts::{ArtifactStore, Artifacts};
pub use error::{ArtifactError, InferenceError};
pub use health::{
    ComponentHealth, ComponentStatus, HealthRegistry, HealthResponse, ReadinessResponse,
};
pub use models::*;
pub use observability::{ClassifierMetrics, StructuredLogger};
pub use predictor::{FeatureBuilder, TypeClassifier, TypePredictor};
pub use session::{reduce, Action, SessionState};
