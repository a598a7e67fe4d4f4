//! Liveness and readiness of the classifier service
//!
//! Component health is derived from what was available at startup: the
//! artifacts, the background image and the session store. The service stays
//! ready with missing artifacts so the page can report the problem.

use crate::artifacts::Artifacts;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Health status of a component, ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Healthy,
    /// Cosmetic loss only, predictions still work
    Degraded,
    /// Predictions return an error result
    Unhealthy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub status: ComponentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub last_check_timestamp: i64,
}

impl ComponentHealth {
    fn new(status: ComponentStatus, message: Option<String>) -> Self {
        Self {
            status,
            message,
            last_check_timestamp: chrono::Utc::now().timestamp(),
        }
    }

    /// Unhealthy unless all three artifacts loaded; the message lists the load errors
    pub fn of_artifacts(artifacts: &Artifacts) -> Self {
        if artifacts.is_complete() {
            return Self::new(ComponentStatus::Healthy, None);
        }
        let reasons: Vec<String> = artifacts.errors().iter().map(|e| e.to_string()).collect();
        let message = if reasons.is_empty() {
            format!("{} of 3 artifacts loaded", artifacts.loaded_count())
        } else {
            reasons.join("; ")
        };
        Self::new(ComponentStatus::Unhealthy, Some(message))
    }

    /// A missing background only degrades the page
    pub fn of_background(present: bool) -> Self {
        if present {
            Self::new(ComponentStatus::Healthy, None)
        } else {
            Self::new(
                ComponentStatus::Degraded,
                Some("background image not found".to_string()),
            )
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: ComponentStatus,
    pub components: BTreeMap<String, ComponentHealth>,
}

impl HealthResponse {
    /// Overall status is the worst component status
    pub fn from_components(components: BTreeMap<String, ComponentHealth>) -> Self {
        let status = components
            .values()
            .map(|c| c.status)
            .max()
            .unwrap_or(ComponentStatus::Healthy);
        Self { status, components }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Component names for health tracking
pub mod components {
    pub const ARTIFACTS: &str = "artifacts";
    pub const BACKGROUND: &str = "background";
    pub const SESSION: &str = "session";
}

#[derive(Debug, Clone, Default)]
pub struct HealthRegistry {
    components: Arc<RwLock<BTreeMap<String, ComponentHealth>>>,
    ready: Arc<RwLock<bool>>,
}

impl HealthRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the state of every component as loaded at startup
    pub async fn record_startup(&self, artifacts: &Artifacts, has_background: bool) {
        let mut map = self.components.write().await;
        map.insert(
            components::ARTIFACTS.to_string(),
            ComponentHealth::of_artifacts(artifacts),
        );
        map.insert(
            components::BACKGROUND.to_string(),
            ComponentHealth::of_background(has_background),
        );
        map.insert(
            components::SESSION.to_string(),
            ComponentHealth::new(ComponentStatus::Healthy, None),
        );
    }

    pub async fn set_ready(&self, ready: bool) {
        *self.ready.write().await = ready;
    }

    pub async fn health(&self) -> HealthResponse {
        HealthResponse::from_components(self.components.read().await.clone())
    }

    pub async fn readiness(&self) -> ReadinessResponse {
        if !*self.ready.read().await {
            return ReadinessResponse {
                ready: false,
                reason: Some("Service not yet initialized".to_string()),
            };
        }
        let reason = (self.health().await.status == ComponentStatus::Unhealthy)
            .then(|| "Running in degraded mode".to_string());
        ReadinessResponse {
            ready: true,
            reason,
        }
    }
}
