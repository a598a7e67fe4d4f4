//! HTTP API: the form page, action endpoints, JSON API, health and metrics

use crate::error::{ApiError, ApiResult};
use crate::render::{PageContext, PageRenderer};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use classifier_lib::{
    health::{ComponentStatus, HealthRegistry},
    observability::{ClassifierMetrics, StructuredLogger},
    session::{reduce_all, Action, SessionState},
    vocab::{COLOR_OPTIONS, TYPE_COLORS, UNKNOWN_COLOR},
    TypePredictor, UNKNOWN_LABEL,
};
use prometheus::{Encoder, TextEncoder};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Background image loaded once at startup
#[derive(Debug, Clone)]
pub struct Background {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

impl Background {
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let content_type = match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            _ => "image/png",
        };
        Ok(Self {
            bytes,
            content_type,
        })
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub health_registry: HealthRegistry,
    pub metrics: ClassifierMetrics,
    pub logger: StructuredLogger,
    pub predictor: TypePredictor,
    pub session: Arc<RwLock<SessionState>>,
    pub renderer: Arc<PageRenderer>,
    pub background: Option<Arc<Background>>,
    pub warnings: Vec<String>,
    pub title: String,
}

impl AppState {
    pub fn new(
        health_registry: HealthRegistry,
        metrics: ClassifierMetrics,
        logger: StructuredLogger,
        predictor: TypePredictor,
        renderer: PageRenderer,
        title: impl Into<String>,
    ) -> Self {
        Self {
            health_registry,
            metrics,
            logger,
            predictor,
            session: Arc::new(RwLock::new(SessionState::default())),
            renderer: Arc::new(renderer),
            background: None,
            warnings: Vec::new(),
            title: title.into(),
        }
    }

    pub fn with_background(mut self, background: Option<Background>) -> Self {
        self.background = background.map(Arc::new);
        self
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Apply actions to the session under the write lock
    pub async fn apply(&self, actions: Vec<Action>) -> SessionState {
        let mut session = self.session.write().await;

        for action in &actions {
            self.metrics.inc_session_action(action.name());
        }
        let predicts = actions.iter().any(|a| matches!(a, Action::Predict));
        let resets = actions.iter().any(|a| matches!(a, Action::Reset));

        // the stored state is only replaced once the reducer has returned
        let next = reduce_all(session.clone(), actions, &self.predictor);

        if predicts {
            if let Some(result) = &next.prediction_result {
                if result.is_error() {
                    self.logger
                        .log_prediction_failed(&next.input.name, &result.message);
                } else {
                    self.logger
                        .log_prediction(&next.input.name, &result.label, result.confidence);
                }
            }
        }
        if resets {
            self.logger.log_session_reset();
        }

        *session = next.clone();
        next
    }
}

/// Form submitted by the data-entry panel. Absent or empty fields are left
/// unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct InputForm {
    pub name: Option<String>,
    pub hp: Option<String>,
    pub atk: Option<String>,
    pub def: Option<String>,
    pub spa: Option<String>,
    pub spd: Option<String>,
    pub speed: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub ability: Option<String>,
    pub color: Option<String>,
    pub generation: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn not_a_number(field: &str, value: &str) -> ApiError {
    ApiError::BadRequest(format!("{} must be a number, got {:?}", field, value))
}

/// Finite number in `value`; NaN and infinities are rejected
fn parse_finite(field: &str, value: &str) -> ApiResult<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| not_a_number(field, value))
}

fn parse_int(field: &str, value: &Option<String>) -> ApiResult<Option<i64>> {
    present(value)
        .map(|v| match v.parse::<i64>() {
            Ok(n) => Ok(n),
            Err(_) => parse_finite(field, v).map(|f| f.round() as i64),
        })
        .transpose()
}

fn parse_float(field: &str, value: &Option<String>) -> ApiResult<Option<f64>> {
    present(value).map(|v| parse_finite(field, v)).transpose()
}

impl InputForm {
    /// Setter actions for every present field
    pub fn into_actions(self) -> ApiResult<Vec<Action>> {
        let mut actions = Vec::new();

        // names may legitimately be blank, so only absence skips them
        if let Some(name) = &self.name {
            actions.push(Action::SetName(name.trim().to_string()));
        }

        let stats: [(&str, &Option<String>, fn(i64) -> Action); 7] = [
            ("hp", &self.hp, Action::SetHp),
            ("atk", &self.atk, Action::SetAtk),
            ("def", &self.def, Action::SetDef),
            ("spa", &self.spa, Action::SetSpa),
            ("spd", &self.spd, Action::SetSpd),
            ("speed", &self.speed, Action::SetSpeed),
            ("generation", &self.generation, Action::SetGeneration),
        ];
        for (field, value, make) in stats {
            if let Some(v) = parse_int(field, value)? {
                actions.push(make(v));
            }
        }

        if let Some(v) = parse_float("height", &self.height)? {
            actions.push(Action::SetHeight(v));
        }
        if let Some(v) = parse_float("weight", &self.weight)? {
            actions.push(Action::SetWeight(v));
        }
        if let Some(ability) = present(&self.ability) {
            actions.push(Action::SetAbility(ability.to_string()));
        }
        if let Some(color) = present(&self.color) {
            actions.push(Action::SetColor(color.to_string()));
        }

        Ok(actions)
    }
}

/// Schema and vocabularies exposed to API clients
#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    pub expected_columns: Vec<String>,
    pub ability_options: Vec<String>,
    pub color_options: Vec<String>,
    pub type_colors: Vec<TypeColor>,
    pub artifacts_complete: bool,
}

#[derive(Debug, Serialize)]
pub struct TypeColor {
    pub label: String,
    pub color: String,
}

fn load_error_messages(state: &AppState) -> Vec<String> {
    state
        .predictor
        .artifacts()
        .errors()
        .iter()
        .map(|e| format!("Error loading model files: {}", e))
        .collect()
}

/// The form page
async fn index(State(state): State<Arc<AppState>>) -> ApiResult<Html<String>> {
    let session = state.session.read().await.clone();
    let ability_options = state.predictor.artifacts().ability_options();
    let load_errors = load_error_messages(&state);

    let page = PageContext {
        title: &state.title,
        ability_options: &ability_options,
        load_errors: &load_errors,
        warnings: &state.warnings,
        has_background: state.background.is_some(),
    };
    let html = state.renderer.render(&session, &page)?;
    Ok(Html(html))
}

async fn predict(State(state): State<Arc<AppState>>) -> Redirect {
    state.apply(vec![Action::Predict]).await;
    Redirect::to("/")
}

async fn open_modal(State(state): State<Arc<AppState>>) -> Redirect {
    state.apply(vec![Action::OpenModal]).await;
    Redirect::to("/")
}

async fn close_modal(State(state): State<Arc<AppState>>) -> Redirect {
    state.apply(vec![Action::CloseModal]).await;
    Redirect::to("/")
}

async fn reset(State(state): State<Arc<AppState>>) -> Redirect {
    state.apply(vec![Action::Reset]).await;
    Redirect::to("/")
}

/// Data-entry submit: apply every field, then close the panel
async fn submit_input(
    State(state): State<Arc<AppState>>,
    Form(form): Form<InputForm>,
) -> ApiResult<Redirect> {
    let mut actions = form.into_actions()?;
    debug!(fields = actions.len(), "Applying submitted form");
    actions.push(Action::CloseModal);
    state.apply(actions).await;
    Ok(Redirect::to("/"))
}

async fn get_state(State(state): State<Arc<AppState>>) -> Json<SessionState> {
    Json(state.session.read().await.clone())
}

async fn post_action(
    State(state): State<Arc<AppState>>,
    Json(action): Json<Action>,
) -> Json<SessionState> {
    Json(state.apply(vec![action]).await)
}

async fn schema(State(state): State<Arc<AppState>>) -> Json<SchemaResponse> {
    let artifacts = state.predictor.artifacts();
    let mut type_colors: Vec<TypeColor> = TYPE_COLORS
        .iter()
        .map(|(label, color)| TypeColor {
            label: label.to_string(),
            color: color.to_string(),
        })
        .collect();
    type_colors.push(TypeColor {
        label: UNKNOWN_LABEL.to_string(),
        color: UNKNOWN_COLOR.to_string(),
    });

    Json(SchemaResponse {
        expected_columns: artifacts.expected_columns().to_vec(),
        ability_options: artifacts.ability_options(),
        color_options: COLOR_OPTIONS.iter().map(|c| c.to_string()).collect(),
        type_colors,
        artifacts_complete: artifacts.is_complete(),
    })
}

async fn background(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    let background = state
        .background
        .as_ref()
        .ok_or_else(|| ApiError::NotFound("no background image configured".to_string()))?;
    Ok((
        [(header::CONTENT_TYPE, background.content_type)],
        background.bytes.clone(),
    )
        .into_response())
}

/// Health check response - returns 200 if healthy, 503 if unhealthy
async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_registry.health().await;

    let status_code = match health.status {
        ComponentStatus::Healthy => StatusCode::OK,
        ComponentStatus::Degraded => StatusCode::OK, // Still operational
        ComponentStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

/// Readiness check response - returns 200 if ready, 503 if not ready
async fn readyz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let readiness = state.health_registry.readiness().await;

    let status_code = if readiness.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(readiness))
}

/// Prometheus metrics endpoint
async fn metrics() -> ApiResult<impl IntoResponse> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(anyhow::Error::from)?;

    Ok((
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    ))
}

/// Record component health from what was loaded at startup
pub async fn record_startup_health(state: &AppState) {
    state
        .health_registry
        .record_startup(state.predictor.artifacts(), state.background.is_some())
        .await;
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/actions/predict", post(predict))
        .route("/actions/open", post(open_modal))
        .route("/actions/close", post(close_modal))
        .route("/actions/reset", post(reset))
        .route("/actions/input", post(submit_input))
        .route("/api/state", get(get_state))
        .route("/api/actions", post(post_action))
        .route("/api/schema", get(schema))
        .route("/background", get(background))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .with_state(state)
}

/// Start the API server
pub async fn serve(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await.map_err(|e| {
        warn!(error = %e, "API server stopped");
        e
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_fields_become_setters() {
        let form = InputForm {
            hp: Some("80".to_string()),
            atk: Some("49.6".to_string()),
            height: Some(" 1.5 ".to_string()),
            color: Some("".to_string()),
            ..InputForm::default()
        };
        let actions = form.into_actions().unwrap();
        assert_eq!(
            actions,
            vec![Action::SetHp(80), Action::SetAtk(50), Action::SetHeight(1.5)]
        );
    }

    #[test]
    fn test_non_finite_numbers_rejected() {
        let cases = [
            ("NaN", None),
            ("inf", None),
            ("80", Some("inf")),
            ("80", Some("NaN")),
        ];
        for (hp, height) in cases {
            let form = InputForm {
                hp: Some(hp.to_string()),
                height: height.map(str::to_string),
                ..InputForm::default()
            };
            assert!(
                matches!(form.into_actions(), Err(ApiError::BadRequest(_))),
                "hp={} height={:?} should be rejected",
                hp,
                height
            );
        }
    }
}
