// Axum API Server Module
//
// Purpose: REST endpoints that split, select and render explanation text
// returned by the prediction and chat backends. Rendered results are cached
// by request text, bounded by total bytes.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};

use moka::future::Cache;
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::RenderConfig;
use crate::explanation::{
    sections_from_value, ExplanationRenderer, ExplanationSelector, HtmlFormatter, TextFormatter,
};
use crate::response::{ChatReply, ChatResponse, PredictionReport, PredictionResponse, ResponseError};

// ============================================================================
// Configuration
// ============================================================================

/// Server settings read from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// JSON render config; defaults are used when unset
    pub render_config_path: Option<PathBuf>,
    /// Upper bound on cached key + response bytes
    pub cache_max_bytes: u64,
    pub cache_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            render_config_path: None,
            cache_max_bytes: 64 * 1024 * 1024,
            cache_ttl: Duration::from_secs(300),
        }
    }
}

impl ServerConfig {
    /// Reads `PORT`, `EXPLAIN_CONFIG`, `CACHE_MAX_BYTES` and `CACHE_TTL_SECS`
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = env_parse("PORT").unwrap_or(defaults.port);
        let render_config_path = std::env::var("EXPLAIN_CONFIG")
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        let cache_max_bytes = env_parse("CACHE_MAX_BYTES").unwrap_or(defaults.cache_max_bytes);
        let cache_ttl = env_parse("CACHE_TTL_SECS")
            .map(Duration::from_secs)
            .unwrap_or(defaults.cache_ttl);

        Self {
            port,
            render_config_path,
            cache_max_bytes,
            cache_ttl,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub render_config: Arc<RenderConfig>,
    pub cache: Cache<String, Value>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> anyhow::Result<Self> {
        let render_config = match &config.render_config_path {
            Some(path) => {
                tracing::info!("Loading render config from {:?}", path);
                RenderConfig::load(path)?
            }
            None => RenderConfig::default(),
        };

        Ok(Self::with_render_config(render_config, config))
    }

    pub fn with_render_config(render_config: RenderConfig, config: &ServerConfig) -> Self {
        tracing::info!("Initializing Moka cache...");
        let cache = Cache::builder()
            .weigher(entry_weight)
            .max_capacity(config.cache_max_bytes)
            .time_to_live(config.cache_ttl)
            .build();

        Self {
            render_config: Arc::new(render_config),
            cache,
        }
    }
}

/// Cache weight in bytes: key plus serialized response
fn entry_weight(key: &String, value: &Value) -> u32 {
    let bytes = key.len() + value.to_string().len();
    u32::try_from(bytes).unwrap_or(u32::MAX)
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Explanation text endpoints
        .route("/api/explanations/sections", post(split_explanation))
        .route("/api/explanations/render", post(render_text))

        // Raw backend payload endpoints
        .route("/api/predictions/explain", post(explain_prediction))
        .route("/api/chat/render", post(render_chat))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// `text` may be absent or any JSON type; only strings produce output
#[derive(Debug, Deserialize)]
struct TextRequest {
    #[serde(default)]
    text: Value,
}

#[derive(Debug, Deserialize)]
struct FormatQuery {
    format: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Html,
    Text,
}

impl OutputFormat {
    fn parse(format: Option<&str>) -> Result<Self, AppError> {
        match format.map(|f| f.to_ascii_lowercase()).as_deref() {
            None | Some("json") => Ok(Self::Json),
            Some("html") => Ok(Self::Html),
            Some("text") => Ok(Self::Text),
            Some(other) => Err(AppError::BadRequest(format!("Unknown format: {}", other))),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Html => "html",
            Self::Text => "text",
        }
    }
}

async fn split_explanation(
    State(state): State<AppState>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(payload) = payload?;
    let text = payload.text.as_str().unwrap_or_default();
    let cache_key = format!("sections:{}", text);

    if let Some(cached) = state.cache.get(&cache_key).await {
        return Ok(Json(cached));
    }

    let sections = sections_from_value(&payload.text);
    tracing::info!("Split explanation into {} sections", sections.len());

    let response = serde_json::json!({ "sections": sections });
    state.cache.insert(cache_key, response.clone()).await;
    Ok(Json(response))
}

async fn render_text(
    State(state): State<AppState>,
    Query(query): Query<FormatQuery>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let format = OutputFormat::parse(query.format.as_deref())?;
    let Json(payload) = payload?;
    let text = payload.text.as_str().unwrap_or_default();
    let cache_key = format!("render:{}:{}", format.name(), text);

    if let Some(cached) = state.cache.get(&cache_key).await {
        return Ok(Json(cached));
    }

    let renderer = ExplanationRenderer::new(&state.render_config);
    let segments = renderer.render(payload.text.as_str());

    let mut response = serde_json::json!({ "segments": segments });
    match format {
        OutputFormat::Json => {}
        OutputFormat::Html => response["formatted"] = Value::String(HtmlFormatter::format(&segments)),
        OutputFormat::Text => response["formatted"] = Value::String(TextFormatter::format(&segments)),
    }

    state.cache.insert(cache_key, response.clone()).await;
    Ok(Json(response))
}

async fn explain_prediction(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictionReport>, AppError> {
    let Json(payload) = payload?;
    let response = PredictionResponse::from_value(&payload)?;
    let selector = ExplanationSelector::new(&state.render_config);
    let report = PredictionReport::build(&response, &selector);

    tracing::info!(
        "Explained prediction {:?} ({} sections, missing: {:?})",
        report.disease,
        report.explanation.sections.len(),
        report.missing_fields
    );

    Ok(Json(report))
}

async fn render_chat(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let Json(payload) = payload?;
    let response = ChatResponse::from_value(&payload)?;
    let renderer = ExplanationRenderer::new(&state.render_config);
    Ok(Json(ChatReply::build(&response, &renderer)))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    /// Body could not be extracted (malformed JSON, wrong content type)
    Rejected(StatusCode, String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<ResponseError> for AppError {
    fn from(e: ResponseError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Rejected(status, msg) => (status, msg),
        };

        tracing::warn!("Request failed ({}): {}", status, message);

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
