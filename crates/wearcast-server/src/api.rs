//! HTTP surface of the relay: suggest, heartbeat, and static assets.

use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    extract::State,
    http::{header, HeaderName, Method},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use wearcast_core::{RelayConfig, WeatherSnapshot};

use crate::error::RelayError;
use crate::middleware::{request_id, RequestId};
use crate::prompt;
use crate::upstream::GenerationClient;

/// Immutable per-process state shared by all requests.
#[derive(Clone)]
pub struct RelayState {
    pub config: Arc<RelayConfig>,
    pub upstream: GenerationClient,
}

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    pub weather: Option<WeatherSnapshot>,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub suggestion: String,
}

#[derive(Debug, Serialize)]
struct HeartbeatData {
    status: &'static str,
    timestamp: DateTime<Utc>,
}

/// Assemble the relay router: API routes first, every other path falls
/// through to the static asset directory.
pub fn build_app(state: RelayState) -> Router {
    let static_dir = state.config.static_dir.clone();

    Router::new()
        .route("/api/suggest", post(suggest))
        .route("/api/heartbeat", get(heartbeat))
        .with_state(state)
        .fallback_service(ServeDir::new(static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

/// `POST /api/suggest` — build the prompt from the caller's snapshot, ask
/// the generation provider, and hand back plain text.
async fn suggest(
    State(state): State<RelayState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<SuggestRequest>, JsonRejection>,
) -> Result<Json<SuggestResponse>, RelayError> {
    let Json(request) = payload.map_err(|rejection| RelayError::BadRequest(rejection.body_text()))?;
    let weather = request
        .weather
        .ok_or_else(|| RelayError::BadRequest("Missing weather payload.".to_owned()))?;

    let api_key = state
        .config
        .api_key
        .as_deref()
        .ok_or(RelayError::Configuration)?;

    tracing::info!(request_id = %req_id.0, location = %weather.location, "suggestion requested");

    let input = prompt::build_prompt(&weather);
    let suggestion = state
        .upstream
        .generate(api_key, prompt::SYSTEM_INSTRUCTION, &input)
        .await?;

    // The relay treats an empty extraction as a hard failure; only the
    // client is allowed to consider empty benign.
    if suggestion.is_empty() {
        return Err(RelayError::EmptyResult);
    }

    Ok(Json(SuggestResponse { suggestion }))
}

/// `GET /api/heartbeat` — liveness only, no side effects.
async fn heartbeat() -> impl IntoResponse {
    Json(HeartbeatData {
        status: "ok",
        timestamp: Utc::now(),
    })
}
