//! Request handlers for the three routes.

use axum::extract::State;
use axum::response::Html;
use axum::Json;
use tracing::debug;

use chatrelay_providers::GenerationParams;

use crate::error::ApiError;
use crate::routes::AppState;
use crate::types::{ChatRequest, ChatResponse, HealthResponse};

/// `GET /` — the static root page, served as-is.
///
/// A missing file is a deployment failure, not a routing miss, so it
/// surfaces as 500 rather than 404.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let path = state.static_dir.join("index.html");
    let html = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| ApiError::StaticAsset(path.display().to_string(), e))?;

    Ok(Html(html))
}

/// `POST /chat` — relay one message to the provider and return its reply.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let params = GenerationParams {
        temperature: req.temperature.unwrap_or(state.defaults.temperature),
        max_tokens: req.max_tokens.or(state.defaults.max_tokens),
    };

    debug!(
        provider = state.provider.tag(),
        temperature = params.temperature,
        "relaying chat message"
    );

    let response = state.provider.generate(&req.message, &params).await?;

    Ok(Json(ChatResponse { response }))
}

/// `GET /health` — fixed liveness payload naming the active provider tag.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        ai_provider: state.provider.tag().to_string(),
    })
}
