//! Router assembly and shared request state.

use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use chatrelay_core::config::{Config, GenerationDefaults};
use chatrelay_core::error::ProviderError;
use chatrelay_providers::{create_provider, ChatProvider};

use crate::handlers;

/// State shared between request handlers.
///
/// The provider is constructed exactly once at startup and never mutated;
/// handlers receive it via axum's state extraction rather than a global.
#[derive(Clone)]
pub struct AppState {
    /// The process-wide provider instance.
    pub provider: Arc<dyn ChatProvider>,
    /// Directory holding the static root page.
    pub static_dir: PathBuf,
    /// Defaults applied when a request omits generation parameters.
    pub defaults: GenerationDefaults,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("provider", &self.provider.tag())
            .field("static_dir", &self.static_dir)
            .field("defaults", &self.defaults)
            .finish()
    }
}

/// Construct the shared state from a resolved config.
///
/// Fails when the provider cannot be built — callers must run this *before*
/// binding the listener so a missing credential never accepts a connection.
pub fn build_state(config: &Config) -> Result<AppState, ProviderError> {
    let provider = create_provider(&config.provider)?;

    Ok(AppState {
        provider,
        static_dir: PathBuf::from(&config.server.static_dir),
        defaults: config.generation.clone(),
    })
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/chat", post(handlers::chat))
        .route("/health", get(handlers::health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
