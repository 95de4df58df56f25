use axum::{
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::Config,
    error::AppResult,
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{
        catalog::SpotifyProvider, interpreter::BracketSliceInterpreter, llm::GroqClient,
        recommendations::RecommendationService,
    },
};

pub mod recommendations;

/// Shared application state
pub struct AppState {
    pub recommender: RecommendationService,
}

impl AppState {
    pub fn new(recommender: RecommendationService) -> Self {
        Self { recommender }
    }

    /// Wires the production collaborators from configuration
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let llm = GroqClient::from_config(config)?;
        let catalog = SpotifyProvider::from_config(config)?;

        Ok(Self::new(RecommendationService::new(
            Arc::new(llm),
            Arc::new(catalog),
            Arc::new(BracketSliceInterpreter),
        )))
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
}

/// API routes under /api
fn api_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/recommend",
        get(health_check).post(recommendations::recommend),
    )
}

/// Liveness check
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "API is running" })))
}
