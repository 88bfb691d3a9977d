//! Admin HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use tower_http::trace::TraceLayer;

use crate::{infrastructure::dto::http::ConnectionListDto, ui::state::AppState};

/// Router of the admin HTTP API
pub fn admin_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/connections", get(list_connections))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// List of open connections (for diagnostics)
pub async fn list_connections(State(state): State<Arc<AppState>>) -> Json<ConnectionListDto> {
    let entries = state.chat_room.registry().snapshot().await;
    Json(ConnectionListDto::from(entries))
}
