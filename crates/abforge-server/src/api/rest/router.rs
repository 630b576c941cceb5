//! Router creation and configuration
//!
//! Creates the Axum router for all REST endpoints.

use super::handlers::*;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create REST API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // Generation pipeline
        .route("/generate", post(generate))
        .route("/generate/project/:project_id", get(list_project_records))
        .route("/generate/:id", get(get_record))
        .route("/generate/:id/regenerate", post(regenerate))
        .route("/generate/:id/download", get(download))
        // Field binding CRUD
        .route("/bindings", get(list_bindings).post(create_binding))
        .route("/bindings/templates", get(binding_templates))
        .route("/bindings/validate", post(validate_binding))
        .route(
            "/bindings/:id",
            get(get_binding).put(update_binding).delete(delete_binding),
        )
        .route("/bindings/:id/clone", post(clone_binding))
        // Knowledge base
        .route("/knowledge", get(list_knowledge).post(upload_knowledge))
        .route("/knowledge/:id/content", get(knowledge_content))
        .route("/knowledge/:id", delete(delete_knowledge))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
