pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // CV API
        .route("/api/v1/cvs/generate", post(handlers::handle_generate))
        .route("/api/v1/cvs/current", get(handlers::handle_current_html))
        .route("/api/v1/cvs/:id/html", get(handlers::handle_cv_html))
        .route("/api/v1/cvs/:id/render", post(handlers::handle_rerender))
        .route("/api/v1/cvs/:id/pdf", get(handlers::handle_cv_pdf))
        // Stateless rendering
        .route(
            "/api/v1/render/preview",
            post(handlers::handle_render_preview),
        )
        .with_state(state)
}
