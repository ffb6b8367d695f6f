//! Axum route handlers for the CV API.
//!
//! Every handler owns a `CancellationToken` guarded by a drop guard: when the
//! client goes away Axum drops the handler future, the guard fires, and any
//! in-flight content fetch stops at its next await point.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::orchestrator::{GenerationOrchestrator, GenerationOutcome, GenerationStage};
use crate::generation::preview::PreviewService;
use crate::render::render_content;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub user_id: Uuid,
    pub profile: Value,
}

#[derive(Debug, Deserialize)]
pub struct CurrentCvQuery {
    pub user_id: Uuid,
    #[serde(default)]
    pub refresh: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct RefreshQuery {
    #[serde(default)]
    pub refresh: bool,
}

#[derive(Debug, Deserialize)]
pub struct RenderPreviewRequest {
    #[serde(default)]
    pub content: Option<Value>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cvs/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerationOutcome>, AppError> {
    if req.profile.is_null() {
        return Err(AppError::Validation("profile must not be null".to_string()));
    }

    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    let orchestrator = GenerationOrchestrator::new(
        state.store.as_ref(),
        state.generator.as_ref(),
        state.retry_policy,
    );
    match orchestrator.run(req.user_id, &req.profile, &cancel).await {
        Ok(outcome) => {
            info!(
                cv_id = %outcome.cv_id,
                stage = ?outcome.stage,
                "CV generated for user {} ({} fetch attempt(s))",
                req.user_id,
                outcome.attempts
            );
            Ok(Json(outcome))
        }
        Err(e) => {
            error!(
                stage = ?GenerationStage::Failed,
                failed_at = ?e.failed_at(),
                "CV generation failed for user {}: {e}",
                req.user_id
            );
            Err(e.into())
        }
    }
}

/// GET /api/v1/cvs/current?user_id=&refresh=
pub async fn handle_current_html(
    State(state): State<AppState>,
    Query(params): Query<CurrentCvQuery>,
) -> Result<Html<String>, AppError> {
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    let html = PreviewService::new(state.store.as_ref(), state.retry_policy)
        .preview_current(params.user_id, params.refresh, &cancel)
        .await?;
    Ok(Html(html))
}

/// GET /api/v1/cvs/:id/html?refresh=
pub async fn handle_cv_html(
    State(state): State<AppState>,
    Path(cv_id): Path<Uuid>,
    Query(params): Query<RefreshQuery>,
) -> Result<Html<String>, AppError> {
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    let html = PreviewService::new(state.store.as_ref(), state.retry_policy)
        .preview(cv_id, params.refresh, &cancel)
        .await?;
    Ok(Html(html))
}

/// POST /api/v1/cvs/:id/render
/// Re-renders from stored content, ignoring and then replacing the cache.
pub async fn handle_rerender(
    State(state): State<AppState>,
    Path(cv_id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    let html = PreviewService::new(state.store.as_ref(), state.retry_policy)
        .preview(cv_id, true, &cancel)
        .await?;
    info!(cv_id = %cv_id, "CV re-rendered on request");
    Ok(Html(html))
}

/// GET /api/v1/cvs/:id/pdf
pub async fn handle_cv_pdf(
    State(state): State<AppState>,
    Path(cv_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let exporter = state.pdf.clone().ok_or(AppError::PdfNotConfigured)?;

    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    let html = PreviewService::new(state.store.as_ref(), state.retry_policy)
        .preview(cv_id, false, &cancel)
        .await?;
    let pdf = exporter.export(&html).await?;

    let disposition = format!("attachment; filename=\"cv-{cv_id}.pdf\"");
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf,
    )
        .into_response())
}

/// POST /api/v1/render/preview
/// Renders arbitrary submitted content without touching storage.
pub async fn handle_render_preview(
    Json(req): Json<RenderPreviewRequest>,
) -> Result<Html<String>, AppError> {
    let html = render_content(req.content.as_ref())?;
    Ok(Html(html))
}
