use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::orchestrator::GenerationError;
use crate::generation::preview::PreviewError;
use crate::generation::retry::FetchError;
use crate::generation::store::StoreError;
use crate::pdf::PdfError;
use crate::render::ContentError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Each variant maps to exactly one user-facing message; the underlying
/// detail is logged and never sent to the client.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No resume content")]
    NoResumeContent,

    #[error("Generation endpoint unavailable")]
    GenerationEndpointUnavailable,

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("Content unavailable: {0}")]
    ContentUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("PDF export error: {0}")]
    Pdf(String),

    #[error("PDF export not configured")]
    PdfNotConfigured,

    #[error("Request cancelled")]
    Cancelled,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::NoResumeContent => (
                StatusCode::NOT_FOUND,
                "NO_RESUME_CONTENT",
                "No resume content is available for this CV yet.".to_string(),
            ),
            AppError::GenerationEndpointUnavailable => {
                tracing::error!("Generation endpoint returned 404");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_ENDPOINT_UNAVAILABLE",
                    "The resume generation endpoint was not found. Check the API configuration."
                        .to_string(),
                )
            }
            AppError::GenerationFailed(msg) => {
                tracing::error!("Generation error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_FAILED",
                    "Resume generation failed. Please try again later.".to_string(),
                )
            }
            AppError::ContentUnavailable(msg) => {
                tracing::error!("Content fetch error: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "CONTENT_UNAVAILABLE",
                    "Resume content could not be loaded. Please try again later.".to_string(),
                )
            }
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Pdf(msg) => {
                tracing::error!("PDF export error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "PDF_EXPORT_FAILED",
                    "The PDF could not be generated. Please try again later.".to_string(),
                )
            }
            AppError::PdfNotConfigured => (
                StatusCode::SERVICE_UNAVAILABLE,
                "PDF_EXPORT_DISABLED",
                "PDF export is not configured on this server.".to_string(),
            ),
            AppError::Cancelled => (
                StatusCode::SERVICE_UNAVAILABLE,
                "REQUEST_CANCELLED",
                "The request was cancelled.".to_string(),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Storage(e.to_string())
    }
}

impl From<ContentError> for AppError {
    fn from(e: ContentError) -> Self {
        match e {
            ContentError::NoContent => AppError::NoResumeContent,
        }
    }
}

impl From<FetchError> for AppError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Cancelled { .. } => AppError::Cancelled,
            other => AppError::ContentUnavailable(other.to_string()),
        }
    }
}

impl From<GenerationError> for AppError {
    fn from(e: GenerationError) -> Self {
        match e {
            GenerationError::RecordCreation(source) => source.into(),
            GenerationError::EndpointUnavailable { .. } => AppError::GenerationEndpointUnavailable,
            GenerationError::TransientFailure { message, .. } => AppError::GenerationFailed(message),
            other @ (GenerationError::FetchExhausted { .. }
            | GenerationError::FetchFailed { .. }) => AppError::ContentUnavailable(other.to_string()),
            GenerationError::NoContent { .. } => AppError::NoResumeContent,
            GenerationError::Cancelled { .. } => AppError::Cancelled,
        }
    }
}

impl From<PreviewError> for AppError {
    fn from(e: PreviewError) -> Self {
        match e {
            PreviewError::NoRecord(user_id) => {
                AppError::NotFound(format!("No CV found for user {user_id}"))
            }
            PreviewError::Content(e) => e.into(),
            PreviewError::Fetch(e) => e.into(),
            PreviewError::Store(e) => e.into(),
        }
    }
}

impl From<PdfError> for AppError {
    fn from(e: PdfError) -> Self {
        AppError::Pdf(e.to_string())
    }
}
