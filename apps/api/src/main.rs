mod config;
mod content;
mod db;
mod errors;
mod generation;
mod llm_client;
mod models;
mod pdf;
mod render;
mod resume;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::generation::generator::LlmContentGenerator;
use crate::generation::store::PgCvStore;
use crate::llm_client::LlmClient;
use crate::pdf::{HttpPdfExporter, PdfExporter};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    let store = Arc::new(PgCvStore::new(db));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.anthropic_api_key.clone(),
        config.anthropic_api_url.clone(),
    );
    info!(
        "LLM client initialized (model: {}, endpoint: {})",
        llm_client::MODEL,
        llm.api_url()
    );
    let generator = Arc::new(LlmContentGenerator::new(llm));

    // PDF export is optional
    let pdf: Option<Arc<dyn PdfExporter>> = match &config.pdf_service_url {
        Some(url) => {
            info!("PDF export enabled via {url}");
            Some(Arc::new(HttpPdfExporter::new(url.clone())))
        }
        None => {
            info!("PDF_SERVICE_URL not set; PDF export disabled");
            None
        }
    };

    let retry_policy = config.retry_policy();
    info!(
        "Content fetch policy: {} attempt(s), {:?} backoff",
        retry_policy.max_attempts, retry_policy.backoff
    );

    // Build app state
    let state = AppState {
        store,
        generator,
        pdf,
        retry_policy,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
