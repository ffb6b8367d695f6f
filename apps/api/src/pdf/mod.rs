//! PDF export adapter. Conversion itself is delegated to an external
//! HTML-to-PDF service; this module only ships the finished HTML there.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("PDF service error (status {status}): {message}")]
    Service { status: u16, message: String },

    #[error("PDF service returned an empty document")]
    Empty,
}

#[async_trait]
pub trait PdfExporter: Send + Sync {
    async fn export(&self, html: &str) -> Result<Bytes, PdfError>;
}

/// POSTs the HTML as `text/html` and returns the response body.
pub struct HttpPdfExporter {
    client: Client,
    endpoint: String,
}

impl HttpPdfExporter {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint,
        }
    }
}

#[async_trait]
impl PdfExporter for HttpPdfExporter {
    async fn export(&self, html: &str) -> Result<Bytes, PdfError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("content-type", "text/html; charset=utf-8")
            .header("accept", "application/pdf")
            .body(html.to_string())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PdfError::Service {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(PdfError::Empty);
        }
        debug!("PDF service returned {} bytes", bytes.len());
        Ok(bytes)
    }
}
