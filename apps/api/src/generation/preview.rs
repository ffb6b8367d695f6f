//! Preview of stored CVs: cached HTML when available, otherwise fetch (with
//! the shared retry policy), render, and refresh the cache.

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uuid::Uuid;

use crate::generation::retry::{fetch_content_with_retry, FetchError, RetryPolicy};
use crate::generation::store::{CvStore, StoreError};
use crate::render::{render_content, ContentError};

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("No CV found for user {0}")]
    NoRecord(Uuid),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct PreviewService<'a> {
    store: &'a dyn CvStore,
    policy: RetryPolicy,
}

impl<'a> PreviewService<'a> {
    pub fn new(store: &'a dyn CvStore, policy: RetryPolicy) -> Self {
        Self { store, policy }
    }

    /// HTML for a CV. `refresh` bypasses the cached rendering.
    pub async fn preview(
        &self,
        cv_id: Uuid,
        refresh: bool,
        cancel: &CancellationToken,
    ) -> Result<String, PreviewError> {
        if !refresh {
            match self.store.get_rendered_html(cv_id).await {
                Ok(Some(html)) if !html.trim().is_empty() => return Ok(html),
                Ok(_) => {}
                Err(e) => warn!(cv_id = %cv_id, "Rendered HTML cache read failed: {e}"),
            }
        }

        let fetched = match fetch_content_with_retry(self.store, cv_id, self.policy, cancel).await {
            Ok(fetched) => fetched,
            // The record exists but never received content.
            Err(FetchError::Exhausted {
                last: StoreError::NotFound(_),
                ..
            }) => return Err(ContentError::NoContent.into()),
            Err(e) => return Err(e.into()),
        };

        let html = render_content(Some(&fetched.content))?;
        info!(cv_id = %cv_id, "Rendered preview after {} fetch attempt(s)", fetched.attempts);

        if let Err(e) = self.store.put_rendered_html(cv_id, &html).await {
            warn!(cv_id = %cv_id, "Failed to cache rendered HTML: {e}");
        }
        Ok(html)
    }

    /// HTML for the user's most recent CV.
    pub async fn preview_current(
        &self,
        user_id: Uuid,
        refresh: bool,
        cancel: &CancellationToken,
    ) -> Result<String, PreviewError> {
        let cv_id = self
            .store
            .latest_record_for_user(user_id)
            .await?
            .ok_or(PreviewError::NoRecord(user_id))?;
        self.preview(cv_id, refresh, cancel).await
    }
}
