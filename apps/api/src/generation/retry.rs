//! Content fetch with a bounded, fixed-backoff retry.
//!
//! One policy is shared by every path that reads CV content back from the
//! store (generation, preview by id, current user's preview). Cancellation is
//! observed between attempts only; an attempt in flight always completes.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::generation::store::{CvStore, StoreError};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Never below 1.
    pub max_attempts: u32,
    /// Fixed delay between attempts.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: DEFAULT_BACKOFF,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }
}

#[derive(Debug)]
pub struct FetchedContent {
    pub content: Value,
    pub attempts: u32,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Content fetch failed after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: StoreError },

    #[error("Content fetch failed: {0}")]
    Fatal(StoreError),

    #[error("Content fetch cancelled after {attempts} attempts")]
    Cancelled { attempts: u32 },
}

/// Reads a record's raw content, retrying retryable failures per `policy`.
///
/// A record without content counts as a retryable failure: the generation
/// service may not have finished writing it yet.
pub async fn fetch_content_with_retry(
    store: &dyn CvStore,
    id: Uuid,
    policy: RetryPolicy,
    cancel: &CancellationToken,
) -> Result<FetchedContent, FetchError> {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        if cancel.is_cancelled() {
            return Err(FetchError::Cancelled { attempts: attempt });
        }
        attempt += 1;

        let failure = match store.get_content(id).await {
            Ok(Some(content)) if !content.is_null() => {
                debug!("Fetched content for CV {id} on attempt {attempt}");
                return Ok(FetchedContent {
                    content,
                    attempts: attempt,
                });
            }
            Ok(_) => StoreError::NotFound(format!("CV {id} has no content yet")),
            Err(e) if !e.is_retryable() => return Err(FetchError::Fatal(e)),
            Err(e) => e,
        };

        if attempt >= max_attempts {
            return Err(FetchError::Exhausted {
                attempts: attempt,
                last: failure,
            });
        }

        warn!(
            "Content fetch attempt {}/{} for CV {} failed ({}), retrying after {}ms...",
            attempt,
            max_attempts,
            id,
            failure,
            policy.backoff.as_millis()
        );

        tokio::select! {
            _ = cancel.cancelled() => {
                return Err(FetchError::Cancelled { attempts: attempt });
            }
            _ = tokio::time::sleep(policy.backoff) => {}
        }
    }
}
