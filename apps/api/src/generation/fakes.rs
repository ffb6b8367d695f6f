//! In-memory collaborators for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::generation::generator::{ContentGenerator, GeneratorError};
use crate::generation::store::{CvStore, StoreError};

type FetchResult = Result<Option<Value>, StoreError>;

/// Store fake. `get_content` replays a script of results and then repeats
/// the last one; with no script it serves whatever `put_content` wrote.
#[derive(Default)]
pub struct FakeStore {
    script: Mutex<VecDeque<FetchResult>>,
    last: Mutex<Option<FetchResult>>,
    create_error: Option<StoreError>,
    cache_error: Option<StoreError>,
    cached_html: Option<String>,
    latest: Option<Uuid>,
    pub fetch_calls: AtomicU32,
    pub content_written: Mutex<Option<Value>>,
    pub html_written: Mutex<Option<String>>,
}

impl FakeStore {
    pub fn scripted(script: Vec<FetchResult>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            ..Default::default()
        }
    }

    pub fn failing_create(mut self, e: StoreError) -> Self {
        self.create_error = Some(e);
        self
    }

    pub fn failing_cache(mut self, e: StoreError) -> Self {
        self.cache_error = Some(e);
        self
    }

    pub fn with_cached_html(mut self, html: &str) -> Self {
        self.cached_html = Some(html.to_string());
        self
    }

    pub fn with_latest(mut self, id: Uuid) -> Self {
        self.latest = Some(id);
        self
    }

    pub fn fetches(&self) -> u32 {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn written_html(&self) -> Option<String> {
        self.html_written.lock().unwrap().clone()
    }
}

#[async_trait]
impl CvStore for FakeStore {
    async fn create_record(&self, _user_id: Uuid) -> Result<Uuid, StoreError> {
        match &self.create_error {
            Some(e) => Err(e.clone()),
            None => Ok(Uuid::new_v4()),
        }
    }

    async fn put_content(&self, _id: Uuid, content: &Value) -> Result<(), StoreError> {
        *self.content_written.lock().unwrap() = Some(content.clone());
        Ok(())
    }

    async fn get_content(&self, _id: Uuid) -> Result<Option<Value>, StoreError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(next) = self.script.lock().unwrap().pop_front() {
            *self.last.lock().unwrap() = Some(next.clone());
            return next;
        }
        if let Some(last) = self.last.lock().unwrap().clone() {
            return last;
        }
        Ok(self.content_written.lock().unwrap().clone())
    }

    async fn get_rendered_html(&self, _id: Uuid) -> Result<Option<String>, StoreError> {
        Ok(self.cached_html.clone())
    }

    async fn put_rendered_html(&self, _id: Uuid, html: &str) -> Result<(), StoreError> {
        if let Some(e) = &self.cache_error {
            return Err(e.clone());
        }
        *self.html_written.lock().unwrap() = Some(html.to_string());
        Ok(())
    }

    async fn latest_record_for_user(&self, _user_id: Uuid) -> Result<Option<Uuid>, StoreError> {
        Ok(self.latest)
    }
}

pub enum FakeGenerator {
    Returns(Value),
    NotFound,
    Transient,
}

#[async_trait]
impl ContentGenerator for FakeGenerator {
    async fn generate(&self, _record_id: Uuid, _profile: &Value) -> Result<Value, GeneratorError> {
        match self {
            FakeGenerator::Returns(v) => Ok(v.clone()),
            FakeGenerator::NotFound => Err(GeneratorError::EndpointNotFound),
            FakeGenerator::Transient => {
                Err(GeneratorError::Transient("upstream returned 502".to_string()))
            }
        }
    }
}
