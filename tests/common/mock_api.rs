//! Scripted image store API
//!
//! Answers client requests from in-memory tables and records every call so
//! tests can assert request order and retry counts.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use sketchboard::gallery_app::reporter::PendingErrors;
use sketchboard::gallery_app::{AggregationService, ApiError, ImageStoreApi};
use sketchboard::shared::ImageRecord;

#[derive(Default)]
pub struct ScriptedApi {
    all: Mutex<Vec<ImageRecord>>,
    by_tag: Mutex<HashMap<String, Vec<ImageRecord>>>,
    tags: Mutex<Vec<String>>,
    failing: Mutex<HashSet<String>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_all(self, records: Vec<ImageRecord>) -> Self {
        *self.all.lock().unwrap() = records;
        self
    }

    pub fn with_tag(self, tag: &str, records: Vec<ImageRecord>) -> Self {
        self.by_tag.lock().unwrap().insert(tag.to_string(), records);
        self
    }

    pub fn with_tags(self, tags: &[&str]) -> Self {
        *self.tags.lock().unwrap() = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Make every call labelled `call` fail with a 500
    pub fn failing(self, call: &str) -> Self {
        self.failing.lock().unwrap().insert(call.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
    }

    fn record_call(&self, call: String) -> Result<(), ApiError> {
        let failing = self.failing.lock().unwrap().contains(&call);
        self.calls.lock().unwrap().push(call.clone());
        if failing {
            Err(ApiError::Status {
                status: 500,
                message: format!("{} failed", call),
            })
        } else {
            Ok(())
        }
    }
}

impl ImageStoreApi for ScriptedApi {
    fn list_all(&self) -> BoxFuture<'_, Result<Vec<ImageRecord>, ApiError>> {
        async move {
            self.record_call("list_all".into())?;
            Ok(self.all.lock().unwrap().clone())
        }
        .boxed()
    }

    fn find_by_tag<'a>(&'a self, tag: &'a str) -> BoxFuture<'a, Result<Vec<ImageRecord>, ApiError>> {
        async move {
            self.record_call(format!("tag:{}", tag))?;
            Ok(self.by_tag.lock().unwrap().get(tag).cloned().unwrap_or_default())
        }
        .boxed()
    }

    fn find_by_id<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<ImageRecord, ApiError>> {
        async move {
            self.record_call(format!("id:{}", id))?;
            self.all
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .ok_or(ApiError::Status {
                    status: 404,
                    message: "ERROR: not found".into(),
                })
        }
        .boxed()
    }

    fn distinct_tags(&self) -> BoxFuture<'_, Result<Vec<String>, ApiError>> {
        async move {
            self.record_call("tags".into())?;
            Ok(self.tags.lock().unwrap().clone())
        }
        .boxed()
    }

    fn upsert(&self, mut record: ImageRecord) -> BoxFuture<'_, Result<Option<ImageRecord>, ApiError>> {
        async move {
            self.record_call("upsert".into())?;
            if record.is_new() {
                record.id = format!("saved-{}", self.count("upsert"));
            }
            Ok(Some(record))
        }
        .boxed()
    }

    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<(), ApiError>> {
        async move {
            self.record_call(format!("delete:{}", id))?;
            self.all.lock().unwrap().retain(|r| r.id != id);
            Ok(())
        }
        .boxed()
    }
}

/// Service over `api` reporting into the returned queue
pub fn service_with(api: Arc<ScriptedApi>) -> (AggregationService, PendingErrors) {
    let errors = PendingErrors::new();
    let service = AggregationService::new(api, Arc::new(errors.clone()));
    (service, errors)
}
