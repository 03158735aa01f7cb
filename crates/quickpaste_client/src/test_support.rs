//! Shared test-only helpers for quickpaste_client.

use crate::api::PasteApi;
use crate::error::ApiError;
use quickpaste_core::{LanguageEntry, PasteCreateRequest};
use std::sync::{Arc, Mutex};

/// In-memory [`PasteApi`] with canned responses that records create requests.
#[derive(Clone)]
pub(crate) struct FakeApi {
    languages: Result<Vec<LanguageEntry>, u16>,
    create: Result<String, u16>,
    requests: Arc<Mutex<Vec<PasteCreateRequest>>>,
}

impl FakeApi {
    pub(crate) fn ready(entries: Vec<LanguageEntry>) -> Self {
        Self {
            languages: Ok(entries),
            create: Ok("paste-id".to_string()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn failing_catalog(status: u16) -> Self {
        Self {
            languages: Err(status),
            ..Self::ready(Vec::new())
        }
    }

    pub(crate) fn creating(mut self, paste_id: &str) -> Self {
        self.create = Ok(paste_id.to_string());
        self
    }

    pub(crate) fn failing_create(mut self, status: u16) -> Self {
        self.create = Err(status);
        self
    }

    pub(crate) fn requests(&self) -> Vec<PasteCreateRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

fn status_error(status: u16) -> ApiError {
    ApiError::Status {
        status,
        message: "fake failure".to_string(),
    }
}

impl PasteApi for FakeApi {
    async fn fetch_languages(&self) -> Result<Vec<LanguageEntry>, ApiError> {
        self.languages.clone().map_err(status_error)
    }

    async fn create_paste(&self, request: &PasteCreateRequest) -> Result<String, ApiError> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());
        self.create.clone().map_err(status_error)
    }
}

/// Catalog used across session tests.
pub(crate) fn sample_catalog() -> Vec<LanguageEntry> {
    vec![
        LanguageEntry::new("none", "Plain Text"),
        LanguageEntry::new("rust", "Rust"),
        LanguageEntry::new("python", "Python"),
    ]
}
