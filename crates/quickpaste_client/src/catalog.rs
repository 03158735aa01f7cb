//! Language catalog loading state.
//!
//! The catalog is fetched once per page. A failure is terminal for that page:
//! there is no retry, and a later response replaces the state wholesale.

use quickpaste_core::LanguageEntry;
use tracing::{debug, warn};

/// Observable catalog states. Exactly one holds at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogState {
    Loading,
    Error(String),
    Ready(Vec<LanguageEntry>),
}

/// Parse a `/langs` response body, preserving backend order.
///
/// # Errors
/// Returns the decode error when the body is not an array of
/// `{ "Language", "Name" }` objects.
pub fn parse_catalog(body: &str) -> Result<Vec<LanguageEntry>, serde_json::Error> {
    serde_json::from_str(body)
}

/// Catalog holder for one page instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCatalog {
    state: CatalogState,
}

impl Default for LanguageCatalog {
    fn default() -> Self {
        Self {
            state: CatalogState::Loading,
        }
    }
}

impl LanguageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Entries of a ready catalog; empty in any other state.
    pub fn entries(&self) -> &[LanguageEntry] {
        match &self.state {
            CatalogState::Ready(entries) => entries,
            _ => &[],
        }
    }

    pub fn contains(&self, language_code: &str) -> bool {
        self.entries()
            .iter()
            .any(|entry| entry.language_code == language_code)
    }

    /// Apply a fetch result. An empty catalog is a valid `Ready` state.
    pub fn resolve(&mut self, result: Result<Vec<LanguageEntry>, String>) {
        self.state = match result {
            Ok(entries) => {
                debug!(count = entries.len(), "language catalog ready");
                CatalogState::Ready(entries)
            }
            Err(message) => {
                warn!("language catalog unavailable: {}", message);
                CatalogState::Error(message)
            }
        };
    }
}
