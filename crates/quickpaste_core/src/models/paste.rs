//! Paste creation payload.

use crate::constants::{DEFAULT_TITLE, PASTE_VIEW_PREFIX};
use crate::form::FormSnapshot;
use serde::{Deserialize, Serialize};

/// Request body for `POST /p-create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasteCreateRequest {
    pub title: String,
    pub text: String,
    pub language: String,
    /// Absolute RFC 3339 timestamp, or `null` when the paste never expires.
    pub expires_at: Option<String>,
}

impl PasteCreateRequest {
    /// Build the wire request from a validated form snapshot.
    ///
    /// An empty title becomes [`DEFAULT_TITLE`]; the body is sent verbatim and
    /// the expiry value is passed through exactly as it was rendered.
    ///
    /// # Returns
    /// The request to serialize as JSON.
    pub fn from_snapshot(snapshot: &FormSnapshot) -> Self {
        let title = if snapshot.title.is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            snapshot.title.clone()
        };
        Self {
            title,
            text: snapshot.body.clone(),
            language: snapshot.language.clone(),
            expires_at: snapshot.expiry.as_wire().map(str::to_string),
        }
    }
}

/// Navigation target for a created paste.
pub fn paste_path(paste_id: &str) -> String {
    format!("{}{}", PASTE_VIEW_PREFIX, paste_id)
}
