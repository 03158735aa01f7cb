//! Language catalog entry as produced by `GET /langs`.

use serde::{Deserialize, Serialize};

/// One supported syntax-highlighting language.
///
/// The backend names the fields `Language` (selection key) and `Name`
/// (display label). `language_code` is unique across a catalog and the
/// backend's ordering is the display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    #[serde(rename = "Language")]
    pub language_code: String,
    #[serde(rename = "Name")]
    pub display_name: String,
}

impl LanguageEntry {
    pub fn new(language_code: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            language_code: language_code.into(),
            display_name: display_name.into(),
        }
    }
}
