//! Shared text and URL normalization helpers.

/// Trim an optional string and drop empty values.
///
/// # Returns
/// `None` when the input is missing or whitespace-only; otherwise the trimmed
/// string.
pub fn normalize_optional_nonempty(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Strip trailing slashes so path segments can be appended predictably.
pub fn normalize_base_url(url: &str) -> String {
    let mut normalized = url.trim().to_string();
    while normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}
