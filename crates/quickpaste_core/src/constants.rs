//! Shared constants used across QuickPaste crates.

/// Backend base URL used when neither the build nor the environment provide one.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Title sent when the user leaves the title field empty.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Advisory maximum title length in characters. Not enforced.
pub const TITLE_MAX_CHARS: usize = 255;

/// Sentinel language code meaning "no language selected".
pub const LANGUAGE_NONE: &str = "none";

/// Literal expiry value meaning the paste never expires.
pub const EXPIRY_NEVER: &str = "never";

/// Catalog endpoint path segment.
pub const LANGS_PATH: &str = "langs";

/// Paste creation endpoint path segment.
pub const CREATE_PASTE_PATH: &str = "p-create";

/// Path prefix of the paste view page.
pub const PASTE_VIEW_PREFIX: &str = "/p/";

/// Banner shown when the body is empty at submit time.
pub const BODY_REQUIRED_MESSAGE: &str = "Body Required";

/// Banner shown when the create call fails.
pub const SUBMIT_ERROR_MESSAGE: &str = "Error Submitting Form";
