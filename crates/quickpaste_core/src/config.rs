//! Configuration loading from build-time and runtime environment values.

use crate::constants::{DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SERVER_URL};
use crate::text::{normalize_base_url, normalize_optional_nonempty};
use serde::Deserialize;
use std::env;

/// Backend base URL baked in at build time, if any.
const BUILD_SERVER_URL: Option<&str> = option_env!("SERVER_URL");

/// Runtime configuration for QuickPaste clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Backend base URL, without a trailing slash.
    pub server_url: String,
    /// Public frontend base used to display absolute paste links.
    pub site_url: Option<String>,
    pub request_timeout_secs: u64,
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment.
///
/// Missing or unrecognized values are treated as `false`.
pub fn env_flag_enabled(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(false)
}

fn env_nonempty(name: &str) -> Option<String> {
    normalize_optional_nonempty(env::var(name).ok())
}

/// Resolve the backend base URL.
///
/// A runtime `SERVER_URL` wins over the build-time value so packaged binaries
/// can be pointed at another backend without rebuilding.
///
/// # Returns
/// The chosen base URL with trailing slashes removed.
pub fn resolve_server_url(runtime: Option<String>, build: Option<&str>) -> String {
    let chosen = normalize_optional_nonempty(runtime)
        .or_else(|| normalize_optional_nonempty(build.map(str::to_string)))
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
    normalize_base_url(&chosen)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            site_url: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        Self {
            server_url: resolve_server_url(env::var("SERVER_URL").ok(), BUILD_SERVER_URL),
            site_url: env_nonempty("SITE_URL").map(|url| normalize_base_url(&url)),
            request_timeout_secs: env_nonempty("REQUEST_TIMEOUT")
                .and_then(|secs| secs.parse().ok())
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Apply command-line overrides on top of the environment.
    pub fn with_overrides(
        mut self,
        server_url: Option<String>,
        site_url: Option<String>,
        request_timeout_secs: Option<u64>,
    ) -> Self {
        if let Some(server_url) = normalize_optional_nonempty(server_url) {
            self.server_url = normalize_base_url(&server_url);
        }
        if let Some(site_url) = normalize_optional_nonempty(site_url) {
            self.site_url = Some(normalize_base_url(&site_url));
        }
        if let Some(secs) = request_timeout_secs {
            self.request_timeout_secs = secs;
        }
        self
    }

    /// Turn a relative navigation target into the link shown to the user.
    ///
    /// # Returns
    /// `{site_url}{path}` when a site URL is configured, otherwise `path`.
    pub fn display_link(&self, path: &str) -> String {
        match self.site_url.as_deref() {
            Some(site) => format!("{}{}", site, path),
            None => path.to_string(),
        }
    }
}
