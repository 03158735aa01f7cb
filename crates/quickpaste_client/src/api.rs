//! HTTP client for the catalog and paste-creation endpoints.

use crate::catalog::parse_catalog;
use crate::error::ApiError;
use quickpaste_core::{Config, LanguageEntry, PasteCreateRequest, CREATE_PASTE_PATH, LANGS_PATH};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Backend operations the workflow depends on.
pub trait PasteApi {
    /// Fetch the ordered language catalog.
    fn fetch_languages(&self) -> impl Future<Output = Result<Vec<LanguageEntry>, ApiError>>;

    /// Create a paste and return its identifier.
    fn create_paste(
        &self,
        request: &PasteCreateRequest,
    ) -> impl Future<Output = Result<String, ApiError>>;
}

/// Build an endpoint URL by appending encoded path segments to `server`.
///
/// # Errors
/// Returns [`ApiError::InvalidUrl`] when `server` does not parse or cannot
/// carry a path.
pub fn api_url(server: &str, segments: &[&str]) -> Result<reqwest::Url, ApiError> {
    let invalid = |reason: String| ApiError::InvalidUrl {
        url: server.to_string(),
        reason,
    };
    let mut url = reqwest::Url::parse(server).map_err(|err| invalid(err.to_string()))?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| invalid("cannot be used as an API base".to_string()))?;
        path.pop_if_empty();
        path.extend(segments);
    }
    Ok(url)
}

/// Pick a readable message out of a failed response body.
pub fn error_message_for_response(status: reqwest::StatusCode, body: &str) -> String {
    if body.trim().is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();
    }

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = value.get("error").and_then(Value::as_str) {
            return message.to_string();
        }
    }

    body.to_string()
}

async fn ensure_success(res: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        message: error_message_for_response(status, &body),
    })
}

/// [`PasteApi`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpPasteApi {
    client: reqwest::Client,
    langs_url: reqwest::Url,
    create_url: reqwest::Url,
}

impl HttpPasteApi {
    /// Build a client for the backend named in `config`.
    ///
    /// # Errors
    /// Returns an error when the server URL is invalid or the HTTP client
    /// cannot be constructed.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            langs_url: api_url(&config.server_url, &[LANGS_PATH])?,
            create_url: api_url(&config.server_url, &[CREATE_PASTE_PATH])?,
        })
    }
}

impl PasteApi for HttpPasteApi {
    async fn fetch_languages(&self) -> Result<Vec<LanguageEntry>, ApiError> {
        debug!(url = %self.langs_url, "fetching language catalog");
        let res = self.client.get(self.langs_url.clone()).send().await?;
        let res = ensure_success(res).await?;
        let body = res.text().await?;
        Ok(parse_catalog(&body)?)
    }

    async fn create_paste(&self, request: &PasteCreateRequest) -> Result<String, ApiError> {
        debug!(url = %self.create_url, language = %request.language, "creating paste");
        let res = self
            .client
            .post(self.create_url.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(serde_json::to_string(request)?)
            .send()
            .await?;
        let res = ensure_success(res).await?;
        Ok(res.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::{api_url, error_message_for_response, HttpPasteApi};
    use crate::ApiError;
    use quickpaste_core::Config;

    #[test]
    fn api_url_matrix_covers_encoding_and_base_path_append() {
        let cases = [
            ("http://127.0.0.1:8080", "langs", "http://127.0.0.1:8080/langs"),
            (
                "http://127.0.0.1:8080/api/",
                "p-create",
                "http://127.0.0.1:8080/api/p-create",
            ),
            (
                "http://127.0.0.1:8080",
                "a/b?c",
                "http://127.0.0.1:8080/a%2Fb%3Fc",
            ),
        ];
        for (base, segment, expected) in cases {
            let url = api_url(base, &[segment]).expect("api_url should build");
            assert_eq!(url.as_str(), expected);
        }
    }

    #[test]
    fn api_url_rejects_unusable_bases() {
        for base in ["not a url", "mailto:someone@example.com"] {
            assert!(matches!(
                api_url(base, &["langs"]),
                Err(ApiError::InvalidUrl { .. })
            ));
        }
    }

    #[test]
    fn error_message_for_response_matrix() {
        let cases = [
            (
                reqwest::StatusCode::NOT_FOUND,
                r#"{"error":"Not found"}"#,
                "Not found",
            ),
            (reqwest::StatusCode::BAD_REQUEST, "   ", "Bad Request"),
            (
                reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                "raw failure body",
                "raw failure body",
            ),
        ];
        for (status, body, expected) in cases {
            assert_eq!(error_message_for_response(status, body), expected);
        }
    }

    #[test]
    fn http_api_rejects_invalid_server_url() {
        let config = Config {
            server_url: "::not-a-url".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            HttpPasteApi::new(&config),
            Err(ApiError::InvalidUrl { .. })
        ));
    }
}
