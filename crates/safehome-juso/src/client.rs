//! HTTP client for the juso.go.kr road-address search API.
//!
//! Wraps `reqwest` with juso-specific error handling, confirmation-key
//! management, and typed response deserialization. The endpoint reports
//! application-level failures inside a 200 response; `search` checks the
//! envelope's `errorMessage` sentinel and surfaces those as [`JusoError::Api`].

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::JusoError;
use crate::retry::retry_with_backoff;
use crate::types::{AddrLinkResponse, JusoEntry};

const DEFAULT_BASE_URL: &str = "https://business.juso.go.kr/";
const SEARCH_PATH: &str = "addrlink/addrLinkApi.do";

/// Client for the juso.go.kr address-link search endpoint.
///
/// Manages the HTTP client, confirmation key, and base URL. Use
/// [`JusoClient::new`] for production or [`JusoClient::with_base_url`] to
/// point at a mock server in tests. Configuration is constructor-injected;
/// there is no module-level singleton.
pub struct JusoClient {
    client: Client,
    confm_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl JusoClient {
    /// Creates a new client pointed at the production juso.go.kr API.
    ///
    /// # Errors
    ///
    /// Returns [`JusoError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(confm_key: &str, timeout_secs: u64) -> Result<Self, JusoError> {
        Self::with_base_url(confm_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`JusoError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`JusoError::Api`] if `base_url` is not a valid URL.
    pub fn with_base_url(
        confm_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, JusoError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("safehome/0.1 (rental-risk)")
            .build()?;

        // Normalise: a trailing slash keeps Url::join from replacing the
        // last path segment of the base URL.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| JusoError::Api {
            code: "config".to_owned(),
            message: format!("invalid base URL '{base_url}': {e}"),
        })?;

        Ok(Self {
            client,
            confm_key: confm_key.to_owned(),
            base_url,
            max_retries: 3,
            backoff_base_ms: 1_000,
        })
    }

    /// Overrides the retry policy. Tests use `(0, 0)` to fail fast.
    #[must_use]
    pub fn retry_policy(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Searches for road addresses matching `keyword`.
    ///
    /// Returns the raw match entries in API order; callers own the
    /// first-result policy. An empty keyword is passed through unchanged —
    /// the API itself decides what to do with it.
    ///
    /// # Errors
    ///
    /// - [`JusoError::Api`] if the envelope's `errorMessage` is not the
    ///   `"정상"` success sentinel.
    /// - [`JusoError::Http`] on network failure or non-2xx HTTP status
    ///   (after retrying transient failures with back-off).
    /// - [`JusoError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn search(
        &self,
        keyword: &str,
        size: u32,
        page: u32,
    ) -> Result<Vec<JusoEntry>, JusoError> {
        let url = self.build_url(keyword, size, page);
        let envelope = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.request_search(&url)
        })
        .await?;

        let common = &envelope.results.common;
        if !common.is_normal() {
            return Err(JusoError::Api {
                code: common.error_code.clone(),
                message: common.error_message.clone(),
            });
        }

        Ok(envelope.results.juso)
    }

    /// Builds the full request URL with properly percent-encoded query parameters.
    fn build_url(&self, keyword: &str, size: u32, page: u32) -> Url {
        // The base URL is validated at construction, so the join cannot fail.
        let mut url = self
            .base_url
            .join(SEARCH_PATH)
            .unwrap_or_else(|_| self.base_url.clone());
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("confmKey", &self.confm_key);
            pairs.append_pair("currentPage", &page.to_string());
            pairs.append_pair("countPerPage", &size.to_string());
            pairs.append_pair("keyword", keyword);
            pairs.append_pair("resultType", "json");
        }
        url
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the body
    /// into the search envelope.
    async fn request_search(&self, url: &Url) -> Result<AddrLinkResponse, JusoError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| JusoError::Deserialize {
            context: SEARCH_PATH.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> JusoClient {
        JusoClient::with_base_url("test-key", 30, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_constructs_correct_query_string() {
        let client = test_client("https://business.juso.go.kr");
        let url = client.build_url("도봉로 100", 10, 1);
        assert!(url.as_str().starts_with(
            "https://business.juso.go.kr/addrlink/addrLinkApi.do?confmKey=test-key"
        ));
        assert!(url.as_str().contains("currentPage=1"));
        assert!(url.as_str().contains("countPerPage=10"));
        assert!(url.as_str().contains("resultType=json"));
    }

    #[test]
    fn build_url_strips_trailing_slash() {
        let client = test_client("https://business.juso.go.kr///");
        let url = client.build_url("x", 1, 1);
        assert!(url
            .as_str()
            .starts_with("https://business.juso.go.kr/addrlink/addrLinkApi.do?"));
    }

    #[test]
    fn build_url_percent_encodes_keyword() {
        let client = test_client("https://business.juso.go.kr");
        let url = client.build_url("도봉로 100", 10, 1);
        assert!(
            !url.as_str().contains(' '),
            "keyword must be percent-encoded: {url}"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = JusoClient::with_base_url("k", 5, "not a url");
        assert!(matches!(result, Err(JusoError::Api { .. })));
    }
}
