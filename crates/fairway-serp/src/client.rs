//! HTTP client for the SerpAPI Google Shopping endpoint.
//!
//! Wraps `reqwest` with SerpAPI-specific error handling, API key management,
//! and typed response deserialization. Page fetches are retried on transient
//! errors; [`SerpClient::fetch_all`] fans out the configured page offsets
//! concurrently and fails fast when any page fails.

use std::time::Duration;

use futures::future::try_join_all;
use reqwest::{Client, Url};

use crate::error::SerpError;
use crate::retry::retry_with_backoff;
use crate::types::{SearchResponse, ShoppingResult};

const DEFAULT_BASE_URL: &str = "https://serpapi.com/";
const SEARCH_ENGINE: &str = "google_shopping";

/// Locale and page-size parameters applied to every search request.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    /// `gl` country code, e.g. `"ca"`.
    pub country: String,
    /// `hl` language code, e.g. `"en"`.
    pub language: String,
    /// `num` results per page; also the stride between page offsets.
    pub page_size: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            country: "ca".to_string(),
            language: "en".to_string(),
            page_size: 100,
        }
    }
}

/// Client for the SerpAPI Google Shopping endpoint.
///
/// Manages the HTTP client, API key, base URL, and retry policy. Use
/// [`SerpClient::new`] for production or [`SerpClient::with_base_url`] to
/// point at a mock server in tests.
pub struct SerpClient {
    client: Client,
    api_key: String,
    base_url: Url,
    settings: SearchSettings,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay in milliseconds for exponential back-off.
    backoff_base_ms: u64,
}

impl SerpClient {
    /// Creates a new client pointed at the production SerpAPI endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SerpError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        settings: SearchSettings,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, SerpError> {
        Self::with_base_url(
            api_key,
            timeout_secs,
            settings,
            max_retries,
            backoff_base_ms,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SerpError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SerpError::ApiError`] if `base_url` is
    /// not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        settings: SearchSettings,
        max_retries: u32,
        backoff_base_ms: u64,
        base_url: &str,
    ) -> Result<Self, SerpError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("fairway/0.1 (golf-offer-tracking)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // Url::join resolves search.json against the root path rather than
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| SerpError::ApiError(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            settings,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Fetches one page of shopping results at the given offset, with
    /// automatic retry on transient errors.
    ///
    /// A missing `shopping_results` array in the body is an empty page, not
    /// an error — queries past the last page return search metadata only.
    ///
    /// # Errors
    ///
    /// - [`SerpError::Http`] on network failure or non-2xx HTTP status after
    ///   all retries are exhausted.
    /// - [`SerpError::ApiError`] if the API reports an error in the body.
    /// - [`SerpError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn fetch_page(
        &self,
        query: &str,
        start: u32,
    ) -> Result<Vec<ShoppingResult>, SerpError> {
        let url = self.build_url(query, start);

        let body = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move { self.request_json(&url).await }
        })
        .await?;
        Self::check_api_error(&body)?;

        let response: SearchResponse =
            serde_json::from_value(body).map_err(|e| SerpError::Deserialize {
                context: format!("search(q={query}, start={start})"),
                source: e,
            })?;

        Ok(response.shopping_results)
    }

    /// Fetches `page_count` pages concurrently and concatenates them in page
    /// order, each page's internal order preserved.
    ///
    /// Offsets run at `page_size` strides: 0, `page_size`, `2 * page_size`, …
    /// Any page failure aborts the whole call — the caller decides how to
    /// isolate failures across queries.
    ///
    /// # Errors
    ///
    /// Propagates the first page error (see [`SerpClient::fetch_page`]).
    pub async fn fetch_all(
        &self,
        query: &str,
        page_count: u32,
    ) -> Result<Vec<ShoppingResult>, SerpError> {
        let fetches = (0..page_count).map(|page| {
            let start = page * self.settings.page_size;
            self.fetch_page(query, start)
        });

        let pages = try_join_all(fetches).await?;

        let total = pages.iter().map(Vec::len).sum();
        let mut results = Vec::with_capacity(total);
        for page in pages {
            results.extend(page);
        }
        tracing::debug!(query, page_count, total, "fetched shopping results");
        Ok(results)
    }

    /// Builds the full request URL with properly percent-encoded query parameters.
    fn build_url(&self, query: &str, start: u32) -> Url {
        let mut url = self
            .base_url
            .join("search.json")
            .unwrap_or_else(|_| self.base_url.clone());
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("engine", SEARCH_ENGINE);
            pairs.append_pair("q", query);
            pairs.append_pair("gl", &self.settings.country);
            pairs.append_pair("hl", &self.settings.language);
            pairs.append_pair("num", &self.settings.page_size.to_string());
            pairs.append_pair("start", &start.to_string());
            pairs.append_pair("api_key", &self.api_key);
        }
        url
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the
    /// response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SerpError::Http`] on network failure or a non-2xx status.
    /// Returns [`SerpError::Deserialize`] if the body is not valid JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, SerpError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| SerpError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Checks the top-level `"error"` field and returns an error if present.
    ///
    /// SerpAPI reports some failures (exhausted quota, invalid parameters)
    /// inside a 2xx body rather than via the HTTP status.
    fn check_api_error(body: &serde_json::Value) -> Result<(), SerpError> {
        if let Some(msg) = body.get("error").and_then(serde_json::Value::as_str) {
            return Err(SerpError::ApiError(msg.to_string()));
        }
        Ok(())
    }
}
