//! HTTP client for the upstream marketplace search endpoint.

use std::time::Duration;

use marketlens_core::{AppConfig, Product};
use reqwest::{Client, Url};
use tokio_util::sync::CancellationToken;

use crate::error::UpstreamError;
use crate::normalize::normalize_value;

/// Connection settings for [`SearchClient`].
#[derive(Clone)]
pub struct UpstreamSettings {
    pub base_url: String,
    /// Long-lived access token sent as the `AK` parameter.
    pub token: String,
    /// Value of the `APP_MODID` parameter.
    pub modid: String,
    /// Optional locale hint sent as `implicit_info_city_data`.
    pub city: Option<String>,
    /// Deadline for the whole request, connect through body.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl UpstreamSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.upstream_base_url.clone(),
            token: config.upstream_token.clone(),
            modid: config.upstream_modid.clone(),
            city: config.upstream_city.clone(),
            timeout_secs: config.upstream_timeout_secs,
            user_agent: config.user_agent.clone(),
        }
    }
}

impl std::fmt::Debug for UpstreamSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamSettings")
            .field("base_url", &self.base_url)
            .field("token", &"[redacted]")
            .field("modid", &self.modid)
            .field("city", &self.city)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Result window requested from the upstream in a single call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    pub page: u32,
    /// Zero-based index of the first result.
    pub start: u32,
    /// Index one past the last result.
    pub end: u32,
}

impl SearchWindow {
    /// The first `size` results.
    #[must_use]
    pub fn first(size: u32) -> Self {
        Self {
            page: 1,
            start: 0,
            end: size,
        }
    }
}

impl Default for SearchWindow {
    fn default() -> Self {
        Self::first(20)
    }
}

/// Canonical products for one query, in upstream relevance order.
///
/// The query travels with the products so an empty list reads as
/// "nothing found for this query" rather than "nothing searched yet".
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    pub query: String,
    pub products: Vec<Product>,
}

impl SearchResults {
    #[must_use]
    pub fn total(&self) -> usize {
        self.products.len()
    }
}

/// Client for the upstream search endpoint.
///
/// Each call issues exactly one GET. Nothing is retried or cached; the only
/// policy applied is the request deadline configured at construction.
pub struct SearchClient {
    client: Client,
    base_url: Url,
    token: String,
    modid: String,
    city: Option<String>,
    timeout: Duration,
}

impl SearchClient {
    /// Creates a client with a bounded request deadline.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`UpstreamError::InvalidBaseUrl`] if
    /// `settings.base_url` does not parse.
    pub fn new(settings: &UpstreamSettings) -> Result<Self, UpstreamError> {
        let timeout = Duration::from_secs(settings.timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .user_agent(&settings.user_agent)
            .build()
            .map_err(UpstreamError::Http)?;

        // Ensure exactly one trailing slash so query parameters attach to the
        // endpoint path instead of replacing its last segment.
        let normalised = format!("{}/", settings.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| UpstreamError::InvalidBaseUrl {
            base_url: settings.base_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            token: settings.token.clone(),
            modid: settings.modid.clone(),
            city: settings.city.clone(),
            timeout,
        })
    }

    /// Issues one upstream search and returns the parsed body unexamined.
    ///
    /// # Errors
    ///
    /// - [`UpstreamError::Status`] for a non-2xx response.
    /// - [`UpstreamError::Timeout`] when the deadline elapses.
    /// - [`UpstreamError::Http`] for other transport failures.
    /// - [`UpstreamError::Deserialize`] if the body is not JSON.
    pub async fn search(
        &self,
        query: &str,
        window: SearchWindow,
    ) -> Result<serde_json::Value, UpstreamError> {
        let url = self.build_url(query, window);
        tracing::debug!(query = %query, start = window.start, end = window.end, "dispatching upstream search");
        self.request_json(url, query).await
    }

    /// Like [`SearchClient::search`], but abandons the in-flight request as
    /// soon as `cancel` fires.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Cancelled`] when the token fires first, and
    /// otherwise the same errors as [`SearchClient::search`].
    pub async fn search_with_cancel(
        &self,
        query: &str,
        window: SearchWindow,
        cancel: &CancellationToken,
    ) -> Result<serde_json::Value, UpstreamError> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::debug!(query = %query, "upstream search cancelled");
                Err(UpstreamError::Cancelled)
            }
            result = self.search(query, window) => result,
        }
    }

    /// Searches and normalizes in one step.
    ///
    /// # Errors
    ///
    /// Same as [`SearchClient::search`]. A body in an unknown layout is not
    /// an error; it yields empty results.
    pub async fn search_products(
        &self,
        query: &str,
        window: SearchWindow,
    ) -> Result<SearchResults, UpstreamError> {
        let body = self.search(query, window).await?;
        let products = normalize_value(&body);
        tracing::info!(query = %query, count = products.len(), "upstream search completed");
        Ok(SearchResults {
            query: query.to_owned(),
            products,
        })
    }

    /// Builds the request URL with percent-encoded query parameters.
    fn build_url(&self, query: &str, window: SearchWindow) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("AK", &self.token);
            pairs.append_pair("APP_MODID", &self.modid);
            pairs.append_pair("page", &window.page.to_string());
            pairs.append_pair("q", query);
            pairs.append_pair("options_start", &window.start.to_string());
            pairs.append_pair("options_end", &window.end.to_string());
            if let Some(city) = &self.city {
                pairs.append_pair("implicit_info_city_data", city);
            }
        }
        url
    }

    /// Sends the GET, checks for a 2xx status, and parses the body as JSON.
    ///
    /// The URL embeds the access token, so it never appears in errors or logs.
    async fn request_json(&self, url: Url, query: &str) -> Result<serde_json::Value, UpstreamError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let message = status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_owned();
            tracing::warn!(query = %query, status = status.as_u16(), "upstream search failed");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        serde_json::from_str(&body).map_err(|e| UpstreamError::Deserialize {
            context: format!("search response for query \"{query}\""),
            source: e,
        })
    }

    fn transport_error(&self, error: reqwest::Error) -> UpstreamError {
        if error.is_timeout() {
            UpstreamError::Timeout(self.timeout)
        } else {
            UpstreamError::Http(error.without_url())
        }
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
