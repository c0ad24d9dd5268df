//! Page fetcher trait and the reqwest-backed implementation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value as Json;

use crate::error::ApiError;
use crate::fetch::FetchDescriptor;
use crate::fetch::FetchMode;
use crate::fetch::PageResponse;

/// Fetches one page of rows for a descriptor.
///
/// The grid controller only ever talks to this trait, so tests and demos
/// substitute an in-memory implementation for the HTTP one.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page described by `descriptor` with the given window.
    async fn fetch_page(
        &self,
        descriptor: &FetchDescriptor,
        take: u64,
        skip: u64,
    ) -> Result<PageResponse, ApiError>;
}

/// reqwest-backed [`PageFetcher`].
///
/// Cheap to clone (uses `Arc` internally). Descriptor endpoints resolve
/// against `base_url` unless they are already absolute.
#[derive(Clone)]
pub struct HttpPageFetcher {
    inner: Arc<HttpPageFetcherInner>,
}

struct HttpPageFetcherInner {
    base_url: String,
    http_client: Client,
    timeout: Option<Duration>,
}

impl HttpPageFetcher {
    /// Creates a fetcher with a default HTTP client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Creates a fetcher with a caller-supplied HTTP client.
    pub fn with_client(base_url: impl Into<String>, http_client: Client) -> Self {
        Self {
            inner: Arc::new(HttpPageFetcherInner {
                base_url: base_url.into(),
                http_client,
                timeout: None,
            }),
        }
    }

    /// Sets a per-request timeout.
    pub fn timeout(self, timeout: Duration) -> Self {
        Self {
            inner: Arc::new(HttpPageFetcherInner {
                base_url: self.inner.base_url.clone(),
                http_client: self.inner.http_client.clone(),
                timeout: Some(timeout),
            }),
        }
    }

    /// Returns the base URL requests resolve against.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn resolve(&self, endpoint: &str) -> Result<url::Url, ApiError> {
        let raw = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else {
            format!(
                "{}/{}",
                self.inner.base_url.trim_end_matches('/'),
                endpoint.trim_start_matches('/')
            )
        };
        url::Url::parse(&raw).map_err(|_| ApiError::InvalidUrl(raw))
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(
        &self,
        descriptor: &FetchDescriptor,
        take: u64,
        skip: u64,
    ) -> Result<PageResponse, ApiError> {
        let mut request = match descriptor.mode {
            FetchMode::GetQuery => {
                let url = self.resolve(&descriptor.url(take, skip))?;
                debug!("GET {url}");
                self.inner.http_client.get(url)
            }
            FetchMode::PostBody => {
                let url = self.resolve(&descriptor.endpoint)?;
                debug!("POST {url} take={take} skip={skip}");
                self.inner
                    .http_client
                    .post(url)
                    .json(&descriptor.body(take, skip))
            }
        };

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;

        if response.status().is_success() {
            let body: Json = response
                .json()
                .await
                .map_err(|e| ApiError::parse(e.to_string()))?;
            PageResponse::from_json(body)
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::Http {
                status,
                message: error_message(&body),
            })
        }
    }
}

/// Pulls the `message` field out of a JSON error body, falling back to
/// the raw body text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Json>(body)
        .ok()
        .and_then(|json| {
            json.get("message")
                .and_then(Json::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}
