//! Fetch descriptors: how `take`/`skip` reach the backend.

use serde_json::Map;
use serde_json::Value as Json;

/// How pagination parameters are transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMode {
    /// `take`/`skip` are appended to the endpoint as query parameters.
    #[default]
    GetQuery,
    /// `take`/`skip` are merged into a JSON body alongside caller fields.
    PostBody,
}

/// Describes one remote page-fetch exchange.
///
/// The grid controller treats the exchange as opaque: the descriptor only
/// decides where `take` and `skip` land and which caller-supplied filter
/// fields ride along.
///
/// # Example
///
/// ```
/// use medigrid_lib::fetch::FetchDescriptor;
///
/// let plain = FetchDescriptor::get("Patient/GetAll");
/// assert_eq!(plain.url(50, 100), "Patient/GetAll?take=50&skip=100");
///
/// let filtered = FetchDescriptor::get("Order/GetAll?status=open").with_query_prefix();
/// assert_eq!(filtered.url(10, 0), "Order/GetAll?status=open&take=10&skip=0");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FetchDescriptor {
    /// Whether pagination travels in the query string or the body.
    pub mode: FetchMode,
    /// Endpoint path or absolute URL, possibly already carrying a query
    /// string.
    pub endpoint: String,
    /// True when `endpoint` already has a query string, so parameters
    /// append with `&` instead of `?`.
    pub has_query_prefix: bool,
    /// Caller-supplied filter fields merged into POST bodies.
    pub extra_body: Map<String, Json>,
}

impl FetchDescriptor {
    /// Creates a query-string GET descriptor.
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self {
            mode: FetchMode::GetQuery,
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Creates a JSON-body POST descriptor.
    pub fn post(endpoint: impl Into<String>) -> Self {
        Self {
            mode: FetchMode::PostBody,
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Marks the endpoint as already carrying a query string.
    pub fn with_query_prefix(mut self) -> Self {
        self.has_query_prefix = true;
        self
    }

    /// Sets the caller fields merged into POST bodies.
    pub fn with_body(mut self, extra_body: Map<String, Json>) -> Self {
        self.extra_body = extra_body;
        self
    }

    /// Endpoint with `take`/`skip` appended (GET mode).
    pub fn url(&self, take: u64, skip: u64) -> String {
        let separator = if self.has_query_prefix { '&' } else { '?' };
        format!("{}{}take={}&skip={}", self.endpoint, separator, take, skip)
    }

    /// JSON body with `take`/`skip` merged over the caller fields
    /// (POST mode). Pagination always wins a key collision.
    pub fn body(&self, take: u64, skip: u64) -> Json {
        let mut body = self.extra_body.clone();
        body.insert("take".to_string(), take.into());
        body.insert("skip".to_string(), skip.into());
        Json::Object(body)
    }
}
