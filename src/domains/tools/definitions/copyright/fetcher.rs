//! Upstream retrieval of registration search results.
//!
//! [`RecordFetcher`] turns a [`SearchQuery`] into one GET against the search
//! endpoint and hands back the decoded JSON untouched. The HTTP side sits
//! behind [`SearchTransport`] so the shared client can be swapped out.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::error::FetchError;
use super::query::SearchQuery;
use crate::core::config::UpstreamConfig;

/// Status and body of an upstream response, before any interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Issues GET requests for fully-formed URLs.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    async fn get(&self, url: &str) -> Result<RawResponse, FetchError>;
}

/// [`SearchTransport`] backed by a long-lived `reqwest` client.
///
/// The client's connection pool is shared by every invocation.
#[derive(Debug, Clone)]
pub struct HttpSearchTransport {
    client: reqwest::Client,
}

impl HttpSearchTransport {
    /// Build a client that identifies itself with `user_agent`.
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SearchTransport for HttpSearchTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, FetchError> {
        let response = self.client.get(url).send().await.map_err(describe)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(describe)?;
        Ok(RawResponse { status, body })
    }
}

fn describe(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::transport("request timed out")
    } else if e.is_connect() {
        FetchError::transport(format!("connection failed: {}", e))
    } else {
        FetchError::transport(e.to_string())
    }
}

/// The decoded search payload, kept exactly as the upstream sent it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResponse(Value);

impl SearchResponse {
    pub fn new(raw: Value) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> &Value {
        &self.0
    }

    /// The `metadata` object, if any.
    pub fn metadata(&self) -> Option<&Value> {
        self.0.get("metadata")
    }

    /// Records in upstream order; empty when `data` is missing or not a list.
    pub fn records(&self) -> &[Value] {
        self.0
            .get("data")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Fetches one page of registration records per call.
#[derive(Clone)]
pub struct RecordFetcher {
    endpoint: String,
    transport: Arc<dyn SearchTransport>,
}

impl RecordFetcher {
    pub fn new(endpoint: impl Into<String>, transport: Arc<dyn SearchTransport>) -> Self {
        Self {
            endpoint: endpoint.into(),
            transport,
        }
    }

    /// Fetcher using a real HTTP client configured from `upstream`.
    pub fn from_config(upstream: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let transport = HttpSearchTransport::new(&upstream.user_agent)?;
        Ok(Self::new(upstream.search_url.clone(), Arc::new(transport)))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Full request URL for `query`.
    ///
    /// Search parameters are appended after any query the endpoint already
    /// carries.
    pub fn request_url(&self, query: &SearchQuery) -> Result<String, FetchError> {
        let mut url = reqwest::Url::parse(&self.endpoint).map_err(|e| {
            FetchError::invalid_request(format!("bad endpoint '{}': {}", self.endpoint, e))
        })?;
        let search = query
            .to_query_string()
            .map_err(|e| FetchError::invalid_request(e.to_string()))?;
        let merged = match url.query() {
            Some(existing) if !existing.is_empty() => format!("{}&{}", existing, search),
            _ => search,
        };
        url.set_query(Some(&merged));
        Ok(url.to_string())
    }

    /// Run `query` against the upstream. No retries.
    #[instrument(skip(self, query), fields(title = %query.title(), page = query.page_number()))]
    pub async fn fetch(&self, query: &SearchQuery) -> Result<SearchResponse, FetchError> {
        let url = self.request_url(query)?;
        debug!("GET {}", url);

        let RawResponse { status, body } = self.transport.get(&url).await?;

        if !(200..300).contains(&status) {
            warn!("Copyright search API answered HTTP {}", status);
            return Err(FetchError::transport(format!(
                "upstream returned HTTP {}",
                status
            )));
        }

        debug!("Search response received: {} bytes", body.len());

        match serde_json::from_str::<Value>(&body) {
            Ok(raw) => Ok(SearchResponse::new(raw)),
            Err(e) => {
                let err = FetchError::decode(e.to_string(), &body);
                if let FetchError::Decode { body_excerpt, .. } = &err {
                    warn!("Undecodable search response body: {}", body_excerpt);
                }
                Err(err)
            }
        }
    }
}
