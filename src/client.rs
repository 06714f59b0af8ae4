//! HTTP executor for Elasticsearch-compatible search backends.
//!
//! The client is deliberately thin: it posts the rendered request body to
//! `{host}/{index}/_search` and hands the raw JSON back. All query shaping
//! lives in [`crate::query`] and all response interpretation in
//! [`crate::response`]; transport and backend failures surface as the opaque
//! [`KontosError::Execution`] kind. The client never retries.

use std::time::Duration;

use log::debug;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;

use crate::error::{KontosError, Result};
use crate::query::SearchRequest;

/// Extra client-side allowance on top of the backend-side timeout, so the
/// backend gets a chance to report its own timeout first.
const TIMEOUT_SLACK: Duration = Duration::from_secs(5);

/// A search client bound to one backend host and index.
#[derive(Debug, Clone)]
pub struct ElasticClient {
    host: String,
    index: String,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl ElasticClient {
    /// Create a new client for the given host and index.
    pub fn new<H: Into<String>, I: Into<String>>(host: H, index: I) -> Self {
        ElasticClient {
            host: host.into(),
            index: index.into(),
            api_key: None,
            http: reqwest::Client::new(),
        }
    }

    /// Set the API key sent as an `Authorization: ApiKey ...` header.
    pub fn api_key<S: Into<String>>(mut self, key: S) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// The search endpoint URL this client posts to.
    pub fn search_url(&self) -> String {
        format!("{}/{}/_search", self.host.trim_end_matches('/'), self.index)
    }

    /// Execute a search request and return the raw response document.
    ///
    /// The request's own timeout is forwarded to the backend inside the
    /// body; the HTTP call gets that timeout plus a small slack. Any
    /// transport error, non-success status, or unparseable body is reported
    /// as [`KontosError::Execution`].
    pub async fn search(&self, request: &SearchRequest) -> Result<Value> {
        let url = self.search_url();
        let body = request.body();
        debug!("POST {url}: {body}");

        let mut http_request = self
            .http
            .post(&url)
            .json(&body)
            .timeout(request.timeout() + TIMEOUT_SLACK);
        if let Some(key) = &self.api_key {
            http_request = http_request.header(AUTHORIZATION, format!("ApiKey {key}"));
        }

        let response = http_request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(KontosError::execution(format!(
                "backend returned {status}: {detail}"
            )));
        }

        let value = response.json::<Value>().await?;
        debug!("response from {url}: {} bytes", value.to_string().len());
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_normalizes_trailing_slash() {
        let client = ElasticClient::new("http://localhost:9200/", "patents");
        assert_eq!(client.search_url(), "http://localhost:9200/patents/_search");

        let client = ElasticClient::new("http://localhost:9200", "patents");
        assert_eq!(client.search_url(), "http://localhost:9200/patents/_search");
    }

    #[test]
    fn test_api_key_is_optional() {
        let client = ElasticClient::new("http://localhost:9200", "patents");
        assert!(client.api_key.is_none());
        let client = client.api_key("secret");
        assert_eq!(client.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_unreachable_backend_surfaces_execution_error() {
        use crate::query::QueryBuilder;

        // Port 1 is never serving; the connect failure must come back as the
        // opaque execution error, not a panic or a silent default.
        let client = ElasticClient::new("http://127.0.0.1:1", "patents");
        let request = QueryBuilder::new("acme")
            .target_field("organization")
            .aggregation_field("entity_id")
            .build()
            .unwrap();

        let result = tokio_test::block_on(client.search(&request));
        match result {
            Err(KontosError::Execution(_)) => {}
            other => panic!("Expected Execution error, got {other:?}"),
        }
    }
}
