//! HTTP transport to the search engine and the raw shape of its responses.

use std::{future::Future, time::Duration};

use reqwest::{StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    config::FetcherConfig,
    db_utils::raw_dataset::RawDataset,
    error::{ConfigError, Result, SchemaError, TransportError, TransportFailure},
};

#[derive(Debug, Deserialize)]
pub struct RawSearchResponse {
    pub hits: RawSearchResultHits,
    pub aggregations: RawSearchAggregations,
}

#[derive(Debug, Deserialize)]
pub struct RawSearchResultHits {
    pub total: RawSearchResultTotal,
    pub hits: Vec<RawSearchResultHit>,
}

#[derive(Debug, Deserialize)]
pub struct RawSearchResultTotal {
    pub value: u64,
}

#[derive(Debug, Deserialize)]
pub struct RawSearchResultHit {
    #[serde(rename = "_source")]
    pub source: RawDataset,
}

#[derive(Debug, Deserialize)]
pub struct RawSearchAggregations {
    /// Computed over the whole index, ignoring query and filters.
    pub all: RawFacetAggregations,
    pub publishers: RawSearchResultAggregation,
    pub licenses: RawSearchResultAggregation,
}

#[derive(Debug, Deserialize)]
pub struct RawFacetAggregations {
    pub publishers: RawSearchResultAggregation,
    pub licenses: RawSearchResultAggregation,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearchResultAggregation {
    pub buckets: Vec<RawSearchResultAggregationBucket>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawSearchResultAggregationBucket {
    pub key: FacetKey,
    pub doc_count: u64,
}

/// Composite bucket key: the facet value's identifier and its display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "Vec<String>")]
pub struct FacetKey {
    pub id: String,
    pub name: String,
}

impl TryFrom<Vec<String>> for FacetKey {
    type Error = String;

    fn try_from(key: Vec<String>) -> std::result::Result<Self, Self::Error> {
        let len = key.len();
        let mut parts = key.into_iter();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(id), Some(name), None) => Ok(FacetKey { id, name }),
            _ => Err(format!("facet bucket key must be [id, name], got {len} element(s)")),
        }
    }
}

/// Checks a response body against the expected response shape.
pub fn parse_search_response(body: &str) -> std::result::Result<RawSearchResponse, SchemaError> {
    serde_json::from_str(body).map_err(|e| SchemaError::new(e.to_string()))
}

/// Sends one JSON request to the engine and returns the response body.
pub trait EngineClient: Send + Sync {
    fn post_json(
        &self,
        url: &Url,
        body: &serde_json::Value,
    ) -> impl Future<Output = std::result::Result<String, TransportFailure>> + Send;
}

#[derive(Debug, Clone)]
pub struct ReqwestEngineClient {
    client: reqwest::Client,
}

impl ReqwestEngineClient {
    pub fn new(timeout: Duration) -> std::result::Result<Self, ConfigError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl EngineClient for ReqwestEngineClient {
    async fn post_json(
        &self,
        url: &Url,
        body: &serde_json::Value,
    ) -> std::result::Result<String, TransportFailure> {
        let response = self.client.post(url.clone()).json(body).send().await.map_err(|e| {
            if e.is_builder() {
                TransportFailure::InvalidRequest(e.to_string())
            } else {
                TransportFailure::NoResponse(e.to_string())
            }
        })?;
        let status = response.status();
        let response_txt = response
            .text()
            .await
            .map_err(|e| body_read_failure(status, format!("failed to read response body: {e}")))?;
        if status_is_error(status) {
            return Err(TransportFailure::Rejected { status: status.as_u16(), body: response_txt });
        }
        Ok(response_txt)
    }
}

fn status_is_error(status: StatusCode) -> bool {
    status.is_client_error() || status.is_server_error()
}

/// An error status means the engine did answer, so a broken body is not retried.
fn body_read_failure(status: StatusCode, message: String) -> TransportFailure {
    if status_is_error(status) {
        TransportFailure::Rejected { status: status.as_u16(), body: message }
    } else {
        TransportFailure::NoResponse(message)
    }
}

/// Posts compiled search documents to the engine, retrying attempts that got no response.
#[derive(Debug, Clone)]
pub struct SearchTransport<C = ReqwestEngineClient> {
    client: C,
    endpoint_url: Url,
    max_retries: u32,
    retry_delay: Duration,
}

impl SearchTransport<ReqwestEngineClient> {
    pub fn new(config: &FetcherConfig) -> std::result::Result<Self, ConfigError> {
        Ok(Self::with_client(ReqwestEngineClient::new(config.timeout)?, config))
    }
}

impl<C: EngineClient> SearchTransport<C> {
    pub fn with_client(client: C, config: &FetcherConfig) -> Self {
        Self {
            client,
            endpoint_url: config.endpoint_url.clone(),
            max_retries: config.max_retries,
            retry_delay: config.retry_delay,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub async fn execute(&self, document: &serde_json::Value) -> Result<RawSearchResponse> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.client.post_json(&self.endpoint_url, document).await {
                Ok(body) => {
                    debug!("search response: len = {}, attempts = {}", body.len(), attempts);
                    return Ok(parse_search_response(&body)?);
                }
                Err(cause) if cause.is_retryable() && attempts <= self.max_retries => {
                    let delay = self.backoff(attempts);
                    warn!(
                        attempt = attempts,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "search request got no response, retrying: {}",
                        cause
                    );
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
                Err(cause) => return Err(TransportError { attempts, cause }.into()),
            }
        }
    }

    fn backoff(&self, attempt: u32) -> Duration {
        self.retry_delay.saturating_mul(1 << (attempt - 1).min(16))
    }
}
