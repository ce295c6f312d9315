//! Search engine connection settings.

use std::time::Duration;

use reqwest::Url;

use crate::error::ConfigError;

pub const ENDPOINT_ENV_VAR: &str = "SEARCH_PLATFORM_ELASTIC_ENDPOINT_URL";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::ZERO;

/// What to do with facet values that exist in the catalog but have no match under
/// the active query and filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroCountFacets {
    /// Only values with matches are returned.
    #[default]
    Omit,
    /// Values without matches are appended with a count of zero.
    Include,
}

#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub endpoint_url: Url,
    /// Per attempt.
    pub timeout: Duration,
    /// Additional attempts after the first when no response was received.
    pub max_retries: u32,
    /// Delay before the first retry, doubled for every following one. Zero unless set
    /// through `with_retries`, so retries add no time beyond the per attempt timeout.
    pub retry_delay: Duration,
    pub zero_count_facets: ZeroCountFacets,
}

impl FetcherConfig {
    pub fn new(endpoint_url: &str) -> Result<Self, ConfigError> {
        let endpoint_url = parse_endpoint(endpoint_url)?;
        Ok(Self {
            endpoint_url,
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            zero_count_facets: ZeroCountFacets::default(),
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var(ENDPOINT_ENV_VAR).map_err(|_| ConfigError::MissingEnv(ENDPOINT_ENV_VAR))?;
        Self::new(&url)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retries(mut self, max_retries: u32, retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_zero_count_facets(mut self, policy: ZeroCountFacets) -> Self {
        self.zero_count_facets = policy;
        self
    }
}

fn parse_endpoint(url: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEndpoint { url: url.to_string(), reason };
    let parsed = Url::parse(url.trim()).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme {other:?}"))),
    }
    if parsed.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(parsed)
}
