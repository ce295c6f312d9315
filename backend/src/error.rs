//! Error types for each stage of a dataset search.

use thiserror::Error;

/// Caller supplied options that violate their constraints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid search option `{field}`: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self { field, reason: reason.into() }
    }
}

/// Why a single attempt against the search engine failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportFailure {
    /// No response was received: connection failure, timeout, interrupted body.
    #[error("no response from search engine: {0}")]
    NoResponse(String),

    /// The engine answered with a non-success status.
    #[error("search engine rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The request could not be built or sent at all.
    #[error("invalid search request: {0}")]
    InvalidRequest(String),
}

impl TransportFailure {
    pub fn is_retryable(&self) -> bool {
        matches!(self, TransportFailure::NoResponse(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("search request failed after {attempts} attempt(s): {cause}")]
pub struct TransportError {
    pub attempts: u32,
    #[source]
    pub cause: TransportFailure,
}

/// The engine response does not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected search engine response: {message}")]
pub struct SchemaError {
    pub message: String,
}

impl SchemaError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// A hit is missing a field every dataset must have.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("dataset {} is missing required field `{field}`", document_id.as_deref().unwrap_or("<unknown>"))]
pub struct DecodeError {
    pub document_id: Option<String>,
    pub field: &'static str,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid search endpoint url {url:?}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Any failure of `DatasetFetcher::search`. Stage errors are passed through unchanged.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

pub type Result<T, E = SearchError> = std::result::Result<T, E>;
