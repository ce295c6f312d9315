//! Faceted dataset catalog search over an HTTP/JSON document search engine.
//!
//! [`DatasetFetcher::search`] validates the caller's options, compiles them into the
//! engine's query and aggregation document, posts it with a bounded retry policy and
//! turns the response into datasets plus publisher and license facet counts.

pub mod api;
pub mod config;
pub mod db_utils;
pub mod error;

pub use api::dataset_fetcher::DatasetFetcher;
pub use config::{FetcherConfig, ZeroCountFacets};
pub use error::{ConfigError, DecodeError, SchemaError, SearchError, TransportError, TransportFailure, ValidationError};
