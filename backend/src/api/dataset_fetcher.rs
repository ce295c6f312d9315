//! Entry point of the search layer: validated options in, facet-aware result out.

use common::{
    search_options::{ResolvedSearchOptions, SearchOptions},
    search_result::{SearchResult, SearchResultFilters},
};
use tracing::{debug, info};

use crate::{
    api::search::{build_facet_filters, build_search_request, decode_datasets, resolve_search_options},
    config::{FetcherConfig, ZeroCountFacets},
    db_utils::elastic_utils::{EngineClient, RawSearchResponse, ReqwestEngineClient, SearchTransport},
    error::{ConfigError, Result},
};

/// Searches the dataset catalog. Holds only immutable configuration, so one instance
/// can serve any number of concurrent searches.
#[derive(Debug, Clone)]
pub struct DatasetFetcher<C = ReqwestEngineClient> {
    transport: SearchTransport<C>,
    zero_count_facets: ZeroCountFacets,
}

impl DatasetFetcher<ReqwestEngineClient> {
    pub fn new(config: FetcherConfig) -> std::result::Result<Self, ConfigError> {
        let transport = SearchTransport::new(&config)?;
        Ok(Self { transport, zero_count_facets: config.zero_count_facets })
    }

    /// Fetcher with default settings for `endpoint_url`.
    pub fn from_endpoint(endpoint_url: &str) -> std::result::Result<Self, ConfigError> {
        Self::new(FetcherConfig::new(endpoint_url)?)
    }
}

impl<C: EngineClient> DatasetFetcher<C> {
    pub fn with_client(client: C, config: &FetcherConfig) -> Self {
        Self {
            transport: SearchTransport::with_client(client, config),
            zero_count_facets: config.zero_count_facets,
        }
    }

    pub async fn search(&self, options: SearchOptions) -> Result<SearchResult> {
        let t0 = std::time::Instant::now();
        let options = resolve_search_options(options)?;
        let request = build_search_request(&options);
        debug!("search request: {}", request);

        let response = self.transport.execute(&request).await?;
        let result = self.build_search_result(options, response)?;

        info!(
            total_count = result.total_count,
            returned = result.datasets.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "dataset search completed"
        );
        Ok(result)
    }

    fn build_search_result(&self, options: ResolvedSearchOptions, response: RawSearchResponse) -> Result<SearchResult> {
        let RawSearchResponse { hits, aggregations } = response;
        let datasets = decode_datasets(hits.hits)?;
        let filters = SearchResultFilters {
            publishers: build_facet_filters(
                aggregations.all.publishers.buckets,
                aggregations.publishers.buckets,
                self.zero_count_facets,
            ),
            licenses: build_facet_filters(
                aggregations.all.licenses.buckets,
                aggregations.licenses.buckets,
                self.zero_count_facets,
            ),
        };

        Ok(SearchResult {
            total_count: hits.total.value,
            offset: options.offset,
            limit: options.limit,
            sort_by: options.sort_by,
            sort_order: options.sort_order,
            datasets,
            filters,
        })
    }
}

#[cfg(test)]
mod tests {
    use common::search_options::{SearchFilters, SortBy, SortOrder};
    use common::search_result::SearchResultFilter;
    use serde_json::json;

    use super::*;
    use crate::{
        db_utils::{
            elastic_utils::tests::{ScriptedClient, empty_response_body, no_response, test_config},
            raw_dataset::{LICENSE_IRI, LICENSE_NAME, NAME, PUBLISHER_IRI, PUBLISHER_NAME},
        },
        error::{SearchError, TransportError},
    };

    fn hit(id: &str, name: Option<&str>) -> serde_json::Value {
        let mut source = serde_json::Map::new();
        source.insert("@id".to_string(), json!(id));
        if let Some(name) = name {
            source.insert(NAME.to_string(), json!([name]));
        }
        source.insert(PUBLISHER_IRI.to_string(), json!(["p1"]));
        source.insert(PUBLISHER_NAME.to_string(), json!(["Pub One"]));
        source.insert(LICENSE_IRI.to_string(), json!(["l1"]));
        source.insert(LICENSE_NAME.to_string(), json!(["License One"]));
        json!({ "_source": source })
    }

    fn response_body(total: u64, hits: Vec<serde_json::Value>) -> String {
        json!({
            "hits": {"total": {"value": total}, "hits": hits},
            "aggregations": {
                "all": {
                    "publishers": {"buckets": [
                        {"key": ["p1", "Pub One"], "doc_count": 10},
                        {"key": ["p2", "Pub Two"], "doc_count": 5}
                    ]},
                    "licenses": {"buckets": [{"key": ["l1", "License One"], "doc_count": 15}]}
                },
                "publishers": {"buckets": [{"key": ["p1", "Pub One"], "doc_count": 3}]},
                "licenses": {"buckets": [{"key": ["l1", "License One"], "doc_count": 3}]}
            }
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_search_assembles_result() {
        let body = response_body(3, vec![hit("d1", Some("Dataset A")), hit("d2", Some("Dataset B"))]);
        let fetcher = DatasetFetcher::with_client(ScriptedClient::new(vec![Ok(body)]), &test_config());

        let result = fetcher.search(SearchOptions::default().with_page(0, 2)).await.unwrap();

        assert_eq!(result.total_count, 3);
        assert_eq!(result.offset, 0);
        assert_eq!(result.limit, 2);
        assert_eq!(result.sort_by, SortBy::Relevance);
        assert_eq!(result.sort_order, SortOrder::Descending);
        assert_eq!(result.datasets.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(), vec!["Dataset A", "Dataset B"]);
        assert_eq!(
            result.filters.publishers,
            vec![SearchResultFilter { id: "p1".to_string(), name: "Pub One".to_string(), total_count: 3 }]
        );
        assert_eq!(result.filters.licenses.len(), 1);
    }

    #[tokio::test]
    async fn test_search_echoes_resolved_options() {
        let fetcher = DatasetFetcher::with_client(ScriptedClient::new(vec![Ok(empty_response_body())]), &test_config());
        let options = SearchOptions::default()
            .with_query("ships")
            .with_page(40, 20)
            .with_sort(SortBy::Name, SortOrder::Ascending)
            .with_filters(SearchFilters::from_comma_separated(Some("p1,p2"), None));

        let result = fetcher.search(options).await.unwrap();

        assert_eq!((result.offset, result.limit), (40, 20));
        assert_eq!((result.sort_by, result.sort_order), (SortBy::Name, SortOrder::Ascending));
        assert!(result.datasets.is_empty());

        let sent = fetcher.transport_client().last_body.lock().unwrap().clone().unwrap();
        assert_eq!(sent["query"]["bool"]["must"][0]["simple_query_string"]["query"], json!("ships"));
        assert_eq!(sent["query"]["bool"]["filter"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_search_with_zero_count_facets_included() {
        let config = test_config().with_zero_count_facets(ZeroCountFacets::Include);
        let body = response_body(1, vec![hit("d1", Some("Dataset A"))]);
        let fetcher = DatasetFetcher::with_client(ScriptedClient::new(vec![Ok(body)]), &config);

        let result = fetcher.search(SearchOptions::default()).await.unwrap();

        let publishers = result.filters.publishers.iter().map(|f| (f.id.as_str(), f.total_count)).collect::<Vec<_>>();
        assert_eq!(publishers, vec![("p1", 3), ("p2", 0)]);
    }

    #[tokio::test]
    async fn test_invalid_options_never_reach_the_engine() {
        let fetcher = DatasetFetcher::with_client(ScriptedClient::new(vec![]), &test_config());

        let err = fetcher.search(SearchOptions { limit: Some(0), ..Default::default() }).await.unwrap_err();

        assert!(matches!(err, SearchError::Validation(ref e) if e.field == "limit"), "{err:?}");
        assert_eq!(fetcher.transport_client().calls(), 0);
    }

    #[tokio::test]
    async fn test_invalid_hit_fails_the_search() {
        let body = response_body(2, vec![hit("d1", Some("Dataset A")), hit("d2", None)]);
        let fetcher = DatasetFetcher::with_client(ScriptedClient::new(vec![Ok(body)]), &test_config());

        let err = fetcher.search(SearchOptions::default()).await.unwrap_err();

        match err {
            SearchError::Decode(e) => {
                assert_eq!(e.field, "name");
                assert_eq!(e.document_id.as_deref(), Some("d2"));
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transport_errors_propagate_unchanged() {
        let client = ScriptedClient::new(vec![no_response(), no_response(), no_response(), no_response()]);
        let fetcher = DatasetFetcher::with_client(client, &test_config());

        let err = fetcher.search(SearchOptions::default()).await.unwrap_err();

        assert!(matches!(err, SearchError::Transport(TransportError { attempts: 4, .. })), "{err:?}");
    }

    #[test]
    fn test_from_endpoint_rejects_malformed_url() {
        assert!(matches!(DatasetFetcher::from_endpoint("search engine"), Err(ConfigError::InvalidEndpoint { .. })));
    }

    impl<C: EngineClient> DatasetFetcher<C> {
        fn transport_client(&self) -> &C {
            self.transport.client()
        }
    }
}
