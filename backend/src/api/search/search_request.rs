//! Compiles resolved search options into the engine's query document.

use std::collections::BTreeSet;

use common::search_options::{ResolvedSearchOptions, SortBy};
use serde_json::{Value, json};

use crate::{
    api::search::search_aggregations::build_facet_aggregation,
    db_utils::raw_dataset::{
        DATASET_TYPE, LICENSE_IRI, LICENSE_NAME, NAME, PUBLISHER_IRI, PUBLISHER_NAME, SCORE, TYPE, keyword_field,
    },
};

pub fn sort_field(sort_by: SortBy) -> String {
    match sort_by {
        SortBy::Name => keyword_field(NAME),
        SortBy::Relevance => SCORE.to_string(),
    }
}

pub fn build_search_request(options: &ResolvedSearchOptions) -> Value {
    let publishers_aggregation = build_facet_aggregation(PUBLISHER_IRI, PUBLISHER_NAME);
    let licenses_aggregation = build_facet_aggregation(LICENSE_IRI, LICENSE_NAME);

    // the type restriction always comes first and cannot be displaced by caller filters
    let mut filter = vec![terms_clause(TYPE, [DATASET_TYPE])];
    if let Some(clause) = facet_filter_clause(PUBLISHER_IRI, &options.filters.publishers) {
        filter.push(clause);
    }
    if let Some(clause) = facet_filter_clause(LICENSE_IRI, &options.filters.licenses) {
        filter.push(clause);
    }

    let mut sort = serde_json::Map::new();
    sort.insert(sort_field(options.sort_by), json!(options.sort_order.as_str()));

    json!({
        "size": options.limit,
        "from": options.offset,
        "sort": [sort],
        "query": {
            "bool": {
                "must": [
                    {
                        "simple_query_string": {
                            "query": options.query,
                            "default_operator": "and"
                        }
                    }
                ],
                "filter": filter
            }
        },
        "aggregations": {
            "all": {
                "global": {},
                "aggregations": {
                    "publishers": publishers_aggregation.clone(),
                    "licenses": licenses_aggregation.clone()
                }
            },
            "publishers": publishers_aggregation,
            "licenses": licenses_aggregation
        }
    })
}

fn facet_filter_clause(id_field: &str, ids: &BTreeSet<String>) -> Option<Value> {
    if ids.is_empty() {
        return None;
    }
    Some(terms_clause(id_field, ids.iter().map(String::as_str)))
}

fn terms_clause<'a>(field: &str, values: impl IntoIterator<Item = &'a str>) -> Value {
    let values = values.into_iter().collect::<Vec<_>>();
    let mut terms = serde_json::Map::new();
    terms.insert(keyword_field(field), json!(values));
    json!({ "terms": terms })
}
