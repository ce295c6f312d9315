//! Facet filter lists built from the global and scoped aggregation buckets.

use std::collections::HashSet;

use common::search_result::SearchResultFilter;

use crate::{config::ZeroCountFacets, db_utils::elastic_utils::RawSearchResultAggregationBucket};

/// Merges one facet dimension.
///
/// `scoped` buckets were counted under the active query and filters; they are the
/// returned rows, in engine order, with their own counts. `global` buckets were counted
/// over the whole catalog and only contribute rows for values without matches, when
/// `zero_count` asks for them.
pub fn build_facet_filters(
    global: Vec<RawSearchResultAggregationBucket>,
    scoped: Vec<RawSearchResultAggregationBucket>,
    zero_count: ZeroCountFacets,
) -> Vec<SearchResultFilter> {
    let mut filters = scoped
        .into_iter()
        .map(|bucket| SearchResultFilter {
            id: bucket.key.id,
            name: bucket.key.name,
            total_count: bucket.doc_count,
        })
        .collect::<Vec<_>>();

    if zero_count == ZeroCountFacets::Include {
        let mut present_ids = filters.iter().map(|filter| filter.id.clone()).collect::<HashSet<_>>();
        for bucket in global {
            if present_ids.contains(&bucket.key.id) {
                continue;
            }
            present_ids.insert(bucket.key.id.clone());
            filters.push(SearchResultFilter {
                id: bucket.key.id,
                name: bucket.key.name,
                total_count: 0,
            });
        }
    }

    filters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db_utils::elastic_utils::FacetKey;

    fn bucket(id: &str, name: &str, doc_count: u64) -> RawSearchResultAggregationBucket {
        RawSearchResultAggregationBucket {
            key: FacetKey { id: id.to_string(), name: name.to_string() },
            doc_count,
        }
    }

    fn filter(id: &str, name: &str, total_count: u64) -> SearchResultFilter {
        SearchResultFilter { id: id.to_string(), name: name.to_string(), total_count }
    }

    #[test]
    fn test_scoped_counts_win_over_global_counts() {
        let filters = build_facet_filters(
            vec![bucket("p1", "Pub One", 10)],
            vec![bucket("p1", "Pub One", 3)],
            ZeroCountFacets::Omit,
        );
        assert_eq!(filters, vec![filter("p1", "Pub One", 3)]);
    }

    #[test]
    fn test_global_only_values_are_omitted_by_default() {
        let filters = build_facet_filters(
            vec![bucket("p1", "Pub One", 10), bucket("p2", "Pub Two", 4)],
            vec![bucket("p2", "Pub Two", 1)],
            ZeroCountFacets::Omit,
        );
        assert_eq!(filters, vec![filter("p2", "Pub Two", 1)]);
    }

    #[test]
    fn test_engine_order_is_preserved() {
        let filters = build_facet_filters(
            vec![],
            vec![bucket("l2", "Licence B", 7), bucket("l1", "Licence A", 9), bucket("l3", "Licence C", 7)],
            ZeroCountFacets::Omit,
        );
        let ids = filters.iter().map(|f| f.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["l2", "l1", "l3"]);
    }

    #[test]
    fn test_include_appends_global_only_values_with_zero_count() {
        let filters = build_facet_filters(
            vec![bucket("p1", "Pub One", 10), bucket("p2", "Pub Two", 4), bucket("p3", "Pub Three", 2)],
            vec![bucket("p2", "Pub Two", 1)],
            ZeroCountFacets::Include,
        );
        assert_eq!(
            filters,
            vec![filter("p2", "Pub Two", 1), filter("p1", "Pub One", 0), filter("p3", "Pub Three", 0)]
        );
    }

    #[test]
    fn test_empty_buckets_give_empty_list() {
        assert!(build_facet_filters(vec![], vec![], ZeroCountFacets::Include).is_empty());
    }
}
