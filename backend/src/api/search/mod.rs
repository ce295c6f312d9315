//! Dataset search: option validation, request compilation and response decoding.

mod search_options;
pub use search_options::{parse_sort_by, parse_sort_order, resolve_search_options};

mod search_request;
pub use search_request::{build_search_request, sort_field};

mod search_aggregations;
pub use search_aggregations::build_facet_aggregation;

mod search_for_results;
pub use search_for_results::{decode_dataset, decode_datasets};

mod search_facets;
pub use search_facets::build_facet_filters;
