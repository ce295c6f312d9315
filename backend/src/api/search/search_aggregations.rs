//! Facet aggregation specs.

use serde_json::{Value, json};

use crate::db_utils::raw_dataset::keyword_field;

/// Buckets documents by the `(id, name)` pair of one facet dimension, so counts stay
/// attributed to a stable identifier while carrying a display name.
pub fn build_facet_aggregation(id_field: &str, name_field: &str) -> Value {
    json!({
        "multi_terms": {
            "terms": [
                {"field": keyword_field(id_field)},
                {"field": keyword_field(name_field)}
            ]
        }
    })
}
