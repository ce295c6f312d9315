use serde::{Deserialize, Serialize};

use crate::{
    dataset::Dataset,
    search_options::{SortBy, SortOrder},
};

/// One facet value and the number of matching documents carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultFilter {
    pub id: String,
    pub name: String,
    pub total_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchResultFilters {
    pub publishers: Vec<SearchResultFilter>,
    pub licenses: Vec<SearchResultFilter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub total_count: u64,
    pub offset: u64,
    pub limit: u64,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub datasets: Vec<Dataset>,
    pub filters: SearchResultFilters,
}
