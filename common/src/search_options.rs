//! Search request models: the partial caller input and its fully resolved form.

use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Query string that matches every document.
pub const MATCH_ALL_QUERY: &str = "*";
pub const DEFAULT_OFFSET: u64 = 0;
pub const DEFAULT_LIMIT: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Name,
    #[default]
    Relevance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "asc")]
    Ascending,
    #[default]
    #[serde(rename = "desc")]
    Descending,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Name => "name",
            SortBy::Relevance => "relevance",
        }
    }
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct UnknownSortValue {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for SortBy {
    type Err = UnknownSortValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortBy::Name),
            "relevance" => Ok(SortBy::Relevance),
            _ => Err(UnknownSortValue { kind: "sortBy", value: s.to_string() }),
        }
    }
}

impl FromStr for SortOrder {
    type Err = UnknownSortValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Ascending),
            "desc" => Ok(SortOrder::Descending),
            _ => Err(UnknownSortValue { kind: "sortOrder", value: s.to_string() }),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selected facet values. Each set restricts results to documents carrying one of its ids.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    pub publishers: BTreeSet<String>,
    pub licenses: BTreeSet<String>,
}

impl SearchFilters {
    /// Builds filters from comma separated id lists such as `"p1,p2"`; empty ids are dropped.
    pub fn from_comma_separated(publishers: Option<&str>, licenses: Option<&str>) -> Self {
        fn split_ids(ids: Option<&str>) -> BTreeSet<String> {
            ids.unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect()
        }
        Self {
            publishers: split_ids(publishers),
            licenses: split_ids(licenses),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.publishers.is_empty() && self.licenses.is_empty()
    }
}

/// Caller supplied search request. Every field is optional; see `ResolvedSearchOptions`
/// for the defaults.
///
/// Pagination bounds are signed so that out of range input can be reported instead of
/// being rejected by the type system at deserialization time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchOptions {
    pub query: Option<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
    pub filters: Option<SearchFilters>,
}

impl SearchOptions {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_page(mut self, offset: i64, limit: i64) -> Self {
        self.offset = Some(offset);
        self.limit = Some(limit);
        self
    }

    pub fn with_sort(mut self, sort_by: SortBy, sort_order: SortOrder) -> Self {
        self.sort_by = Some(sort_by);
        self.sort_order = Some(sort_order);
        self
    }

    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.filters = Some(filters);
        self
    }
}

/// Search request with every default applied and every constraint checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSearchOptions {
    pub query: String,
    pub offset: u64,
    /// Always at least 1.
    pub limit: u64,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub filters: SearchFilters,
}

impl Default for ResolvedSearchOptions {
    fn default() -> Self {
        Self {
            query: MATCH_ALL_QUERY.to_string(),
            offset: DEFAULT_OFFSET,
            limit: DEFAULT_LIMIT,
            sort_by: SortBy::default(),
            sort_order: SortOrder::default(),
            filters: SearchFilters::default(),
        }
    }
}
